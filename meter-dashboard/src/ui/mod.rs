//! Ratatui view for the dashboard. Pure rendering over [`DashboardState`];
//! all behavior lives in the controller.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use crate::controller::{window, DashboardState, REFRESH_INTERVAL_SECS};

mod palette {
    use ratatui::style::Color;

    pub const ACCENT: Color = Color::Cyan;
    pub const OK: Color = Color::Green;
    pub const ALERT: Color = Color::Red;
    pub const WARN: Color = Color::Yellow;
    pub const DIM: Color = Color::DarkGray;
}

pub fn draw(frame: &mut Frame, state: &DashboardState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, outer[0], state);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(0)])
        .split(outer[1]);

    draw_billing_dates(frame, body[0], state);

    if state.selection.is_some() {
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(body[1]);
        draw_summary_cards(frame, main[0], state);
        draw_records(frame, main[1], state);
    } else {
        draw_records(frame, body[1], state);
    }

    draw_footer(frame, outer[2], state);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let countdown_style = if state.countdown < 10 {
        Style::default()
            .fg(palette::ALERT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette::ACCENT)
    };

    let line = Line::from(vec![
        Span::styled(
            " Meter Monitor ",
            Style::default()
                .fg(palette::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("LIVE", Style::default().fg(palette::OK)),
        Span::raw("  "),
        Span::styled(
            format!("refresh in {:>2}s", state.countdown),
            countdown_style,
        ),
        Span::raw("  "),
        Span::styled(state.backend_addr.as_str(), Style::default().fg(palette::DIM)),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("billing-cycle meter status"),
    );
    frame.render_widget(header, area);
}

fn draw_billing_dates(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let selected = state.selection.as_ref().map(|s| s.billing_date.as_str());

    let items: Vec<ListItem> = state
        .billing_dates
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let actionable = window::is_selectable(&entry.billing_date, state.today);
            let marker = if idx == state.cursor { "▸ " } else { "  " };

            let style = if !actionable {
                Style::default()
                    .fg(palette::DIM)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else if selected == Some(entry.billing_date.as_str()) {
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    format!("{}  {:>10}", entry.billing_date, entry.unique_meters),
                    style,
                ),
            ]))
        })
        .collect();

    let title = if state.loading_dates {
        "Billing Dates (loading…)"
    } else {
        "Billing Dates"
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn draw_summary_cards(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(summary) = state.summary() else {
        return;
    };
    let pending = state.loading && state.records.is_empty();
    let value = |n: u64| {
        if pending {
            "…".to_string()
        } else {
            n.to_string()
        }
    };

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let rate = if pending {
        "…".to_string()
    } else {
        format!("{}%", summary.success_rate())
    };

    draw_card(
        frame,
        cards[0],
        "TOTAL",
        summary.expected_total.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    );
    draw_card(
        frame,
        cards[1],
        "FOUND",
        value(summary.found_count),
        Style::default()
            .fg(palette::OK)
            .add_modifier(Modifier::BOLD),
    );
    draw_card(
        frame,
        cards[2],
        "EXCEPTIONS",
        value(summary.exception_count),
        Style::default()
            .fg(palette::ALERT)
            .add_modifier(Modifier::BOLD),
    );
    draw_card(
        frame,
        cards[3],
        "SUCCESS",
        rate,
        Style::default()
            .fg(palette::ACCENT)
            .add_modifier(Modifier::BOLD),
    );
}

fn draw_card(frame: &mut Frame, area: Rect, title: &str, value: String, style: Style) {
    let card = Paragraph::new(Line::from(Span::styled(value, style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(card, area);
}

fn draw_records(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let title = match &state.selection {
        Some(selection) => format!(
            "Live Status: {} ({} records, sort: {})",
            selection.billing_date,
            state.records.len(),
            state.sort.label()
        ),
        None => "Live Status".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if state.records.is_empty() {
        let message = if state.loading {
            Span::styled("Loading meter status…", Style::default().fg(palette::WARN))
        } else if state.selection.is_some() {
            Span::styled("No records in this window", Style::default().fg(palette::DIM))
        } else {
            Span::styled(
                "Select a billing date to display data",
                Style::default().fg(palette::DIM),
            )
        };
        let placeholder = Paragraph::new(Line::from(message))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let header = Row::new(["SPID", "METER ID", "LAST VALUE", "READING TIME", "STATUS"])
        .style(
            Style::default()
                .fg(palette::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = state
        .visible_records()
        .into_iter()
        .map(|record| {
            let value = record
                .latest_value
                .map(|v| format!("{v:.3}"))
                .unwrap_or_else(|| "-".to_string());
            let reading_time = record.latest_reading_time.as_deref().unwrap_or("-");
            let status_style = if record.is_found() {
                Style::default().fg(palette::OK)
            } else {
                Style::default().fg(palette::ALERT)
            };

            Row::new(vec![
                Cell::from(record.service_point_id.clone()),
                Cell::from(record.meter_id.clone()),
                Cell::from(value),
                Cell::from(reading_time.to_string()),
                Cell::from(Span::styled(record.status.clone(), status_style)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(22),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .column_spacing(1)
    .block(block);

    frame.render_widget(table, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let mut spans = vec![Span::styled(
        format!(
            " q quit  ↑/↓ move  ⏎ query  r reload  s sort  c copy ids  e export csv  ({}s cycle)",
            REFRESH_INTERVAL_SECS
        ),
        Style::default().fg(palette::DIM),
    )];

    if let Some(error) = &state.error {
        spans.push(Span::styled(
            format!("  {error}"),
            Style::default()
                .fg(palette::ALERT)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(notice) = &state.notice {
        spans.push(Span::styled(
            format!("  {notice}"),
            Style::default().fg(palette::OK),
        ));
    }
    if state.loading {
        spans.push(Span::styled("  UPDATING…", Style::default().fg(palette::WARN)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
