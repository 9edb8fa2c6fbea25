use std::{io, sync::Arc, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use meter_client::api::{Backend, HttpBackend};
use meter_dashboard::{
    config::AppConfig,
    controller::{update, DashboardState, Effect, Event},
    export, metrics_server, observability,
    runtime::{dispatch, local_today},
    ui,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Restores the terminal even when the event loop exits through an error.
struct TerminalCleanup;

impl Drop for TerminalCleanup {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let cfg = AppConfig::load()?;

    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr);
    }

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(
        &cfg.backend.base_url,
        Duration::from_secs(cfg.backend.request_timeout_secs),
    )?);

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let _cleanup = TerminalCleanup;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    run(terminal, backend, &cfg).await
}

async fn run(
    mut terminal: Terminal<CrosstermBackend<io::Stdout>>,
    backend: Arc<dyn Backend>,
    cfg: &AppConfig,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(32);
    let mut state = DashboardState::new(local_today(), cfg.backend.base_url.clone());
    let mut term_events = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    dispatch(Effect::FetchDates, backend.clone(), tx.clone());

    loop {
        terminal.draw(|frame| ui::draw(frame, &state))?;

        let event = tokio::select! {
            _ = ticker.tick() => Some(Event::Tick),
            term = term_events.next() => match term {
                Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    match handle_key(key, &state, cfg)? {
                        KeyOutcome::Quit => return Ok(()),
                        KeyOutcome::Emit(event) => Some(event),
                        KeyOutcome::Handled => None,
                    }
                }
                Some(Ok(_)) => None,
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },
            received = rx.recv() => received,
        };

        if let Some(event) = event {
            for effect in update(&mut state, event, local_today()) {
                dispatch(effect, backend.clone(), tx.clone());
            }
        }
    }
}

enum KeyOutcome {
    Quit,
    Emit(Event),
    Handled,
}

fn handle_key(key: KeyEvent, state: &DashboardState, cfg: &AppConfig) -> Result<KeyOutcome> {
    let outcome = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Quit,
        KeyCode::Up => KeyOutcome::Emit(Event::CursorUp),
        KeyCode::Down => KeyOutcome::Emit(Event::CursorDown),
        KeyCode::Enter => KeyOutcome::Emit(Event::Activate),
        KeyCode::Char('r') => KeyOutcome::Emit(Event::ReloadDates),
        KeyCode::Char('s') => KeyOutcome::Emit(Event::CycleSort),
        KeyCode::Char('c') => {
            if state.records.is_empty() {
                KeyOutcome::Handled
            } else {
                let ids = export::clipboard::meter_id_lines(&state.records);
                export::clipboard::copy_to_clipboard(&ids, &mut io::stdout())?;
                metrics::counter!("meter_id_copies_total").increment(1);
                KeyOutcome::Emit(Event::Notice("Copied meter IDs".to_string()))
            }
        }
        KeyCode::Char('e') => match &state.selection {
            Some(selection) if !state.records.is_empty() => {
                match export::export_records(&state.records, &selection.billing_date, &cfg.export.dir)
                {
                    Ok(path) => {
                        metrics::counter!("csv_exports_total").increment(1);
                        tracing::info!(path = %path.display(), "exported meter status");
                        KeyOutcome::Emit(Event::Notice(format!("Exported {}", path.display())))
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "csv export failed");
                        KeyOutcome::Emit(Event::Notice(format!("Export failed: {e}")))
                    }
                }
            }
            _ => KeyOutcome::Handled,
        },
        _ => KeyOutcome::Handled,
    };
    Ok(outcome)
}
