use time::{macros::format_description, Date, Duration};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum WindowError {
    #[error("invalid billing date '{value}': {reason}")]
    InvalidBillingDate { value: String, reason: String },
}

/// Query window for a billing date: the two calendar days preceding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWindow {
    pub start_target: String,
    pub end_target: String,
}

fn invalid(value: &str, reason: impl ToString) -> WindowError {
    WindowError::InvalidBillingDate {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse an 8-digit `YYYYMMDD` billing date into a calendar date.
pub fn parse_billing_date(value: &str) -> Result<Date, WindowError> {
    Date::parse(value, &format_description!("[year][month][day]"))
        .map_err(|e| invalid(value, e))
}

/// Compute the query window for a billing date: start is two days before at
/// 00:00, end is one day before at 23:59.
pub fn query_window(billing_date: &str) -> Result<QueryWindow, WindowError> {
    let date = parse_billing_date(billing_date)?;
    let start = date
        .checked_sub(Duration::days(2))
        .ok_or_else(|| invalid(billing_date, "outside the supported calendar range"))?;
    let end = date
        .checked_sub(Duration::days(1))
        .ok_or_else(|| invalid(billing_date, "outside the supported calendar range"))?;

    let dashed = format_description!("[year]-[month]-[day]");
    let start_day = start.format(&dashed).map_err(|e| invalid(billing_date, e))?;
    let end_day = end.format(&dashed).map_err(|e| invalid(billing_date, e))?;

    Ok(QueryWindow {
        start_target: format!("{start_day} 00:00"),
        end_target: format!("{end_day} 23:59"),
    })
}

/// Tomorrow relative to `today`, as a compact `YYYYMMDD` string. `None` only
/// at the end of the supported calendar.
pub fn tomorrow_compact(today: Date) -> Option<String> {
    today
        .next_day()
        .and_then(|d| d.format(&format_description!("[year][month][day]")).ok())
}

/// A billing date is actionable only when its numeric value is at most
/// tomorrow's. Entries that are not 8-digit numbers are never actionable.
pub fn is_selectable(billing_date: &str, today: Date) -> bool {
    let Some(tomorrow) = tomorrow_compact(today) else {
        return false;
    };
    match (billing_date.parse::<u32>(), tomorrow.parse::<u32>()) {
        (Ok(date), Ok(tomorrow)) => date <= tomorrow,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn window_covers_the_two_preceding_days() {
        let window = query_window("20260115").unwrap();
        assert_eq!(window.start_target, "2026-01-13 00:00");
        assert_eq!(window.end_target, "2026-01-14 23:59");
    }

    #[test]
    fn window_crosses_month_boundaries() {
        let window = query_window("20260301").unwrap();
        assert_eq!(window.start_target, "2026-02-27 00:00");
        assert_eq!(window.end_target, "2026-02-28 23:59");
    }

    #[test]
    fn window_respects_leap_years() {
        let window = query_window("20240301").unwrap();
        assert_eq!(window.start_target, "2024-02-28 00:00");
        assert_eq!(window.end_target, "2024-02-29 23:59");
    }

    #[test]
    fn window_crosses_year_boundaries() {
        let window = query_window("20260101").unwrap();
        assert_eq!(window.start_target, "2025-12-30 00:00");
        assert_eq!(window.end_target, "2025-12-31 23:59");
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert!(query_window("2026").is_err());
        assert!(query_window("20261315").is_err());
        assert!(query_window("20260230").is_err());
        assert!(query_window("not-a-date").is_err());
    }

    #[test]
    fn tomorrow_is_formatted_compact() {
        assert_eq!(
            tomorrow_compact(date!(2026 - 01 - 14)).as_deref(),
            Some("20260115")
        );
        assert_eq!(
            tomorrow_compact(date!(2026 - 01 - 31)).as_deref(),
            Some("20260201")
        );
        assert_eq!(
            tomorrow_compact(date!(2026 - 12 - 31)).as_deref(),
            Some("20270101")
        );
    }

    #[test]
    fn dates_up_to_tomorrow_are_selectable() {
        let today = date!(2026 - 01 - 14);
        assert!(is_selectable("20260113", today));
        assert!(is_selectable("20260115", today));
        assert!(!is_selectable("20260116", today));
        assert!(!is_selectable("garbage", today));
    }
}
