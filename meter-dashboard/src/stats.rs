use meter_client::domain::MeterRecord;

/// Summary figures for the selected billing cycle.
///
/// `found_count` is derived from the billing total, not counted from
/// `"Found"` rows: `expected_total - exception_count`, saturating at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingSummary {
    pub expected_total: u64,
    pub exception_count: u64,
    pub found_count: u64,
}

impl BillingSummary {
    pub fn derive(expected_total: u64, records: &[MeterRecord]) -> Self {
        let exception_count = records.iter().filter(|r| !r.is_found()).count() as u64;
        let found_count = expected_total.saturating_sub(exception_count);
        Self {
            expected_total,
            exception_count,
            found_count,
        }
    }

    /// Success percentage with one decimal, e.g. `"93.0"`. `"0.0"` when the
    /// billing cycle expects no meters.
    pub fn success_rate(&self) -> String {
        if self.expected_total == 0 {
            return "0.0".to_string();
        }
        format!(
            "{:.1}",
            (self.found_count as f64 / self.expected_total as f64) * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str) -> MeterRecord {
        MeterRecord {
            service_point_id: "SP-1".to_string(),
            meter_id: "MTR-1".to_string(),
            latest_value: None,
            latest_reading_time: None,
            status: status.to_string(),
        }
    }

    #[test]
    fn derives_counts_from_status_prefix() {
        let records: Vec<MeterRecord> = (0..7)
            .map(|_| record("No Reading"))
            .chain((0..13).map(|_| record("Found - OK")))
            .collect();

        let summary = BillingSummary::derive(100, &records);
        assert_eq!(summary.exception_count, 7);
        assert_eq!(summary.found_count, 93);
        assert_eq!(summary.success_rate(), "93.0");
        assert_eq!(
            summary.found_count + summary.exception_count,
            summary.expected_total
        );
    }

    #[test]
    fn partial_results_keep_the_derived_success_count() {
        // Only 3 of 100 records present; the success figure still reflects
        // the billing total minus the observed exceptions.
        let records: Vec<MeterRecord> = (0..3).map(|_| record("Comms Failure")).collect();
        let summary = BillingSummary::derive(100, &records);
        assert_eq!(summary.found_count, 97);
    }

    #[test]
    fn more_exceptions_than_expected_saturates_at_zero() {
        let records: Vec<MeterRecord> = (0..5).map(|_| record("No Reading")).collect();
        let summary = BillingSummary::derive(3, &records);
        assert_eq!(summary.found_count, 0);
    }

    #[test]
    fn zero_expected_total_reports_zero_rate() {
        let summary = BillingSummary::derive(0, &[]);
        assert_eq!(summary.success_rate(), "0.0");
    }

    #[test]
    fn rate_keeps_one_decimal() {
        let records: Vec<MeterRecord> = (0..1).map(|_| record("No Reading")).collect();
        let summary = BillingSummary::derive(8, &records);
        assert_eq!(summary.success_rate(), "87.5");
    }
}
