use serde::{Deserialize, Serialize};

/// One billing cycle as reported by the backend.
///
/// `billing_date` is an 8-digit `YYYYMMDD` string; `unique_meters` is the
/// number of distinct meters expected to report for that cycle. The list of
/// entries is replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillingDateEntry {
    pub billing_date: String,
    pub unique_meters: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_field_names() {
        let json = r#"{"BillingDate":"20260115","UniqueMeters":100}"#;
        let entry: BillingDateEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.billing_date, "20260115");
        assert_eq!(entry.unique_meters, 100);
    }

    #[test]
    fn serializes_back_to_backend_field_names() {
        let entry = BillingDateEntry {
            billing_date: "20260115".to_string(),
            unique_meters: 42,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"BillingDate":"20260115","UniqueMeters":42}"#);
    }
}
