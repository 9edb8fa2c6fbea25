use serde::{Deserialize, Serialize};

/// One meter's reading status within the queried window.
///
/// A status beginning with `"Found"` means the reading was collected; any
/// other status names an exception category. Record sets are replaced
/// wholesale per query, never merged incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterRecord {
    #[serde(rename = "ServicePointId")]
    pub service_point_id: String,
    #[serde(rename = "MeterID")]
    pub meter_id: String,
    #[serde(rename = "Latest_Value")]
    pub latest_value: Option<f64>,
    #[serde(rename = "Latest_Reading_Time")]
    pub latest_reading_time: Option<String>,
    #[serde(rename = "Status")]
    pub status: String,
}

impl MeterRecord {
    /// Whether the reading was collected successfully.
    pub fn is_found(&self) -> bool {
        self.status.starts_with("Found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_record() {
        let json = r#"{
            "ServicePointId": "SP-0001",
            "MeterID": "MTR-42",
            "Latest_Value": 1234.567,
            "Latest_Reading_Time": "2026-01-14T23:45:00",
            "Status": "Found - OK"
        }"#;
        let record: MeterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.service_point_id, "SP-0001");
        assert_eq!(record.meter_id, "MTR-42");
        assert_eq!(record.latest_value, Some(1234.567));
        assert!(record.is_found());
    }

    #[test]
    fn missing_optionals_deserialize_as_none() {
        let json = r#"{"ServicePointId":"SP-2","MeterID":"MTR-2","Status":"No Reading"}"#;
        let record: MeterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.latest_value, None);
        assert_eq!(record.latest_reading_time, None);
        assert!(!record.is_found());
    }

    #[test]
    fn found_prefix_alone_counts_as_found() {
        let json = r#"{"ServicePointId":"SP-3","MeterID":"MTR-3","Latest_Value":null,"Latest_Reading_Time":null,"Status":"Found"}"#;
        let record: MeterRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_found());
    }
}
