use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use meter_client::domain::MeterRecord;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("csv serialization failed: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// File name for a billing date's export, e.g. `Meter_Status_20260115.csv`.
pub fn export_file_name(billing_date: &str) -> String {
    format!("Meter_Status_{billing_date}.csv")
}

/// Serialize the record set as CSV with the backend's field names as the
/// header row. Values are written exactly as the backend sent them.
pub fn write_csv<W: Write>(records: &[MeterRecord], writer: W) -> Result<(), ExportError> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the record set to `dir` under the conventional file name and
/// return the full path.
pub fn export_records(
    records: &[MeterRecord],
    billing_date: &str,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_file_name(billing_date));
    let file = File::create(&path)?;
    write_csv(records, file)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows_with_backend_names() {
        let records = vec![
            MeterRecord {
                service_point_id: "SP-1".to_string(),
                meter_id: "MTR-1".to_string(),
                latest_value: Some(1234.567),
                latest_reading_time: Some("2026-01-14T23:45:00".to_string()),
                status: "Found - OK".to_string(),
            },
            MeterRecord {
                service_point_id: "SP-2".to_string(),
                meter_id: "MTR-2".to_string(),
                latest_value: None,
                latest_reading_time: None,
                status: "No Reading".to_string(),
            },
        ];

        let mut buf = Vec::new();
        write_csv(&records, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("ServicePointId,MeterID,Latest_Value,Latest_Reading_Time,Status")
        );
        assert_eq!(
            lines.next(),
            Some("SP-1,MTR-1,1234.567,2026-01-14T23:45:00,Found - OK")
        );
        assert_eq!(lines.next(), Some("SP-2,MTR-2,,,No Reading"));
    }

    #[test]
    fn file_name_embeds_the_billing_date() {
        assert_eq!(export_file_name("20260115"), "Meter_Status_20260115.csv");
    }
}
