pub mod clipboard;
pub mod csv;

pub use csv::{export_records, write_csv, ExportError};
