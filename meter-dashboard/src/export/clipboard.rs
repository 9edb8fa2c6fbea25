use std::io::{self, Write};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use meter_client::domain::MeterRecord;

/// Newline-joined meter IDs for the current record set.
pub fn meter_id_lines(records: &[MeterRecord]) -> String {
    records
        .iter()
        .map(|r| r.meter_id.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Place `text` on the system clipboard via an OSC 52 escape sequence.
/// Terminals without OSC 52 support ignore the sequence.
pub fn copy_to_clipboard<W: Write>(text: &str, out: &mut W) -> io::Result<()> {
    write!(out, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
    out.flush()
}
