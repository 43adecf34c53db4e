use std::io::Write;

use serde::Serialize;

use crate::domain::snapshot::NormalizedRecord;

#[derive(Serialize)]
struct NormalizedRecordRow<'a> {
    snapshot_date: String,
    group_key: &'a str,
    original_minutes: u32,
    remaining_minutes: u32,
}

/// Writes one CSV row per normalized record, with a header line.
pub fn write_dataset_csv<W: Write>(writer: W, records: &[NormalizedRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(NormalizedRecordRow {
            snapshot_date: record.snapshot_date.format("%Y-%m-%d").to_string(),
            group_key: &record.group_key,
            original_minutes: record.original_minutes,
            remaining_minutes: record.remaining_minutes,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
