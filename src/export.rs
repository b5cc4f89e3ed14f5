use crate::config::OutputFormat;
use crate::error::Result;
use crate::models::CollectedResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Column header; the first (index) column is intentionally unnamed.
pub const CSV_HEADER: [&str; 5] = ["", "link", "bike_name", "price", "condition"];

/// Write listings as CSV with the synthetic row index in the first column
pub fn write_csv<W: Write>(result: &CollectedResult, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for row in result.indexed() {
        csv_writer.write_record([
            row.index.to_string().as_str(),
            row.record.link.as_str(),
            row.record.bike_name.as_str(),
            row.record.price.as_str(),
            row.record.condition.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Save listings to a CSV file, replacing any previous file
pub fn save_to_csv<P: AsRef<Path>>(result: &CollectedResult, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_csv(result, file)
}

/// Save listings to a JSON file as an array of indexed records
pub fn save_to_json<P: AsRef<Path>>(result: &CollectedResult, path: P) -> Result<()> {
    let rows: Vec<_> = result.indexed().collect();
    let json = serde_json::to_string_pretty(&rows)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

pub fn save<P: AsRef<Path>>(result: &CollectedResult, path: P, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => save_to_csv(result, path),
        OutputFormat::Json => save_to_json(result, path),
    }
}
