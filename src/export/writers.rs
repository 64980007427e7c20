// src/export/writers.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{CSV_HEADERS, ReportExport};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub(crate) fn export_json(report: &ReportExport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(report)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Plain header line, then data rows with every text field quoted.
pub(crate) fn export_csv(report: &ReportExport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_path(path)?;
    header.write_record(CSV_HEADERS)?;
    header.flush()?;
    let file = header
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV write error: {}", e)))?;

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(file);

    for row in &report.rows {
        wtr.write_record(row.to_record())?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
