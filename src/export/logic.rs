// src/export/logic.rs

use crate::core::membership::revenue::RevenueSummary;
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::model::ReportExport;
use crate::export::writers::{export_csv, export_json};
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write the revenue report of `[start, end]` to `file`.
    /// An empty period still produces a file (header only for CSV).
    pub fn export_report(
        pool: &mut DbPool,
        summary: &RevenueSummary,
        start: NaiveDate,
        end: NaiveDate,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        ensure_writable(path, force)?;

        if summary.rows.is_empty() {
            warning("No sales found for the selected range.");
        }

        let report = ReportExport::from_summary(summary, start, end);

        match format {
            ExportFormat::Csv => export_csv(&report, path)?,
            ExportFormat::Json => export_json(&report, path)?,
        }

        audit_or_warn(
            &pool.conn,
            "export",
            format.as_str(),
            &format!("{} sales exported to {}", report.rows.len(), path.display()),
        );

        Ok(())
    }
}
