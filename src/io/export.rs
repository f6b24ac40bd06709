//! Export an estimate report to JSON.
//!
//! The export is a single-run payload meant for an external renderer (charts,
//! spreadsheets). It is not a history store: each call overwrites `path`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::report::EstimateReport;

#[derive(Serialize)]
struct ExportFile<'a> {
    tool: &'static str,
    generated_at: String,
    #[serde(flatten)]
    report: &'a EstimateReport,
}

/// Write the report as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &EstimateReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);

    let payload = ExportFile {
        tool: "roadcost",
        generated_at: Local::now().to_rfc3339(),
        report,
    };

    serde_json::to_writer_pretty(&mut writer, &payload)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    info!(path = %path.display(), "estimate exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EstimationInput, LineResult, Unit, WorkItemType};
    use crate::estimate::aggregate;

    #[test]
    fn export_contains_rows_summary_and_series() {
        let lines = vec![LineResult {
            work_item: WorkItemType::PelaburanKeras,
            unit_price: 20.0,
            unit: Unit::Liter,
            volume: 750.0,
            line_cost: 15_000.0,
        }];
        let input = EstimationInput::default();
        let report = EstimateReport::build(&input, &aggregate(lines, 11));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estimate.json");
        write_report_json(&path, &report).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["tool"], "roadcost");
        assert!(value["generated_at"].as_str().is_some());
        assert_eq!(value["input"]["year"], 2026);
        assert_eq!(value["rows"][0]["work_item"], "Pelaburan Keras");
        assert_eq!(value["rows"][0]["unit"], "ltr");
        assert_eq!(value["summary"][1]["label"], "Tax (11%)");
        assert_eq!(value["line_costs"][0]["share_percent"], 100.0);
        assert_eq!(value["unit_prices"][0]["value"], 20.0);
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("estimate.json");
        let report = EstimateReport::build(&EstimationInput::default(), &aggregate(Vec::new(), 0));
        let err = write_report_json(&path, &report).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
