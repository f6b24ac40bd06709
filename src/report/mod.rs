//! Presentation adapter: turns an `EstimationSummary` into display rows and
//! chart series.
//!
//! We keep formatting code in one place so:
//! - the estimation code stays numeric and testable
//! - the CLI, the TUI and the JSON export show exactly the same strings

use serde::Serialize;

use crate::domain::{EstimationInput, EstimationSummary};

pub mod format;

pub use format::*;

/// Currency marker prefixed to every money amount.
pub const CURRENCY_MARKER: &str = "Rp";

/// One row of the estimate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub work_item: String,
    pub unit: String,
    pub volume: String,
    pub unit_price: String,
    pub line_cost: String,
}

/// A labelled money row below the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub amount: String,
}

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
    /// Share of the series total in percent (0 when the total is 0).
    pub share_percent: f64,
}

/// Everything a renderer needs for one estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    pub input: EstimationInput,
    pub rows: Vec<TableRow>,
    /// Subtotal, tax, total after tax, rounded (in that order).
    pub summary: Vec<SummaryRow>,
    pub unit_prices: Vec<SeriesPoint>,
    pub line_costs: Vec<SeriesPoint>,
}

impl EstimateReport {
    pub fn build(input: &EstimationInput, summary: &EstimationSummary) -> Self {
        let rows = summary
            .lines
            .iter()
            .map(|l| TableRow {
                work_item: l.work_item.label().to_string(),
                unit: l.unit.symbol().to_string(),
                volume: fmt_quantity(l.volume),
                unit_price: fmt_currency(l.unit_price),
                line_cost: fmt_currency(l.line_cost),
            })
            .collect();

        let summary_rows = summary_rows(summary)
            .into_iter()
            .map(|(label, amount)| SummaryRow {
                label,
                amount: fmt_currency(amount),
            })
            .collect();

        let unit_prices = series(
            summary
                .lines
                .iter()
                .map(|l| (l.work_item.label(), l.unit_price)),
        );
        let line_costs = series(
            summary
                .lines
                .iter()
                .map(|l| (l.work_item.label(), l.line_cost)),
        );

        Self {
            input: *input,
            rows,
            summary: summary_rows,
            unit_prices,
            line_costs,
        }
    }
}

/// The four summary rows as `(label, amount)` pairs.
pub fn summary_rows(summary: &EstimationSummary) -> Vec<(String, f64)> {
    vec![
        ("Subtotal".to_string(), summary.subtotal),
        (format!("Tax ({}%)", summary.tax_rate_percent), summary.tax_amount),
        ("Total after tax".to_string(), summary.total_with_tax),
        ("Rounded".to_string(), summary.rounded_total),
    ]
}

fn series<'a>(values: impl Iterator<Item = (&'a str, f64)>) -> Vec<SeriesPoint> {
    let values: Vec<(&str, f64)> = values.collect();
    let total: f64 = values.iter().map(|(_, v)| v).sum();
    values
        .into_iter()
        .map(|(label, value)| SeriesPoint {
            label: label.to_string(),
            value,
            share_percent: if total != 0.0 && total.is_finite() {
                value / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineResult, Unit, WorkItemType};
    use crate::estimate::aggregate;

    fn sample_summary() -> EstimationSummary {
        let lines = vec![
            LineResult {
                work_item: WorkItemType::Lpa,
                unit_price: 450_000.0,
                unit: Unit::CubicMeter,
                volume: 30.0,
                line_cost: 13_500_000.0,
            },
            LineResult {
                work_item: WorkItemType::PelaburanKeras,
                unit_price: 25_000.0,
                unit: Unit::Liter,
                volume: 750.0,
                line_cost: 18_750_000.0,
            },
            LineResult {
                work_item: WorkItemType::Burda,
                unit_price: 60_000.0,
                unit: Unit::SquareMeter,
                volume: 300.0,
                line_cost: 18_000_000.0,
            },
            LineResult {
                work_item: WorkItemType::LatasirManual,
                unit_price: 0.0,
                unit: Unit::SquareMeter,
                volume: 300.0,
                line_cost: 0.0,
            },
        ];
        aggregate(lines, 11)
    }

    #[test]
    fn rows_keep_catalog_order_and_format() {
        let report = EstimateReport::build(&EstimationInput::default(), &sample_summary());
        let names: Vec<&str> = report.rows.iter().map(|r| r.work_item.as_str()).collect();
        assert_eq!(names, ["LPA", "Pelaburan Keras", "Burda", "Latasir Manual"]);

        assert_eq!(report.rows[0].unit, "m³");
        assert_eq!(report.rows[0].volume, "30.00");
        assert_eq!(report.rows[0].unit_price, "Rp 450,000.00");
        assert_eq!(report.rows[1].line_cost, "Rp 18,750,000.00");
    }

    #[test]
    fn summary_rows_in_fixed_order() {
        let report = EstimateReport::build(&EstimationInput::default(), &sample_summary());
        let labels: Vec<&str> = report.summary.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Subtotal", "Tax (11%)", "Total after tax", "Rounded"]);
        assert_eq!(report.summary[0].amount, "Rp 50,250,000.00");
        assert_eq!(report.summary[2].amount, "Rp 55,777,500.00");
        assert_eq!(report.summary[3].amount, "Rp 55,777,400.00");
    }

    #[test]
    fn cost_shares_sum_to_100() {
        let report = EstimateReport::build(&EstimationInput::default(), &sample_summary());
        let total: f64 = report.line_costs.iter().map(|p| p.share_percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(report.line_costs[3].share_percent, 0.0);
        assert_eq!(report.unit_prices[0].label, "LPA");
        assert_eq!(report.unit_prices[0].value, 450_000.0);
    }

    #[test]
    fn zero_total_gives_zero_shares() {
        let summary = aggregate(Vec::new(), 0);
        assert!(series(std::iter::once(("LPA", 0.0))).iter().all(|p| p.share_percent == 0.0));
        assert_eq!(summary_rows(&summary).len(), 4);
    }
}
