//! ASCII charts for terminal output.
//!
//! This is intentionally "dumb" (fixed-width bars), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Charts:
//! - unit price per work item: `#` bars scaled to the largest price
//! - cost proportion: `=` bars scaled to 100% of the subtotal

use crate::report::{SeriesPoint, fmt_currency};

/// Horizontal bar chart of unit prices.
///
/// Negative values get an empty bar (the amount is still printed).
pub fn render_unit_price_chart(points: &[SeriesPoint], width: usize) -> String {
    let width = width.max(10);
    let label_w = label_width(points);
    let max = points
        .iter()
        .map(|p| p.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    let mut out = String::from("Unit price per work item\n");
    for p in points {
        let len = bar_len(p.value, max, width);
        out.push_str(&format!(
            "{:<label_w$} |{:<width$}| {}\n",
            p.label,
            "#".repeat(len),
            fmt_currency(p.value),
        ));
    }
    out
}

/// Horizontal bar chart of each item's share of the total cost.
pub fn render_cost_share_chart(points: &[SeriesPoint], width: usize) -> String {
    let width = width.max(10);
    let label_w = label_width(points);

    let mut out = String::from("Cost proportion per work item\n");
    for p in points {
        let len = bar_len(p.share_percent, 100.0, width);
        out.push_str(&format!(
            "{:<label_w$} |{:<width$}| {:>5.1}%\n",
            p.label,
            "=".repeat(len),
            p.share_percent,
        ));
    }
    out
}

fn label_width(points: &[SeriesPoint]) -> usize {
    points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0)
}

fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if !(value.is_finite() && max.is_finite()) || value <= 0.0 || max <= 0.0 {
        return 0;
    }
    let u = (value / max).clamp(0.0, 1.0);
    (u * width as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, value: f64, share_percent: f64) -> SeriesPoint {
        SeriesPoint {
            label: label.to_string(),
            value,
            share_percent,
        }
    }

    #[test]
    fn unit_price_chart_golden_snapshot() {
        let points = vec![
            point("LPA", 400_000.0, 0.0),
            point("Burda", 100_000.0, 0.0),
            point("Latasir Manual", -5.0, 0.0),
        ];
        let txt = render_unit_price_chart(&points, 10);
        let expected = concat!(
            "Unit price per work item\n",
            "LPA            |##########| Rp 400,000.00\n",
            "Burda          |###       | Rp 100,000.00\n",
            "Latasir Manual |          | Rp -5.00\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn cost_share_chart_golden_snapshot() {
        let points = vec![point("LPA", 0.0, 75.0), point("Burda", 0.0, 25.0)];
        let txt = render_cost_share_chart(&points, 20);
        let expected = concat!(
            "Cost proportion per work item\n",
            "LPA   |===============     |  75.0%\n",
            "Burda |=====               |  25.0%\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn bar_len_guards() {
        assert_eq!(bar_len(f64::NAN, 10.0, 10), 0);
        assert_eq!(bar_len(5.0, 0.0, 10), 0);
        assert_eq!(bar_len(20.0, 10.0, 10), 10);
    }
}
