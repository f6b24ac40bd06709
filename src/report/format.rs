//! Number formatting and the terminal estimate table.

use crate::report::{CURRENCY_MARKER, EstimateReport};

/// `Rp 1,234,567.89`
pub fn fmt_currency(v: f64) -> String {
    format!("{CURRENCY_MARKER} {}", fmt_thousands(v, 2))
}

/// Volumes: thousands separators, 2 decimals.
pub fn fmt_quantity(v: f64) -> String {
    fmt_thousands(v, 2)
}

/// Fixed-point with `,` grouping of the integer part.
///
/// Non-finite values are printed as-is (`NaN`, `inf`, `-inf`).
pub fn fmt_thousands(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let raw = format!("{v:.decimals$}");
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Format the estimate table plus summary rows for terminal output.
pub fn format_estimate_table(report: &EstimateReport) -> String {
    let mut out = String::new();

    let input = &report.input;
    out.push_str("=== roadcost - Road Works Unit Price & Cost Estimate ===\n");
    out.push_str(&format!(
        "Year: {} | Road: {} m x {} m x {} m | Tax: {}%\n\n",
        input.year,
        fmt_quantity(input.length),
        fmt_quantity(input.width),
        fmt_quantity(input.thickness),
        input.tax_rate_percent,
    ));

    let w_item = column_width("Work item", report.rows.iter().map(|r| r.work_item.as_str()));
    let w_unit = column_width("Unit", report.rows.iter().map(|r| r.unit.as_str()));
    let w_vol = column_width("Volume", report.rows.iter().map(|r| r.volume.as_str()));
    let w_price = column_width(
        "Unit price",
        report
            .rows
            .iter()
            .map(|r| r.unit_price.as_str())
            .chain(report.summary.iter().map(|s| s.label.as_str())),
    );
    let w_cost = column_width(
        "Line cost",
        report
            .rows
            .iter()
            .map(|r| r.line_cost.as_str())
            .chain(report.summary.iter().map(|s| s.amount.as_str())),
    );

    let line = |a: &str, b: &str, c: &str, d: &str, e: &str| {
        format!(
            "{} {} {} {} {}",
            pad_right(a, w_item),
            pad_right(b, w_unit),
            pad_left(c, w_vol),
            pad_left(d, w_price),
            pad_left(e, w_cost),
        )
        .trim_end()
        .to_string()
    };

    out.push_str(&line("Work item", "Unit", "Volume", "Unit price", "Line cost"));
    out.push('\n');
    out.push_str(&line(
        &"-".repeat(w_item),
        &"-".repeat(w_unit),
        &"-".repeat(w_vol),
        &"-".repeat(w_price),
        &"-".repeat(w_cost),
    ));
    out.push('\n');

    for r in &report.rows {
        out.push_str(&line(&r.work_item, &r.unit, &r.volume, &r.unit_price, &r.line_cost));
        out.push('\n');
    }
    out.push('\n');
    for s in &report.summary {
        out.push_str(&line("", "", "", &s.label, &s.amount));
        out.push('\n');
    }

    out
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(display_width)
        .chain(std::iter::once(display_width(header)))
        .max()
        .unwrap_or(0)
}

/// Character count (units like `m²` are multi-byte but one column wide).
fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{s}{}", " ".repeat(pad))
}

fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{}{s}", " ".repeat(pad))
}
