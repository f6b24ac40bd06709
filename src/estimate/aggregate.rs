//! Cost aggregation: subtotal, tax, total and the billing round-off.

use crate::domain::{EstimationSummary, LineResult};

/// Round a total up to the next multiple of 100, then subtract 100.
///
/// An exact multiple of 100 still loses 100 (`10_000.00 -> 9_900.00`).
pub fn round_billing_total(total_with_tax: f64) -> f64 {
    (total_with_tax / 100.0).ceil() * 100.0 - 100.0
}

/// Build the summary for an ordered set of priced lines.
pub fn aggregate(lines: Vec<LineResult>, tax_rate_percent: u8) -> EstimationSummary {
    let subtotal: f64 = lines.iter().map(|l| l.line_cost).sum();
    let tax_amount = subtotal * (f64::from(tax_rate_percent) / 100.0);
    let total_with_tax = subtotal + tax_amount;

    EstimationSummary {
        lines,
        tax_rate_percent,
        subtotal,
        tax_amount,
        total_with_tax,
        rounded_total: round_billing_total(total_with_tax),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Unit, WorkItemType};

    fn line(item: WorkItemType, line_cost: f64) -> LineResult {
        LineResult {
            work_item: item,
            unit_price: line_cost,
            unit: Unit::SquareMeter,
            volume: 1.0,
            line_cost,
        }
    }

    #[test]
    fn rounding_boundaries() {
        assert_eq!(round_billing_total(10_000.00), 9_900.0);
        assert_eq!(round_billing_total(10_000.01), 10_000.0);
        assert_eq!(round_billing_total(10_050.0), 10_000.0);
        assert_eq!(round_billing_total(10_099.99), 10_000.0);
        assert_eq!(round_billing_total(0.0), -100.0);
    }

    #[test]
    fn rounded_plus_100_is_smallest_multiple_not_below_total() {
        for &total in &[1.0, 99.99, 100.0, 12_345.67, 1_110_000.0, 987_654_321.01] {
            let next = round_billing_total(total) + 100.0;
            assert_eq!(next % 100.0, 0.0, "total={total}");
            assert!(next >= total, "total={total}");
            assert!(next - 100.0 < total, "total={total}");
        }
    }

    #[test]
    fn tax_at_eleven_percent() {
        let summary = aggregate(vec![line(WorkItemType::Lpa, 1_000_000.0)], 11);
        assert!((summary.tax_amount - 110_000.0).abs() < 1e-6);
        assert!((summary.total_with_tax - 1_110_000.0).abs() < 1e-6);
        assert_eq!(summary.tax_rate_percent, 11);
    }

    #[test]
    fn zero_tax_keeps_subtotal_exactly() {
        let summary = aggregate(
            vec![line(WorkItemType::Lpa, 1234.5), line(WorkItemType::Burda, 0.25)],
            0,
        );
        assert_eq!(summary.tax_amount, 0.0);
        assert_eq!(summary.total_with_tax, summary.subtotal);
        assert_eq!(summary.subtotal, 1234.75);
    }

    #[test]
    fn subtotal_ignores_order_and_lines_keep_theirs() {
        let lines = vec![
            line(WorkItemType::Lpa, 300.5),
            line(WorkItemType::PelaburanKeras, 12.25),
            line(WorkItemType::Burda, 4000.0),
            line(WorkItemType::LatasirManual, 7.75),
        ];
        let mut reversed = lines.clone();
        reversed.reverse();

        let a = aggregate(lines.clone(), 10);
        let b = aggregate(reversed, 10);
        assert!((a.subtotal - b.subtotal).abs() < 1e-9);
        assert_eq!(a.lines, lines);
    }

    #[test]
    fn negative_costs_pass_through() {
        let summary = aggregate(vec![line(WorkItemType::Burda, -500.0)], 10);
        assert!((summary.total_with_tax - -550.0).abs() < 1e-9);
        assert_eq!(summary.rounded_total, -600.0);
    }
}
