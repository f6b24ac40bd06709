//! Estimation engine: prices every catalog item for one request.
//!
//! For each work item, in catalog order:
//! 1) features = [normalize(year)] ++ one_hot(item)
//! 2) normalized price = model(features)
//! 3) unit price = denormalize(normalized price)
//! 4) (volume, unit) from the item's formula
//! 5) line cost = unit price × volume
//!
//! Unit prices are not bounded: whatever the model and scaler produce is used
//! as-is. Non-positive or non-finite prices are logged at `warn`.

use tracing::{debug, warn};

use crate::domain::{EstimationInput, EstimationSummary, FeatureVector, LineResult, WorkItemType};
use crate::estimate::{aggregate, compute_volume};
use crate::models::{PriceDenormalizer, PriceModel, YearNormalizer};

/// Owns the loaded model and scalers for the lifetime of the process.
pub struct Estimator {
    model: Box<dyn PriceModel>,
    normalizer: Box<dyn YearNormalizer>,
    denormalizer: Box<dyn PriceDenormalizer>,
}

impl Estimator {
    pub fn new(
        model: Box<dyn PriceModel>,
        normalizer: Box<dyn YearNormalizer>,
        denormalizer: Box<dyn PriceDenormalizer>,
    ) -> Self {
        Self {
            model,
            normalizer,
            denormalizer,
        }
    }

    /// Predicted unit price for one item in the given year.
    pub fn unit_price(&self, year: i32, item: WorkItemType) -> f64 {
        let features = FeatureVector::new(self.normalizer.normalize_year(year), item);
        let normalized = self.model.predict(&features);
        self.denormalizer.denormalize_price(normalized)
    }

    /// Price every catalog item; one line per item, catalog order.
    pub fn estimate_lines(&self, input: &EstimationInput) -> Vec<LineResult> {
        WorkItemType::ALL
            .into_iter()
            .map(|item| {
                let unit_price = self.unit_price(input.year, item);
                if !(unit_price.is_finite() && unit_price > 0.0) {
                    warn!(item = %item, unit_price, year = input.year, "implausible unit price from model");
                }

                let (volume, unit) = compute_volume(item, input.length, input.width, input.thickness);
                let line_cost = unit_price * volume;
                debug!(item = %item, unit_price, volume, unit = %unit, line_cost, "priced line");

                LineResult {
                    work_item: item,
                    unit_price,
                    unit,
                    volume,
                    line_cost,
                }
            })
            .collect()
    }

    /// Full estimate: priced lines plus totals.
    pub fn estimate(&self, input: &EstimationInput) -> EstimationSummary {
        aggregate(self.estimate_lines(input), input.tax_rate_percent)
    }
}

impl std::fmt::Debug for Estimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Estimator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Unit;

    /// Price = 1000 per catalog position (1-based) plus the normalized year.
    struct PositionModel;

    impl PriceModel for PositionModel {
        fn predict(&self, features: &FeatureVector) -> f64 {
            let f = features.as_slice();
            let pos = f[1..].iter().position(|&v| v == 1.0).unwrap() as f64;
            (pos + 1.0) * 1000.0 + f[0]
        }
    }

    struct YearOffset;

    impl YearNormalizer for YearOffset {
        fn normalize_year(&self, year: i32) -> f64 {
            f64::from(year - 2017)
        }
    }

    struct Identity;

    impl PriceDenormalizer for Identity {
        fn denormalize_price(&self, normalized: f64) -> f64 {
            normalized
        }
    }

    struct Fixed(f64);

    impl PriceModel for Fixed {
        fn predict(&self, _features: &FeatureVector) -> f64 {
            self.0
        }
    }

    struct Doubling;

    impl PriceDenormalizer for Doubling {
        fn denormalize_price(&self, normalized: f64) -> f64 {
            normalized * 2.0
        }
    }

    fn stub_estimator() -> Estimator {
        Estimator::new(Box::new(PositionModel), Box::new(YearOffset), Box::new(Identity))
    }

    fn segment(year: i32, tax: u8) -> EstimationInput {
        EstimationInput {
            year,
            length: 100.0,
            width: 3.0,
            thickness: 0.1,
            tax_rate_percent: tax,
        }
    }

    #[test]
    fn one_line_per_item_in_catalog_order() {
        let summary = stub_estimator().estimate(&segment(2020, 11));
        let items: Vec<_> = summary.lines.iter().map(|l| l.work_item).collect();
        assert_eq!(items, WorkItemType::ALL.to_vec());
    }

    #[test]
    fn features_reach_model_and_prices_are_denormalized() {
        let est = stub_estimator();
        let lines = est.estimate_lines(&segment(2020, 0));

        // LPA is catalog position 0 -> 1000 + (2020 - 2017).
        assert!((lines[0].unit_price - 1003.0).abs() < 1e-9);
        assert!((lines[1].unit_price - 2003.0).abs() < 1e-9);
        assert!((lines[2].unit_price - 3003.0).abs() < 1e-9);
        assert!((lines[3].unit_price - 4003.0).abs() < 1e-9);
    }

    #[test]
    fn volumes_units_and_line_costs() {
        let lines = stub_estimator().estimate_lines(&segment(2017, 0));
        let expected = [
            (30.0, Unit::CubicMeter),
            (750.0, Unit::Liter),
            (300.0, Unit::SquareMeter),
            (300.0, Unit::SquareMeter),
        ];
        for (line, (volume, unit)) in lines.iter().zip(expected) {
            assert!((line.volume - volume).abs() < 1e-9, "{line:?}");
            assert_eq!(line.unit, unit);
            assert!((line.line_cost - line.unit_price * line.volume).abs() < 1e-9);
        }
    }

    #[test]
    fn summary_totals_follow_lines() {
        let summary = stub_estimator().estimate(&segment(2017, 11));
        let sum: f64 = summary.lines.iter().map(|l| l.line_cost).sum();
        assert!((summary.subtotal - sum).abs() < 1e-6);
        assert!((summary.tax_amount - sum * 0.11).abs() < 1e-6);
        assert!((summary.total_with_tax - (summary.subtotal + summary.tax_amount)).abs() < 1e-9);
        // 30k + 1.5M + 900k + 1.2M = 3.63M; * 1.11
        assert!((summary.total_with_tax - 4_029_300.0).abs() < 1e-6);
    }

    #[test]
    fn estimate_is_idempotent() {
        let est = stub_estimator();
        let input = segment(2031, 7);
        assert_eq!(est.estimate(&input), est.estimate(&input));
    }

    #[test]
    fn negative_model_output_is_not_clamped() {
        let est = Estimator::new(Box::new(Fixed(-0.5)), Box::new(YearOffset), Box::new(Doubling));
        let summary = est.estimate(&segment(2025, 0));
        for line in &summary.lines {
            assert_eq!(line.unit_price, -1.0);
            assert!(line.line_cost <= 0.0);
        }
        assert!(summary.subtotal < 0.0);
    }
}
