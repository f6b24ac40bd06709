//! Shared "estimate pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! input -> estimator (model + scalers + volumes) -> totals -> report rows
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{EstimationInput, EstimationSummary};
use crate::estimate::Estimator;
use crate::report::EstimateReport;

/// All computed outputs of a single estimate.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input: EstimationInput,
    pub summary: EstimationSummary,
    pub report: EstimateReport,
}

/// Execute the estimate and build its presentation.
pub fn run_estimate(estimator: &Estimator, input: &EstimationInput) -> RunOutput {
    let summary = estimator.estimate(input);
    let report = EstimateReport::build(input, &summary);
    RunOutput {
        input: *input,
        summary,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureVector;
    use crate::models::{PriceDenormalizer, PriceModel, YearNormalizer};

    struct Flat;

    impl PriceModel for Flat {
        fn predict(&self, _features: &FeatureVector) -> f64 {
            100.0
        }
    }

    impl YearNormalizer for Flat {
        fn normalize_year(&self, _year: i32) -> f64 {
            0.0
        }
    }

    impl PriceDenormalizer for Flat {
        fn denormalize_price(&self, normalized: f64) -> f64 {
            normalized
        }
    }

    #[test]
    fn report_mirrors_summary() {
        let estimator = Estimator::new(Box::new(Flat), Box::new(Flat), Box::new(Flat));
        let run = run_estimate(&estimator, &EstimationInput::default());

        assert_eq!(run.report.rows.len(), run.summary.lines.len());
        assert_eq!(run.report.summary.len(), 4);
        // 100 * (30 + 750 + 300 + 300) = 138,000
        assert_eq!(run.report.summary[0].amount, "Rp 138,000.00");
        assert_eq!(run.report.line_costs.len(), 4);
    }
}
