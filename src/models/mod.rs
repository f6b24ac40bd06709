//! Price model and scaler collaborators.
//!
//! The estimator only sees the three traits below; concrete artifacts live in:
//! - `network`: dense feed-forward price model (nalgebra)
//! - `scaler`: min-max / standard scalers for year and price
//! - `artifacts`: loading + validation of the JSON files

pub mod artifacts;
pub mod network;
pub mod scaler;

pub use artifacts::*;
pub use network::*;
pub use scaler::*;

use crate::domain::FeatureVector;

/// Maps a feature vector to a normalized unit price.
pub trait PriceModel {
    fn predict(&self, features: &FeatureVector) -> f64;
}

/// Forward transform applied to the raw year before it enters the model.
pub trait YearNormalizer {
    fn normalize_year(&self, year: i32) -> f64;
}

/// Inverse transform turning a raw model output into a currency amount.
pub trait PriceDenormalizer {
    fn denormalize_price(&self, normalized: f64) -> f64;
}
