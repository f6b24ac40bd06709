//! Scalar feature scalers (year in, price out).
//!
//! Both kinds follow the scikit-learn definitions so parameters exported from a
//! fitted `MinMaxScaler` / `StandardScaler` can be used as-is:
//!
//! - min-max: `x' = (x - data_min) * s + lo`, `s = (hi - lo) / (data_max - data_min)`
//! - standard: `x' = (x - mean) / scale`
//!
//! A zero data range (or zero `scale`) is treated as `1.0`, matching
//! scikit-learn's handling of constant features.

use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;
use crate::models::{PriceDenormalizer, YearNormalizer};

fn default_feature_range() -> [f64; 2] {
    [0.0, 1.0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    MinMax {
        data_min: f64,
        data_max: f64,
        #[serde(default = "default_feature_range")]
        feature_range: [f64; 2],
    },
    Standard {
        mean: f64,
        scale: f64,
    },
}

impl Scaler {
    /// Parse and validate a scaler from its JSON text.
    pub fn from_json_str(what: &'static str, text: &str) -> Result<Self, ArtifactError> {
        let scaler: Scaler =
            serde_json::from_str(text).map_err(|source| ArtifactError::Parse { what, source })?;
        scaler.validate(what)?;
        Ok(scaler)
    }

    fn validate(&self, what: &'static str) -> Result<(), ArtifactError> {
        let fields: Vec<(&str, f64)> = match self {
            Scaler::MinMax {
                data_min,
                data_max,
                feature_range,
            } => vec![
                ("data_min", *data_min),
                ("data_max", *data_max),
                ("feature_range[0]", feature_range[0]),
                ("feature_range[1]", feature_range[1]),
            ],
            Scaler::Standard { mean, scale } => vec![("mean", *mean), ("scale", *scale)],
        };
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ArtifactError::NonFinite {
                what,
                field: field.to_string(),
            });
        }
        if let Scaler::MinMax { feature_range, .. } = self {
            if feature_range[0] >= feature_range[1] {
                return Err(ArtifactError::Shape {
                    what,
                    detail: format!(
                        "feature_range [{}, {}] must be increasing",
                        feature_range[0], feature_range[1]
                    ),
                });
            }
        }
        Ok(())
    }

    /// Forward transform.
    pub fn transform(&self, x: f64) -> f64 {
        match self {
            Scaler::MinMax { .. } => {
                let (scale, min) = self.min_max_coefficients();
                x * scale + min
            }
            Scaler::Standard { mean, scale } => (x - mean) / non_zero(*scale),
        }
    }

    /// Inverse transform.
    pub fn inverse_transform(&self, x: f64) -> f64 {
        match self {
            Scaler::MinMax { .. } => {
                let (scale, min) = self.min_max_coefficients();
                (x - min) / scale
            }
            Scaler::Standard { mean, scale } => x * non_zero(*scale) + mean,
        }
    }

    /// scikit-learn's `scale_` and `min_` for the min-max kind.
    fn min_max_coefficients(&self) -> (f64, f64) {
        match self {
            Scaler::MinMax {
                data_min,
                data_max,
                feature_range,
            } => {
                let [lo, hi] = *feature_range;
                let scale = (hi - lo) / non_zero(data_max - data_min);
                (scale, lo - data_min * scale)
            }
            Scaler::Standard { .. } => (1.0, 0.0),
        }
    }

    /// One-line description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Scaler::MinMax {
                data_min,
                data_max,
                feature_range,
            } => format!(
                "min-max [{data_min}, {data_max}] -> [{}, {}]",
                feature_range[0], feature_range[1]
            ),
            Scaler::Standard { mean, scale } => format!("standard mean={mean} scale={scale}"),
        }
    }
}

fn non_zero(v: f64) -> f64 {
    if v == 0.0 { 1.0 } else { v }
}

impl YearNormalizer for Scaler {
    fn normalize_year(&self, year: i32) -> f64 {
        self.transform(f64::from(year))
    }
}

impl PriceDenormalizer for Scaler {
    fn denormalize_price(&self, normalized: f64) -> f64 {
        self.inverse_transform(normalized)
    }
}
