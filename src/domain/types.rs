//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during estimation
//! - exported to JSON for an external renderer
//! - shown in the CLI tables and the TUI form

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Accepted year range at the input boundary.
pub const YEAR_RANGE: RangeInclusive<i32> = 2017..=2100;

/// Accepted tax rate range (whole percent) at the input boundary.
pub const TAX_RATE_RANGE: RangeInclusive<u8> = 0..=20;

/// Number of entries in the work-item catalog.
pub const CATALOG_LEN: usize = WorkItemType::ALL.len();

/// Length of the model feature vector: normalized year + one-hot work item.
pub const FEATURE_LEN: usize = 1 + CATALOG_LEN;

/// Road-construction work item.
///
/// The declaration order is the catalog order: it fixes the one-hot encoding,
/// the iteration order of an estimate, and the row order of every table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkItemType {
    /// Lapis Pondasi Agregat (aggregate base course).
    #[serde(rename = "LPA")]
    Lpa,
    /// Hard sealing (asphalt spray), priced per litre.
    #[serde(rename = "Pelaburan Keras")]
    PelaburanKeras,
    /// Burda surface treatment.
    #[serde(rename = "Burda")]
    Burda,
    /// Manually laid sand sheet.
    #[serde(rename = "Latasir Manual")]
    LatasirManual,
}

impl WorkItemType {
    /// The full catalog, in catalog order.
    pub const ALL: [WorkItemType; 4] = [
        WorkItemType::Lpa,
        WorkItemType::PelaburanKeras,
        WorkItemType::Burda,
        WorkItemType::LatasirManual,
    ];

    /// Label used in tables, charts and exports.
    pub fn label(self) -> &'static str {
        match self {
            WorkItemType::Lpa => "LPA",
            WorkItemType::PelaburanKeras => "Pelaburan Keras",
            WorkItemType::Burda => "Burda",
            WorkItemType::LatasirManual => "Latasir Manual",
        }
    }

    /// Position in the catalog (and in the one-hot block of the features).
    pub fn catalog_index(self) -> usize {
        match self {
            WorkItemType::Lpa => 0,
            WorkItemType::PelaburanKeras => 1,
            WorkItemType::Burda => 2,
            WorkItemType::LatasirManual => 3,
        }
    }

    /// Parse a catalog label (case-insensitive). Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|item| item.label().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for WorkItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unit of measure for a work item's volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "m²")]
    SquareMeter,
    #[serde(rename = "m³")]
    CubicMeter,
    #[serde(rename = "ltr")]
    Liter,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::SquareMeter => "m²",
            Unit::CubicMeter => "m³",
            Unit::Liter => "ltr",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One estimation request.
///
/// Values are expected to be inside [`YEAR_RANGE`], [`TAX_RATE_RANGE`] and
/// non-negative for the dimensions; the CLI and TUI enforce that before the
/// input reaches the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationInput {
    pub year: i32,
    /// Road length in meters.
    pub length: f64,
    /// Road width in meters.
    pub width: f64,
    /// Layer thickness in meters.
    pub thickness: f64,
    pub tax_rate_percent: u8,
}

impl Default for EstimationInput {
    fn default() -> Self {
        Self {
            year: 2026,
            length: 100.0,
            width: 3.0,
            thickness: 0.1,
            tax_rate_percent: 11,
        }
    }
}

impl EstimationInput {
    /// Pull every field into its accepted range.
    ///
    /// Non-finite dimensions become `0.0`.
    pub fn clamped(self) -> Self {
        let dim = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            year: self.year.clamp(*YEAR_RANGE.start(), *YEAR_RANGE.end()),
            length: dim(self.length),
            width: dim(self.width),
            thickness: dim(self.thickness),
            tax_rate_percent: self
                .tax_rate_percent
                .clamp(*TAX_RATE_RANGE.start(), *TAX_RATE_RANGE.end()),
        }
    }
}

/// Model input: `[normalized_year, one_hot(work_item)...]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_LEN]);

impl FeatureVector {
    /// Build the features for one work item.
    pub fn new(normalized_year: f64, item: WorkItemType) -> Self {
        let mut values = [0.0; FEATURE_LEN];
        values[0] = normalized_year;
        values[1 + item.catalog_index()] = 1.0;
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Priced quantity for one work item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineResult {
    pub work_item: WorkItemType,
    /// Currency per unit of measure.
    pub unit_price: f64,
    pub unit: Unit,
    pub volume: f64,
    /// `unit_price * volume`.
    pub line_cost: f64,
}

/// Totals for one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationSummary {
    /// One line per work item, catalog order.
    pub lines: Vec<LineResult>,
    pub tax_rate_percent: u8,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total_with_tax: f64,
    /// Billing total: `ceil(total_with_tax / 100) * 100 - 100`.
    pub rounded_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_matches_indices() {
        for (i, item) in WorkItemType::ALL.iter().enumerate() {
            assert_eq!(item.catalog_index(), i);
        }
        assert_eq!(FEATURE_LEN, 5);
    }

    #[test]
    fn feature_vector_is_one_hot() {
        let fv = FeatureVector::new(0.25, WorkItemType::Burda);
        assert_eq!(fv.0, [0.25, 0.0, 0.0, 1.0, 0.0]);
        let fv = FeatureVector::new(-1.0, WorkItemType::Lpa);
        assert_eq!(fv.0, [-1.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn labels_round_trip_and_reject_unknown() {
        for item in WorkItemType::ALL {
            assert_eq!(WorkItemType::from_label(item.label()), Some(item));
        }
        assert_eq!(
            WorkItemType::from_label(" latasir manual "),
            Some(WorkItemType::LatasirManual)
        );
        assert_eq!(WorkItemType::from_label("Aspal Hotmix"), None);
    }

    #[test]
    fn clamped_pulls_fields_into_range() {
        let input = EstimationInput {
            year: 1999,
            length: -5.0,
            width: f64::NAN,
            thickness: 0.2,
            tax_rate_percent: 35,
        }
        .clamped();
        assert_eq!(input.year, 2017);
        assert_eq!(input.length, 0.0);
        assert_eq!(input.width, 0.0);
        assert_eq!(input.thickness, 0.2);
        assert_eq!(input.tax_rate_percent, 20);
    }

    #[test]
    fn default_matches_form_defaults() {
        let input = EstimationInput::default();
        assert_eq!(input, input.clamped());
        assert_eq!(input.year, 2026);
        assert_eq!(input.tax_rate_percent, 11);
    }
}
