//! Domain types used throughout the estimator.
//!
//! This module defines:
//!
//! - the closed work-item catalog (`WorkItemType`) and units (`Unit`)
//! - the request (`EstimationInput`) and model features (`FeatureVector`)
//! - estimate outputs (`LineResult`, `EstimationSummary`)

pub mod types;

pub use types::*;
