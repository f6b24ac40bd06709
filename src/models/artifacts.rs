//! Load the price model and both scalers from disk.
//!
//! Loading happens once, before the first estimate. Any failure is returned as an
//! `ArtifactError`; the application treats it as fatal.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::ArtifactPaths;
use crate::error::ArtifactError;
use crate::estimate::Estimator;
use crate::models::{DenseNetwork, Scaler};

/// The three artifacts, validated and ready to be handed to an [`Estimator`].
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub model: DenseNetwork,
    pub year_scaler: Scaler,
    pub price_scaler: Scaler,
}

impl LoadedArtifacts {
    /// Read and validate all artifacts named by `paths`.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let model = DenseNetwork::from_json_str(&read("price model", &paths.model)?)?;
        let year_scaler = Scaler::from_json_str("year scaler", &read("year scaler", &paths.year_scaler)?)?;
        let price_scaler = Scaler::from_json_str("price scaler", &read("price scaler", &paths.price_scaler)?)?;

        info!(
            model = %paths.model.display(),
            layers = model.depth(),
            year_scaler = %year_scaler.describe(),
            price_scaler = %price_scaler.describe(),
            "artifacts loaded"
        );

        Ok(Self {
            model,
            year_scaler,
            price_scaler,
        })
    }

    /// Hand the artifacts to a new estimator.
    pub fn into_estimator(self) -> Estimator {
        Estimator::new(
            Box::new(self.model),
            Box::new(self.year_scaler),
            Box::new(self.price_scaler),
        )
    }

    /// Human-readable description (used by `roadcost artifacts`).
    pub fn describe(&self, paths: &ArtifactPaths) -> String {
        let mut out = String::new();
        out.push_str(&format!("Price model : {}\n", paths.model.display()));
        for (i, (inputs, units, act)) in self.model.layer_shapes().into_iter().enumerate() {
            out.push_str(&format!("  layer {i}: {inputs:>3} -> {units:<3} {act:?}\n"));
        }
        out.push_str(&format!(
            "Year scaler : {} ({})\n",
            paths.year_scaler.display(),
            self.year_scaler.describe()
        ));
        out.push_str(&format!(
            "Price scaler: {} ({})\n",
            paths.price_scaler.display(),
            self.price_scaler.describe()
        ));
        out
    }
}

fn read(what: &'static str, path: &Path) -> Result<String, ArtifactError> {
    fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        what,
        path: path.to_path_buf(),
        source,
    })
}
