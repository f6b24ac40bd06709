//! Runtime configuration: where the model artifacts live.
//!
//! Paths come from CLI flags, which fall back to environment variables (a `.env`
//! file is honoured via `dotenvy`), which fall back to the bundled `artifacts/`.

use std::path::PathBuf;

use clap::Args;

pub const ENV_MODEL: &str = "ROADCOST_MODEL";
pub const ENV_YEAR_SCALER: &str = "ROADCOST_YEAR_SCALER";
pub const ENV_PRICE_SCALER: &str = "ROADCOST_PRICE_SCALER";
pub const ENV_LOG_FILE: &str = "ROADCOST_LOG_FILE";

pub const DEFAULT_MODEL: &str = "artifacts/price_model.json";
pub const DEFAULT_YEAR_SCALER: &str = "artifacts/scaler_year.json";
pub const DEFAULT_PRICE_SCALER: &str = "artifacts/scaler_price.json";

/// Locations of the three artifacts loaded at startup.
#[derive(Debug, Clone, Args)]
pub struct ArtifactPaths {
    /// Price model JSON (dense network weights).
    #[arg(long = "model", env = ENV_MODEL, default_value = DEFAULT_MODEL, value_name = "JSON")]
    pub model: PathBuf,

    /// Year scaler JSON (forward transform).
    #[arg(long, env = ENV_YEAR_SCALER, default_value = DEFAULT_YEAR_SCALER, value_name = "JSON")]
    pub year_scaler: PathBuf,

    /// Price scaler JSON (inverse transform).
    #[arg(long, env = ENV_PRICE_SCALER, default_value = DEFAULT_PRICE_SCALER, value_name = "JSON")]
    pub price_scaler: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_MODEL),
            year_scaler: PathBuf::from(DEFAULT_YEAR_SCALER),
            price_scaler: PathBuf::from(DEFAULT_PRICE_SCALER),
        }
    }
}

impl ArtifactPaths {
    /// Resolve every path against `root` (relative paths only).
    pub fn rooted_at(&self, root: &std::path::Path) -> Self {
        let join = |p: &PathBuf| if p.is_absolute() { p.clone() } else { root.join(p) };
        Self {
            model: join(&self.model),
            year_scaler: join(&self.year_scaler),
            price_scaler: join(&self.price_scaler),
        }
    }
}

/// Load `.env` (if present) so clap's `env` fallbacks can see it.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}
