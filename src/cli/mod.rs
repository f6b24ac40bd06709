//! Command-line parsing for the road works estimator.
//!
//! The goal of this module is to keep **argument parsing** and **input-range
//! enforcement** separate from the estimation code: values that reach the
//! estimator through the CLI are already inside their accepted ranges.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ArtifactPaths;
use crate::domain::{EstimationInput, TAX_RATE_RANGE, YEAR_RANGE};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "roadcost",
    version,
    about = "Road works unit price prediction and project cost estimate"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict unit prices, compute volumes and print the cost estimate.
    Estimate(EstimateArgs),
    /// Load the model and scalers, validate them and describe their shapes.
    Artifacts(ArtifactArgs),
    /// Launch the interactive form.
    Tui(TuiArgs),
}

/// Road dimensions, year and tax rate.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Price year (2017-2100).
    #[arg(short = 'y', long, default_value_t = 2026, value_parser = parse_year)]
    pub year: i32,

    /// Road length in meters.
    #[arg(short = 'l', long, default_value_t = 100.0, value_parser = parse_non_negative)]
    pub length: f64,

    /// Road width in meters.
    #[arg(short = 'w', long, default_value_t = 3.0, value_parser = parse_non_negative)]
    pub width: f64,

    /// Layer thickness in meters.
    #[arg(short = 't', long, default_value_t = 0.1, value_parser = parse_non_negative)]
    pub thickness: f64,

    /// Tax rate in whole percent (0-20).
    #[arg(long = "tax", default_value_t = 11, value_parser = parse_tax_rate)]
    pub tax_rate: u8,
}

impl InputArgs {
    pub fn to_input(&self) -> EstimationInput {
        EstimationInput {
            year: self.year,
            length: self.length,
            width: self.width,
            thickness: self.thickness,
            tax_rate_percent: self.tax_rate,
        }
    }
}

/// Options for `roadcost estimate`.
#[derive(Debug, Clone, Args)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub artifacts: ArtifactPaths,

    /// Disable the terminal charts.
    #[arg(long)]
    pub no_chart: bool,

    /// Chart bar width (columns).
    #[arg(long, default_value_t = 40)]
    pub chart_width: usize,

    /// Export table rows, summary rows and chart series to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for `roadcost artifacts`.
#[derive(Debug, Clone, Args)]
pub struct ArtifactArgs {
    #[command(flatten)]
    pub artifacts: ArtifactPaths,
}

/// Options for `roadcost tui`.
#[derive(Debug, Clone, Args)]
pub struct TuiArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub artifacts: ArtifactPaths,

    /// Where `x` in the TUI writes the JSON export.
    #[arg(long = "export-json", value_name = "JSON", default_value = "roadcost_estimate.json")]
    pub export_json: PathBuf,
}

fn parse_year(s: &str) -> Result<i32, String> {
    let year: i32 = s.trim().parse().map_err(|e| format!("'{s}' is not a year: {e}"))?;
    if !YEAR_RANGE.contains(&year) {
        return Err(format!(
            "year must be in {}..={}",
            YEAR_RANGE.start(),
            YEAR_RANGE.end()
        ));
    }
    Ok(year)
}

fn parse_tax_rate(s: &str) -> Result<u8, String> {
    let rate: u8 = s
        .trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|e| format!("'{s}' is not a whole percent: {e}"))?;
    if !TAX_RATE_RANGE.contains(&rate) {
        return Err(format!(
            "tax rate must be in {}..={}",
            TAX_RATE_RANGE.start(),
            TAX_RATE_RANGE.end()
        ));
    }
    Ok(rate)
}

pub(crate) fn parse_non_negative(s: &str) -> Result<f64, String> {
    let v: f64 = s.trim().parse().map_err(|e| format!("'{s}' is not a number: {e}"))?;
    if !v.is_finite() || v < 0.0 {
        return Err(format!("'{s}' must be a non-negative number"));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_defaults_match_form_defaults() {
        let cli = Cli::try_parse_from(["roadcost", "estimate"]).unwrap();
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(args.input.to_input(), EstimationInput::default());
        assert!(!args.no_chart);
        assert!(args.export_json.is_none());
    }

    #[test]
    fn explicit_inputs() {
        let cli = Cli::try_parse_from([
            "roadcost", "estimate", "-y", "2030", "-l", "250", "-w", "4.5", "-t", "0.15", "--tax", "12%",
        ])
        .unwrap();
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        let input = args.input.to_input();
        assert_eq!(input.year, 2030);
        assert_eq!(input.length, 250.0);
        assert_eq!(input.width, 4.5);
        assert_eq!(input.thickness, 0.15);
        assert_eq!(input.tax_rate_percent, 12);
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        assert!(Cli::try_parse_from(["roadcost", "estimate", "--year", "2016"]).is_err());
        assert!(Cli::try_parse_from(["roadcost", "estimate", "--year", "2101"]).is_err());
        assert!(Cli::try_parse_from(["roadcost", "estimate", "--tax", "21"]).is_err());
        assert!(Cli::try_parse_from(["roadcost", "estimate", "--length=-1"]).is_err());
        assert!(Cli::try_parse_from(["roadcost", "estimate", "--width", "inf"]).is_err());
    }

    #[test]
    fn range_edges_are_accepted() {
        assert_eq!(parse_year("2017"), Ok(2017));
        assert_eq!(parse_year("2100"), Ok(2100));
        assert_eq!(parse_tax_rate("0"), Ok(0));
        assert_eq!(parse_tax_rate("20"), Ok(20));
        assert_eq!(parse_non_negative("0"), Ok(0.0));
    }
}
