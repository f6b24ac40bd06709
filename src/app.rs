//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - loads the model + scalers (fatal on failure)
//! - runs the estimate
//! - prints tables/charts or hands over to the TUI
//! - writes the optional JSON export

use clap::Parser;

use crate::cli::{ArtifactArgs, Command, EstimateArgs, TuiArgs};
use crate::error::AppError;
use crate::models::LoadedArtifacts;

pub mod pipeline;

/// Entry point for the `roadcost` binary.
pub fn run() -> Result<(), AppError> {
    crate::config::load_dotenv();

    // We want `roadcost` and `roadcost -y 2030` to behave like `roadcost tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Estimate(args) => {
            crate::logging::init_stderr();
            handle_estimate(args)
        }
        Command::Artifacts(args) => {
            crate::logging::init_stderr();
            handle_artifacts(args)
        }
        Command::Tui(args) => {
            crate::logging::init_tui()?;
            handle_tui(args)
        }
    }
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let estimator = LoadedArtifacts::load(&args.artifacts)?.into_estimator();
    let run = pipeline::run_estimate(&estimator, &args.input.to_input());

    println!("{}", crate::report::format_estimate_table(&run.report));

    if !args.no_chart {
        println!(
            "{}",
            crate::plot::render_unit_price_chart(&run.report.unit_prices, args.chart_width)
        );
        println!(
            "{}",
            crate::plot::render_cost_share_chart(&run.report.line_costs, args.chart_width)
        );
    }

    if let Some(path) = &args.export_json {
        crate::io::write_report_json(path, &run.report)?;
    }

    Ok(())
}

fn handle_artifacts(args: ArtifactArgs) -> Result<(), AppError> {
    let artifacts = LoadedArtifacts::load(&args.artifacts)?;
    print!("{}", artifacts.describe(&args.artifacts));
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    // Artifacts load before the terminal switches to raw mode so a load
    // failure prints like any other fatal error.
    let estimator = LoadedArtifacts::load(&args.artifacts)?.into_estimator();
    crate::tui::run(estimator, args.input.to_input(), args.export_json)
}

/// Rewrite argv so `roadcost` defaults to `roadcost tui`.
///
/// Rules:
/// - `roadcost`                      -> `roadcost tui`
/// - `roadcost -y 2030 ...`          -> `roadcost tui -y 2030 ...`
/// - `roadcost --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "estimate" | "artifacts" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
