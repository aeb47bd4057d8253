//! `premise` — reconcile customer-location feeds into one deduplicated
//! table per sales channel, plus a dupe ledger for audit.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use premise_io::{report, sources};
use premise_recon::model::{Channel, Contribution, ReconResult};
use premise_recon::{engine, ReconConfig, ReconError};

// Exit codes (clap reports usage errors as 2 on its own).
pub const EXIT_INVALID_CONFIG: u8 = 3;
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Parser)]
#[command(name = "premise")]
#[command(about = "Customer-location reconciliation across Gallo, Spectra, and WW feeds")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run reconciliation from a TOML config file
    #[command(after_help = "\
Examples:
  premise run premise.toml
  premise run premise.toml --json
  premise run premise.toml --output report.json")]
    Run {
        /// Path to the config file
        config: PathBuf,

        /// Print a JSON run report to stdout instead of only the summary
        #[arg(long)]
        json: bool,

        /// Write the JSON run report to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a config file without running
    Validate {
        /// Path to the config file
        config: PathBuf,
    },
}

#[derive(Debug)]
struct CliError {
    code: u8,
    message: String,
}

fn cli_err(code: u8, message: impl Into<String>) -> CliError {
    CliError {
        code,
        message: message.into(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { config, json, output } => cmd_run(&config, json, output.as_deref()),
        Commands::Validate { config } => cmd_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.message);
            ExitCode::from(e.code)
        }
    }
}

fn cmd_validate(config_path: &Path) -> Result<(), CliError> {
    load_config(config_path)?;
    eprintln!("{} is valid", config_path.display());
    Ok(())
}

fn cmd_run(
    config_path: &Path,
    json_output: bool,
    output_file: Option<&Path>,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    // Paths in the config resolve relative to the config file's directory.
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let input_dir = base_dir.join(&config.paths.input_dir);
    let output_dir = base_dir.join(&config.paths.output_dir);

    let input = load_sources(&config, &input_dir)?;
    let result = engine::run(&config, &input);

    // Fail-fast contract holds: nothing above writes output, so a load
    // error leaves no partial files behind.
    write_reports(&result, &output_dir)?;

    for channel in &result.channels {
        let s = &channel.summary;
        eprintln!(
            "{}: {} keys in {} partitions -> {} canonical records, {} ledgered duplicates",
            s.channel, s.input_keys, s.partitions, s.clusters, s.duplicates
        );
    }

    if json_output || output_file.is_some() {
        let json_str = serde_json::to_string_pretty(&result.report())
            .map_err(|e| cli_err(EXIT_RUNTIME, format!("JSON serialization error: {e}")))?;
        if let Some(path) = output_file {
            std::fs::write(path, &json_str)
                .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot write report: {e}")))?;
            eprintln!("wrote {}", path.display());
        }
        if json_output {
            println!("{json_str}");
        }
    }

    Ok(())
}

fn load_config(config_path: &Path) -> Result<ReconConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot read config: {e}")))?;
    ReconConfig::from_toml(&config_str).map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))
}

/// Read all five feeds and convert them to engine contributions.
fn load_sources(
    config: &ReconConfig,
    input_dir: &Path,
) -> Result<engine::ReconInput, CliError> {
    let sources = &config.sources;
    let mut contributions = Vec::new();

    let mut load = |file: &str,
                    loader: &dyn Fn(&str, &str) -> Result<Vec<Contribution>, ReconError>|
     -> Result<(), CliError> {
        let path = input_dir.join(file);
        let csv_data = std::fs::read_to_string(&path)
            .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot read {}: {e}", path.display())))?;
        contributions.extend(
            loader(file, &csv_data).map_err(|e| cli_err(EXIT_RUNTIME, e.to_string()))?,
        );
        Ok(())
    };

    let state = sources.ww_state.clone();
    load(&sources.gallo_on, &|f, d| {
        sources::load_gallo(f, d, Channel::OnPremise)
    })?;
    load(&sources.spectra_on, &|f, d| {
        sources::load_spectra(f, d, Channel::OnPremise)
    })?;
    load(&sources.spectra_off, &|f, d| {
        sources::load_spectra(f, d, Channel::OffPremise)
    })?;
    load(&sources.ww_on, &|f, d| {
        sources::load_ww(f, d, Channel::OnPremise, &state)
    })?;
    load(&sources.ww_off, &|f, d| {
        sources::load_ww(f, d, Channel::OffPremise, &state)
    })?;

    Ok(engine::ReconInput { contributions })
}

fn write_reports(result: &ReconResult, output_dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot create output dir: {e}")))?;

    for channel in &result.channels {
        let table_path = output_dir.join(format!("{}.csv", channel.channel));
        report::write_channel(&table_path, channel)
            .map_err(|e| cli_err(EXIT_RUNTIME, e.to_string()))?;

        let dupes_path = output_dir.join(format!("{}-dupes.csv", channel.channel));
        report::write_dupes(&dupes_path, channel)
            .map_err(|e| cli_err(EXIT_RUNTIME, e.to_string()))?;
    }
    Ok(())
}
