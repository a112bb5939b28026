mod config;
mod convert;
mod extract;
mod report;

use clap::Parser;
use config::ConvertConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Convert a PSPNet evaluation log into a one-row CSV of segmentation
/// metrics: mean IoU, pixel-wise accuracy, then per-class IoU.
#[derive(Parser, Debug)]
#[command(name = "pspnet-log-to-csv", version, about)]
pub struct Cli {
    /// Input log path
    #[arg(value_name = "LOG_PATH")]
    log_path: Option<PathBuf>,

    /// Output CSV path
    #[arg(value_name = "CSV_PATH")]
    csv_path: Option<PathBuf>,

    /// Extract and print the metrics as JSON, don't write the CSV
    #[arg(long)]
    dry_run: bool,

    /// Extra logging (every matched class line)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?cli, "parsed CLI arguments");

    let config = ConvertConfig::with_overrides(cli.log_path, cli.csv_path);

    let result = if cli.dry_run {
        convert::read_report(&config.log_path).map(|report| {
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::warn!(error = %e, "failed to serialize report"),
            }
            report
        })
    } else {
        convert::convert(&config.log_path, &config.csv_path)
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "conversion failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["pspnet-log-to-csv"]).unwrap();
        let config = ConvertConfig::with_overrides(cli.log_path, cli.csv_path);
        assert_eq!(config, ConvertConfig::default());
    }

    #[test]
    fn test_cli_two_paths() {
        let cli = Cli::try_parse_from(["pspnet-log-to-csv", "eval.log", "out.csv"]).unwrap();
        assert_eq!(cli.log_path, Some(PathBuf::from("eval.log")));
        assert_eq!(cli.csv_path, Some(PathBuf::from("out.csv")));
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_log_level() {
        let cli = Cli::try_parse_from(["pspnet-log-to-csv", "-v"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
        let cli = Cli::try_parse_from(["pspnet-log-to-csv", "--quiet"]).unwrap();
        assert_eq!(cli.log_level(), "warn");
        let cli = Cli::try_parse_from(["pspnet-log-to-csv"]).unwrap();
        assert_eq!(cli.log_level(), "info");
    }

    #[test]
    fn test_cli_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["pspnet-log-to-csv", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_cli_rejects_third_path() {
        assert!(Cli::try_parse_from(["pspnet-log-to-csv", "a.log", "b.csv", "c"]).is_err());
    }
}
