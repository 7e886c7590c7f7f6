//! CLI argument definitions.

use crate::cli::validators::{parse_confidence, parse_top_k};
use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Resolve classifier score vectors to taxa.
#[derive(Debug, Parser)]
#[command(name = "taxonomer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Score vector files to resolve.
    pub inputs: Vec<PathBuf>,

    /// Common options for resolution.
    #[command(flatten)]
    pub resolve: ResolveArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize a taxonomy file.
    Inspect {
        /// Taxonomy file (JSON or CSV).
        taxonomy: PathBuf,
    },
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for resolving score vectors.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Taxonomy file, JSON or CSV (overrides config).
    #[arg(long, env = "TAXONOMER_TAXONOMY")]
    pub taxonomy: Option<PathBuf>,

    /// Confidence threshold for descending the tree (0.0-1.0).
    #[arg(short, long, value_parser = parse_confidence, env = "TAXONOMER_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Number of top leaf predictions to report (1-30).
    #[arg(short = 'k', long, value_parser = parse_top_k, env = "TAXONOMER_TOP_K")]
    pub top_k: Option<usize>,

    /// Keep only leaves beneath this taxon id.
    #[arg(long, conflicts_with = "negative_filter")]
    pub filter_taxon: Option<u64>,

    /// Drop leaves beneath this taxon id.
    #[arg(long, conflicts_with = "filter_taxon")]
    pub negative_filter: Option<u64>,

    /// Output format (json, csv, text).
    #[arg(short, long, env = "TAXONOMER_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_simple() {
        let cli = Cli::try_parse_from(["taxonomer", "scores.json"]).unwrap();
        assert_eq!(cli.inputs.len(), 1);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "taxonomer",
            "scores.txt",
            "--taxonomy",
            "taxonomy.csv",
            "-t",
            "0.85",
            "-k",
            "3",
            "-f",
            "csv",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.resolve.taxonomy, Some(PathBuf::from("taxonomy.csv")));
        assert_eq!(cli.resolve.threshold, Some(0.85));
        assert_eq!(cli.resolve.top_k, Some(3));
        assert_eq!(cli.resolve.format, Some(OutputFormat::Csv));
        assert!(cli.resolve.quiet);
    }

    #[test]
    fn test_cli_rejects_bad_threshold() {
        assert!(Cli::try_parse_from(["taxonomer", "s.txt", "-t", "1.5"]).is_err());
    }

    #[test]
    fn test_cli_filters_conflict() {
        let cli = Cli::try_parse_from([
            "taxonomer",
            "s.txt",
            "--filter-taxon",
            "3",
            "--negative-filter",
            "4",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_inspect() {
        let cli = Cli::try_parse_from(["taxonomer", "inspect", "taxonomy.json"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Inspect { .. })));
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["taxonomer", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_cli_verbosity_count() {
        let cli = Cli::try_parse_from(["taxonomer", "-vv", "s.txt"]).unwrap();
        assert_eq!(cli.resolve.verbose, 2);
    }
}
