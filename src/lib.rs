//! Taxonomer - resolve classifier score vectors against a taxonomy.
//!
//! Leaf-level scores from an image or audio classifier are summed up a
//! taxonomy tree, then resolved to the most specific taxon whose aggregated
//! score clears a confidence threshold.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod loader;
pub mod output;
pub mod taxonomy;

use clap::Parser;
use cli::{Cli, Command, ResolveArgs};
use config::{Config, config_file_path, load_default_config, save_default_config, validate_config};
use inference::{ClassifierSettings, FilterMode, TaxonClassifier, TaxonFilter};
use loader::{load_taxonomy, read_scores};
use output::{ClassifiedInput, create_writer};
use taxonomy::TaxonomyIndex;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub use error::{Error, Result};

/// Main entry point for the taxonomer CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.resolve.verbose, cli.resolve.quiet);

    let config = load_default_config()?;
    validate_config(&config)?;

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    if cli.inputs.is_empty() {
        cli::help::print_smart_help(&config);
        return Ok(());
    }

    resolve_files(&cli.inputs, &cli.resolve, &config)
}

/// Resolve every score file against one taxonomy and write the results.
fn resolve_files(inputs: &[PathBuf], args: &ResolveArgs, config: &Config) -> Result<()> {
    let taxonomy_path = args
        .taxonomy
        .clone()
        .or_else(|| config.defaults.taxonomy.clone())
        .ok_or(Error::TaxonomyNotSpecified)?;

    let settings = resolve_settings(args, config);
    let format = args.format.unwrap_or(config.defaults.format);

    let index = load_taxonomy(&taxonomy_path)?;
    let classifier = TaxonClassifier::new(index, settings)?;

    let mut writer = create_writer(format, args.output.as_deref(), &taxonomy_path)?;
    writer.write_header()?;

    let mut failed = 0usize;
    for path in inputs {
        match classify_file(&classifier, path) {
            Ok(result) => writer.write_result(&result)?,
            Err(e) => {
                error!("Failed to resolve {}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    writer.finalize()?;

    info!(
        "Complete: {} resolved, {} errors",
        inputs.len() - failed,
        failed
    );

    if failed > 0 {
        return Err(Error::InputsFailed {
            failed,
            total: inputs.len(),
        });
    }
    Ok(())
}

/// Merge CLI flags over config defaults.
fn resolve_settings(args: &ResolveArgs, config: &Config) -> ClassifierSettings {
    let filter = match (args.filter_taxon, args.negative_filter) {
        (Some(taxon_id), _) => Some(TaxonFilter {
            taxon_id,
            mode: FilterMode::Include,
        }),
        (None, Some(taxon_id)) => Some(TaxonFilter {
            taxon_id,
            mode: FilterMode::Exclude,
        }),
        (None, None) => config.filter,
    };

    ClassifierSettings {
        threshold: args
            .threshold
            .unwrap_or(config.defaults.confidence_threshold),
        top_k: args.top_k.unwrap_or(config.defaults.top_k),
        filter,
    }
}

fn classify_file(classifier: &TaxonClassifier, path: &Path) -> Result<ClassifiedInput> {
    let scores = read_scores(path)?;
    debug!("Read {} scores from {}", scores.len(), path.display());

    let classification = classifier.classify(&scores)?;
    Ok(ClassifiedInput {
        source: path.to_path_buf(),
        threshold: classifier.settings().threshold,
        classification,
    })
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Results go to stdout, so logs stay on stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Inspect { taxonomy } => handle_inspect_command(&taxonomy),
        Command::Config { action } => handle_config_command(action),
    }
}

#[allow(clippy::print_stdout)]
fn handle_inspect_command(path: &Path) -> Result<()> {
    let index = load_taxonomy(path)?;
    let root = index.root_node();

    println!("Taxonomy: {}", path.display());
    println!("  root:   {} [{}]", root.name(), root.taxon_id());
    println!("  taxa:   {}", index.len());
    println!("  leaves: {}", index.leaf_count());
    println!("  depth:  {}", index.depth());

    println!("  taxa per rank:");
    for (rank, count) in rank_counts(&index) {
        println!("    {rank:>5}: {count}");
    }

    Ok(())
}

/// Number of taxa at each rank level, highest rank first.
fn rank_counts(index: &TaxonomyIndex) -> Vec<(f32, usize)> {
    let mut counts: Vec<(f32, usize)> = Vec::new();
    for (_, node) in index.iter() {
        match counts.iter_mut().find(|(rank, _)| rank.total_cmp(&node.rank()).is_eq()) {
            Some((_, count)) => *count += 1,
            None => counts.push((node.rank(), 1)),
        }
    }
    counts.sort_by(|a, b| b.0.total_cmp(&a.0));
    counts
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config::default();
                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!("  set defaults.taxonomy to your taxonomy file");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            let rendered =
                toml::to_string_pretty(&config).map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{rendered}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
