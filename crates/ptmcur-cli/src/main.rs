//! ptmcur: PTM curation batches for SIGNOR.
//! `candidates` builds the statement snapshot curators work from;
//! `export` turns their curations into SIGNOR upload rows.

mod config;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ptmcur_export::{run_export, write_csv, CommentParser, ExportJob};
use ptmcur_ingestion::{
    read_snapshot, run_candidates, CandidateJob, CurationClient, CurationFile, CurationSource,
    GeneList, SemanticConstraint,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "ptmcur", version)]
#[command(about = "Build and export PTM curation batches", long_about = None)]
struct Cli {
    /// Config TOML file (uses PTMCUR_CONFIG, then ./ptmcur.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Modification type, e.g. dephosphorylation
    #[arg(long, global = true)]
    mod_key: Option<String>,

    /// Regulation families to pair with (comma-separated: activity,amount)
    #[arg(long, global = true, value_delimiter = ',')]
    regulation_types: Option<Vec<String>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select candidate statements from the corpus and write the snapshot
    Candidates {
        /// Processed statement corpus (.tsv or .tsv.gz)
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
    /// Export curated statements of the snapshot as CSV
    Export {
        /// Curation batch to export
        #[arg(long)]
        curation_source: Option<String>,

        /// Output CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ptmcur=info,warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(mod_key) = cli.mod_key {
        config.run.mod_key = mod_key;
    }
    if let Some(regulation_types) = cli.regulation_types {
        config.run.regulation_types = regulation_types;
    }

    match cli.command {
        Commands::Candidates { corpus } => {
            if let Some(corpus) = corpus {
                config.corpus.path = corpus;
            }
            candidates(&config)
        }
        Commands::Export { curation_source, output } => {
            if curation_source.is_some() {
                config.export.curation_source = curation_source;
            }
            if output.is_some() {
                config.export.output = output;
            }
            export(&config)
        }
    }
}

fn curation_source(config: &Config) -> Box<dyn CurationSource> {
    match &config.curations.file {
        Some(path) => Box::new(CurationFile::new(path)),
        None => Box::new(
            CurationClient::new(&config.curations.base_url, &config.curations.cache_path)
                .with_api_key(config.curations.resolved_api_key())
                .with_timeout(Duration::from_secs(config.curations.timeout_secs)),
        ),
    }
}

fn candidates(config: &Config) -> anyhow::Result<()> {
    let scope = config.scope()?;
    let constraint = SemanticConstraint::for_mod_type(scope.mod_type, |list_name| {
        let path = config
            .gene_lists
            .path_for(list_name)
            .ok_or_else(|| ptmcur_common::PtmcurError::Config(format!("no gene list named {list_name}")))?;
        GeneList::from_path(path)
    })?;

    let job = CandidateJob {
        snapshot_path: config.snapshot_path(&scope),
        corpus_path: config.corpus.path.clone(),
        scope,
    };
    let summary = run_candidates(&job, constraint.as_ref(), curation_source(config).as_ref())
        .context("Candidate job failed")?;

    info!(
        kept = summary.corpus.kept,
        curations = summary.curations,
        candidates = summary.candidates.unique,
        "Snapshot written to {}",
        summary.snapshot_path.display()
    );
    Ok(())
}

fn export(config: &Config) -> anyhow::Result<()> {
    let scope = config.scope()?;
    let snapshot_path = config.snapshot_path(&scope);
    let output = config.export_path(&scope);

    let statements = read_snapshot(&snapshot_path)
        .with_context(|| format!("Failed to read snapshot {}", snapshot_path.display()))?;
    let curations = curation_source(config).curations()?;
    let parser = CommentParser::with_corrections(config.comments.corrections.clone());
    info!(corrections = parser.n_corrections(), "Comment parser ready");

    let job = ExportJob {
        scope,
        curation_source: config.export.curation_source.clone(),
    };
    let result = run_export(&job, &statements, &curations, &parser)?;
    write_csv(&output, &result.rows)?;

    info!(
        curations = result.stats.curations_selected,
        groups = result.stats.groups,
        rows = result.stats.rows_exported,
        "Export written to {}",
        output.display()
    );
    Ok(())
}
