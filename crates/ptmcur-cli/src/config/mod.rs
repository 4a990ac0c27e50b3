//! Configuration loading for ptmcur.
//! Reads ptmcur.toml from `--config`, the PTMCUR_CONFIG env var, or the
//! current directory. Every section is optional.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use ptmcur_common::{ModType, RegulationFamily};
use ptmcur_export::ExportScope;
use ptmcur_ingestion::CandidateJob;
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "PTMCUR_CONFIG";
pub const API_KEY_ENV: &str = "PTMCUR_CURATION_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub gene_lists: GeneListConfig,
    #[serde(default)]
    pub curations: CurationConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub comments: CommentConfig,
}

/// Which modification and regulations a batch is about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_mod_key")]
    pub mod_key: String,
    #[serde(default = "default_regulation_types")]
    pub regulation_types: Vec<String>,
}

fn default_mod_key() -> String { "dephosphorylation".to_string() }
fn default_regulation_types() -> Vec<String> { vec!["activity".to_string()] }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mod_key: default_mod_key(),
            regulation_types: default_regulation_types(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
    /// Where `<mod_key>s_with_reg_sorted.json` is written and read.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
}

fn default_corpus_path() -> PathBuf { cache_dir().join("processed_statements.tsv.gz") }
fn default_snapshot_dir() -> PathBuf { PathBuf::from(".") }

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
            snapshot_dir: default_snapshot_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneListConfig {
    #[serde(default = "default_phosphatases")]
    pub phosphatases: PathBuf,
    #[serde(default = "default_kinases")]
    pub kinases: PathBuf,
    #[serde(default = "default_e3_ligases")]
    pub e3_ligases: PathBuf,
}

fn default_phosphatases() -> PathBuf { PathBuf::from("phosphatases.txt") }
fn default_kinases()      -> PathBuf { PathBuf::from("kinases.txt") }
fn default_e3_ligases()   -> PathBuf { PathBuf::from("e3_ubi_ligases.txt") }

impl Default for GeneListConfig {
    fn default() -> Self {
        Self {
            phosphatases: default_phosphatases(),
            kinases: default_kinases(),
            e3_ligases: default_e3_ligases(),
        }
    }
}

impl GeneListConfig {
    /// Path of a list by the name `SemanticConstraint::required_list` uses.
    pub fn path_for(&self, list_name: &str) -> Option<&Path> {
        match list_name {
            "phosphatases" => Some(&self.phosphatases),
            "kinases" => Some(&self.kinases),
            "e3_ligases" => Some(&self.e3_ligases),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Falls back to PTMCUR_CURATION_API_KEY.
    pub api_key: Option<String>,
    #[serde(default = "default_curation_cache")]
    pub cache_path: PathBuf,
    /// Read curations from this JSON file instead of the service.
    pub file: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String { "https://db.indra.bio".to_string() }
fn default_curation_cache() -> PathBuf { cache_dir().join("curations.json") }
fn default_timeout_secs() -> u64 { 120 }

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            cache_path: default_curation_cache(),
            file: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CurationConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Curation batch to export; all batches when unset.
    #[serde(default = "default_curation_source")]
    pub curation_source: Option<String>,
    /// Defaults to `<mod_key>s_with_reg_export.csv`.
    pub output: Option<PathBuf>,
}

fn default_curation_source() -> Option<String> { Some("signor_dephos".to_string()) }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            curation_source: default_curation_source(),
            output: None,
        }
    }
}

/// Extra whole-comment corrections, raw comment → fixed comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentConfig {
    #[serde(default)]
    pub corrections: BTreeMap<String, String>,
}

fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("ptmcur")
}

mod tests;

impl Config {
    /// Load configuration from ptmcur.toml.
    /// An explicit path must exist; the default location may be absent.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => match std::env::var(CONFIG_ENV) {
                Ok(p) => (PathBuf::from(p), true),
                Err(_) => (PathBuf::from("ptmcur.toml"), false),
            },
        };

        if !path.exists() {
            if required {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            tracing::debug!("No ptmcur.toml found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn mod_type(&self) -> anyhow::Result<ModType> {
        ModType::from_mod_key(&self.run.mod_key)
            .with_context(|| format!("Unknown modification type: {}", self.run.mod_key))
    }

    pub fn regulation_families(&self) -> anyhow::Result<Vec<RegulationFamily>> {
        self.run
            .regulation_types
            .iter()
            .map(|r| {
                RegulationFamily::parse(r).with_context(|| format!("Unknown regulation type: {r}"))
            })
            .collect()
    }

    pub fn snapshot_path(&self, scope: &ExportScope) -> PathBuf {
        self.corpus.snapshot_dir.join(CandidateJob::default_snapshot_name(scope))
    }

    pub fn export_path(&self, scope: &ExportScope) -> PathBuf {
        self.export
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}s_with_reg_export.csv", scope.mechanism())))
    }

    pub fn scope(&self) -> anyhow::Result<ExportScope> {
        Ok(ExportScope::new(self.mod_type()?, self.regulation_families()?))
    }
}
