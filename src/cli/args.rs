//! Command line argument parsing for the Taxonomer CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Taxonomer - taxonomic relation extraction and ontology extension
#[derive(Parser, Debug, Clone)]
#[command(name = "taxonomer")]
#[command(about = "Extract ranked hypernyms, hyponyms and co-hyponyms from an annotated corpus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TaxonomerArgs {
    /// Verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "TAXONOMER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Annotated corpus in vertical format
    #[arg(long, value_name = "CORPUS_FILE", env = "TAXONOMER_CORPUS", global = true)]
    pub corpus: Option<PathBuf>,

    /// Word vector file
    #[arg(long, value_name = "VECTORS_FILE", env = "TAXONOMER_EMBEDDINGS", global = true)]
    pub embeddings: Option<PathBuf>,

    /// Directory with hypernym.rules, hyponym.rules and cohyponym.rules
    #[arg(long, value_name = "RULES_DIR", global = true)]
    pub rules_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TaxonomerArgs {
    /// Get the effective verbosity level (0=quiet, 1=normal, 2=info, 3+=debug)
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Ranked hypernyms of a term
    Hypernyms(RelationArgs),

    /// Ranked hyponyms of a term
    Hyponyms(RelationArgs),

    /// Ranked co-hyponyms of a term
    Cohyponyms(RelationArgs),

    /// Hypernyms broadened through co-hyponyms and head words
    #[command(name = "expand-hypernyms")]
    ExpandHypernyms(ExpandArgs),

    /// Run caller-supplied rules
    Rules(RulesArgs),

    /// Enrich a directory of ontology leaf files
    #[command(name = "extend-ontology")]
    ExtendOntology(ExtendOntologyArgs),
}

/// Arguments for relation queries
#[derive(Parser, Debug, Clone)]
pub struct RelationArgs {
    /// Term to query, one or more words
    #[arg(value_name = "TERM", required = true, num_args = 1..)]
    pub term: Vec<String>,

    #[command(flatten)]
    pub lemmatization: LemmatizeArgs,

    /// Maximum number of results to print
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for expanded hypernym discovery
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    /// Term to query, one or more words
    #[arg(value_name = "TERM", required = true, num_args = 1..)]
    pub term: Vec<String>,

    /// Number of co-hyponyms used to broaden the query
    #[arg(short = 'n', long = "cohyponyms", default_value = "5")]
    pub cohyponyms: usize,

    #[command(flatten)]
    pub lemmatization: LemmatizeArgs,

    /// Maximum number of results to print
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for running given rules
#[derive(Parser, Debug, Clone)]
pub struct RulesArgs {
    /// Rule file; `$query` stands for the term
    #[arg(short = 'r', long, value_name = "RULES_FILE")]
    pub rules_file: PathBuf,

    /// Term to query, one or more words
    #[arg(value_name = "TERM", required = true, num_args = 1..)]
    pub term: Vec<String>,

    #[command(flatten)]
    pub lemmatization: LemmatizeArgs,

    /// Maximum number of results to print
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for ontology extension
#[derive(Parser, Debug, Clone)]
pub struct ExtendOntologyArgs {
    /// Directory of ontology leaf files
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory receiving the enriched leaf files
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub lemmatization: LemmatizeArgs,

    /// Minimum relevance to the header path
    #[arg(short, long, value_name = "THRESHOLD", allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Maximum examples added per leaf
    #[arg(short = 'm', long, value_name = "COUNT")]
    pub max_examples: Option<usize>,

    /// Leave existing examples out of the output
    #[arg(long)]
    pub drop_original_examples: bool,

    /// Also query with the existing examples of each leaf
    #[arg(long)]
    pub query_examples: bool,

    /// Write diagnostic tables instead of enriched leaves
    #[arg(long)]
    pub manual_eval: bool,

    /// Number of worker threads
    #[arg(long)]
    pub threads: Option<usize>,
}

/// Lemmatization switches shared by the query commands
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LemmatizeArgs {
    /// Match by lemma instead of normalized surface form
    #[arg(short, long, conflicts_with = "no_lemmatize")]
    pub lemmatize: bool,

    /// Match by normalized surface form even when the configuration lemmatizes
    #[arg(long)]
    pub no_lemmatize: bool,
}

impl LemmatizeArgs {
    /// Apply the switches on top of the configured setting.
    pub fn resolve(&self, configured: bool) -> bool {
        if self.lemmatize {
            true
        } else if self.no_lemmatize {
            false
        } else {
            configured
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// Tab-separated values
    Tsv,
}
