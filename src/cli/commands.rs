//! Command implementations for the Taxonomer CLI.

use std::fs;
use std::sync::Arc;

use log::info;

use crate::analysis::lemmatizer::LexiconLemmatizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::TaxonomerConfig;
use crate::corpus::Corpus;
use crate::embedding::WordVectors;
use crate::error::{Result, TaxonomerError};
use crate::ontology::{ExtensionOptions, OntologyExtensionEngine};
use crate::query::{RelationKind, RuleSet};
use crate::taxonomy::{ScoredMatch, SimilarityScorer, TaxonomyReader};

/// Execute a CLI command.
pub fn execute_command(args: TaxonomerArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Hypernyms(relation) => {
            run_relation(RelationKind::Hypernym, relation, &config, &args)
        }
        Command::Hyponyms(relation) => run_relation(RelationKind::Hyponym, relation, &config, &args),
        Command::Cohyponyms(relation) => {
            run_relation(RelationKind::Cohyponym, relation, &config, &args)
        }
        Command::ExpandHypernyms(expand) => expand_hypernyms(expand, &config, &args),
        Command::Rules(rules) => run_rules(rules, &config, &args),
        Command::ExtendOntology(extend) => extend_ontology(extend, config, &args),
    }
}

/// Load the configuration file, if any, and apply global overrides.
pub fn load_config(args: &TaxonomerArgs) -> Result<TaxonomerConfig> {
    let mut config = match &args.config {
        Some(path) => TaxonomerConfig::load(path)?,
        None => TaxonomerConfig::default(),
    };

    if let Some(corpus) = &args.corpus {
        config.corpus_path = Some(corpus.clone());
    }
    if let Some(embeddings) = &args.embeddings {
        config.embeddings_path = Some(embeddings.clone());
    }
    if let Some(rules_dir) = &args.rules_dir {
        config.rules_dir = Some(rules_dir.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Build a taxonomy reader from configured resources.
pub fn build_reader(config: &TaxonomerConfig) -> Result<TaxonomyReader> {
    let rules = match &config.rules_dir {
        Some(dir) => RuleSet::load(dir)?,
        None => RuleSet::builtin(),
    };
    let vectors = WordVectors::load(config.require_embeddings_path()?)?;
    let corpus = Corpus::load(config.require_corpus_path()?)?;
    let lemmatizer = LexiconLemmatizer::from_corpus(&corpus);
    info!("Lemma lexicon holds {} forms", lemmatizer.len());

    Ok(TaxonomyReader::new(
        Arc::new(corpus),
        Arc::new(lemmatizer),
        Arc::new(SimilarityScorer::new(Arc::new(vectors))),
    )
    .with_rules(rules)
    .with_evidence_cap(config.evidence_display_cap))
}

fn run_relation(
    kind: RelationKind,
    relation: &RelationArgs,
    config: &TaxonomerConfig,
    args: &TaxonomerArgs,
) -> Result<()> {
    let reader = build_reader(config)?;
    let lemmatize = relation.lemmatization.resolve(config.lemmatize);
    let matches = reader.get_ranked(kind, &relation.term, lemmatize)?;
    let query = reader.normalize(&relation.term, lemmatize)?;

    output_relation(
        &results(kind.to_string(), query, matches, relation.limit),
        args,
    )
}

fn expand_hypernyms(expand: &ExpandArgs, config: &TaxonomerConfig, args: &TaxonomerArgs) -> Result<()> {
    let reader = build_reader(config)?;
    let lemmatize = expand.lemmatization.resolve(config.lemmatize);
    let matches = reader.get_expanded_hypernyms(&expand.term, expand.cohyponyms, lemmatize)?;
    let query = reader.normalize(&expand.term, lemmatize)?;

    output_relation(
        &results("expanded hypernym".to_string(), query, matches, expand.limit),
        args,
    )
}

fn run_rules(rules: &RulesArgs, config: &TaxonomerConfig, args: &TaxonomerArgs) -> Result<()> {
    let rule_text = fs::read_to_string(&rules.rules_file).map_err(|e| {
        TaxonomerError::configuration(format!(
            "Cannot read rules '{}': {e}",
            rules.rules_file.display()
        ))
    })?;

    let reader = build_reader(config)?;
    let lemmatize = rules.lemmatization.resolve(config.lemmatize);
    let matches = reader.execute_given_rules(&rules.term, &rule_text, lemmatize)?;
    let query = reader.normalize(&rules.term, lemmatize)?;

    output_relation(
        &results("match".to_string(), query, matches, rules.limit),
        args,
    )
}

fn extend_ontology(
    extend: &ExtendOntologyArgs,
    mut config: TaxonomerConfig,
    args: &TaxonomerArgs,
) -> Result<()> {
    config.lemmatize = extend.lemmatization.resolve(config.lemmatize);
    if let Some(threshold) = extend.threshold {
        config.similarity_to_header_threshold = threshold;
    }
    if let Some(max) = extend.max_examples {
        config.max_examples_to_add_per_ontology_leaf = max;
    }
    if extend.drop_original_examples {
        config.include_original_leaf_examples = false;
    }
    if extend.query_examples {
        config.query_by_header_terms_only = false;
    }
    config.manual_eval_output |= extend.manual_eval;
    if extend.threads.is_some() {
        config.num_threads = extend.threads;
    }
    config.validate()?;

    let reader = Arc::new(build_reader(&config)?);
    let engine = OntologyExtensionEngine::new(
        reader,
        ExtensionOptions::from(&config),
        config.thread_count(),
    )?;

    let report = engine.extend_directory(&extend.input_dir, &extend.output_dir)?;
    output_report(&report, args)?;

    if report.is_success() {
        Ok(())
    } else {
        Err(TaxonomerError::other(format!(
            "{} of {} leaf files failed",
            report.failed.len(),
            report.failed.len() + report.processed
        )))
    }
}

fn results(
    relation: String,
    query: Vec<String>,
    mut matches: Vec<ScoredMatch>,
    limit: Option<usize>,
) -> RelationResults {
    let total_matches = matches.len();
    if let Some(limit) = limit {
        matches.truncate(limit);
    }
    RelationResults {
        relation,
        query,
        total_matches,
        matches,
    }
}
