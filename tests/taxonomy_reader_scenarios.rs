//! Scenario tests for relation extraction over a corpus loaded from disk.

use std::fs;
use std::sync::Arc;

use taxonomer::analysis::lemmatizer::LexiconLemmatizer;
use taxonomer::corpus::Corpus;
use taxonomer::embedding::WordVectors;
use taxonomer::error::{Result, TaxonomerError};
use taxonomer::query::RuleSet;
use taxonomer::taxonomy::{SimilarityScorer, TaxonomyReader};
use tempfile::TempDir;

const CORPUS: &str = "\
<doc id=\"1\">
Dogs\tdog\tNOUN
such\tsuch\tADJ
as\tas\tADP
the\tthe\tDET
poodle\tpoodle\tNOUN

Many\tmany\tADJ
dogs\tdog\tNOUN
such\tsuch\tADJ
as\tas\tADP
a\ta\tDET
terrier\tterrier\tNOUN
</doc>
<doc id=\"2\">
dogs\tdog\tNOUN
such\tsuch\tADJ
as\tas\tADP
poodle\tpoodle\tNOUN
bark\tbark\tVERB

Small\tsmall\tADJ
dogs\tdog\tNOUN
such\tsuch\tADJ
as\tas\tADP
the\tthe\tDET
poodle\tpoodle\tNOUN
</doc>
<doc id=\"3\">
Cats\tcat\tNOUN
and\tand\tCCONJ
dogs\tdog\tNOUN
are\tbe\tAUX
animals\tanimal\tNOUN
</doc>
";

const VECTORS: &str = "\
5 2
dog 1.0 0.0
poodle 0.9 0.1
terrier 0.1 0.9
cats 0.7 0.3
animals 0.6 0.2
";

fn seq(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn build_reader(dir: &TempDir) -> Result<TaxonomyReader> {
    let corpus_path = dir.path().join("corpus.vert");
    let vectors_path = dir.path().join("vectors.txt");
    fs::write(&corpus_path, CORPUS)?;
    fs::write(&vectors_path, VECTORS)?;

    let corpus = Corpus::load(&corpus_path)?;
    let lemmatizer = LexiconLemmatizer::from_corpus(&corpus);
    let vectors = WordVectors::load(&vectors_path)?;

    Ok(TaxonomyReader::new(
        Arc::new(corpus),
        Arc::new(lemmatizer),
        Arc::new(SimilarityScorer::new(Arc::new(vectors))),
    ))
}

#[test]
fn test_hyponyms_of_dog_are_ranked_by_similarity() -> Result<()> {
    let dir = TempDir::new()?;
    let reader = build_reader(&dir)?;

    let ranked = reader.get_ranked_hyponyms(&seq(&["dog"]), true)?;
    let results: Vec<_> = ranked.iter().map(|m| m.result_text()).collect();

    assert_eq!(results, vec!["poodle", "terrier"]);
    assert_eq!(ranked[0].count, 3);
    assert_eq!(ranked[1].count, 1);
    assert!(ranked[0].similarity > ranked[1].similarity);
    assert!(ranked[0].score > ranked[1].score);

    let docs: Vec<u64> = ranked[0].evidence.iter().map(|e| e.document_id).collect();
    assert_eq!(docs, vec![1, 2, 2]);
    assert_eq!(ranked[0].evidence[0].sentence_text, "Dogs such as the poodle");

    Ok(())
}

#[test]
fn test_surface_matching_needs_exact_form() -> Result<()> {
    let dir = TempDir::new()?;
    let reader = build_reader(&dir)?;

    // "dog" never occurs as a surface form, only "dogs"
    assert!(reader.get_ranked_hyponyms(&seq(&["dog"]), false)?.is_empty());
    assert_eq!(reader.get_ranked_hyponyms(&seq(&["Dogs"]), false)?.len(), 2);

    Ok(())
}

#[test]
fn test_evidence_cap_does_not_change_counts() -> Result<()> {
    let dir = TempDir::new()?;
    let reader = build_reader(&dir)?.with_evidence_cap(1);

    let ranked = reader.get_ranked_hyponyms(&seq(&["dog"]), true)?;
    assert_eq!(ranked[0].count, 3);
    assert_eq!(ranked[0].evidence.len(), 1);

    Ok(())
}

#[test]
fn test_cohyponyms_and_given_rules() -> Result<()> {
    let dir = TempDir::new()?;
    let reader = build_reader(&dir)?;

    let cohyponyms = reader.get_ranked_cohyponyms(&seq(&["dog"]), true)?;
    assert_eq!(cohyponyms.len(), 1);
    assert_eq!(cohyponyms[0].result, seq(&["cats"]));

    let matches = reader.execute_given_rules(
        &seq(&["dog"]),
        "# a dog is an animal\n$query [lemma=\"be\"] result:[pos=\"NOUN\"]\n",
        true,
    )?;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].result, seq(&["animals"]));

    assert!(matches!(
        reader.execute_given_rules(&seq(&["dog"]), "$query result:(", true),
        Err(TaxonomerError::QueryCompilation(_))
    ));

    Ok(())
}

#[test]
fn test_ranking_never_returns_the_query() -> Result<()> {
    let dir = TempDir::new()?;
    let reader = build_reader(&dir)?;

    let matches = reader.execute_given_rules(&seq(&["dogs"]), "result:[pos=\"NOUN\"]", false)?;
    assert!(matches.iter().any(|m| m.result == seq(&["poodle"])));
    assert!(matches.iter().all(|m| m.result != seq(&["dogs"])));

    Ok(())
}

#[test]
fn test_rules_directory_override() -> Result<()> {
    let dir = TempDir::new()?;
    let rules_dir = dir.path().join("rules");
    fs::create_dir_all(&rules_dir)?;
    fs::write(rules_dir.join("hypernym.rules"), "$query [lemma=\"be\"] result:[]\n")?;
    fs::write(rules_dir.join("hyponym.rules"), "$query \"such\" \"as\" result:[]\n")?;

    // cohyponym.rules is missing
    assert!(matches!(
        RuleSet::load(&rules_dir),
        Err(TaxonomerError::Configuration(_))
    ));

    fs::write(rules_dir.join("cohyponym.rules"), "result:[] \"and\" $query\n")?;
    let reader = build_reader(&dir)?.with_rules(RuleSet::load(&rules_dir)?);

    let hypernyms = reader.get_ranked_hypernyms(&seq(&["dog"]), true)?;
    assert_eq!(hypernyms[0].result, seq(&["animals"]));

    // "such as" followed by any single token
    let hyponyms = reader.get_ranked_hyponyms(&seq(&["dog"]), true)?;
    let results: Vec<_> = hyponyms.iter().map(|m| m.result_text()).collect();
    assert!(results.contains(&"the".to_string()));
    assert!(results.contains(&"poodle".to_string()));

    Ok(())
}
