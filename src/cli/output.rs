//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TaxonomerArgs};
use crate::error::Result;
use crate::ontology::ExtensionReport;
use crate::taxonomy::ScoredMatch;

/// Ranked results of one relation query.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelationResults {
    pub relation: String,
    pub query: Vec<String>,
    pub total_matches: usize,
    pub matches: Vec<ScoredMatch>,
}

/// Output ranked relation results in the selected format.
pub fn output_relation(results: &RelationResults, args: &TaxonomerArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", format_relation_human(results, args.verbosity()));
            Ok(())
        }
        OutputFormat::Json => output_json(results, args),
        OutputFormat::Tsv => {
            print!("{}", format_relation_tsv(results));
            Ok(())
        }
    }
}

/// Output an ontology extension report in the selected format.
pub fn output_report(report: &ExtensionReport, args: &TaxonomerArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(report, args),
        OutputFormat::Human | OutputFormat::Tsv => {
            println!("Processed: {}", report.processed);
            println!("Failed: {}", report.failed.len());
            for (path, message) in &report.failed {
                println!("  {}: {message}", path.display());
            }
            Ok(())
        }
    }
}

/// Human-readable ranking table; evidence is shown from verbosity 2.
pub fn format_relation_human(results: &RelationResults, verbosity: u8) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} of '{}' ({} of {} shown)\n",
        results.relation,
        results.query.join(" "),
        results.matches.len(),
        results.total_matches
    ));
    out.push_str("═══════════════\n");

    for (i, m) in results.matches.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<30} count: {:<5} similarity: {:.4}  score: {:.4}\n",
            i + 1,
            m.result_text(),
            m.count,
            m.similarity,
            m.score
        ));
        if verbosity >= 2 {
            for evidence in &m.evidence {
                out.push_str(&format!(
                    "       [doc {}] {}\n",
                    evidence.document_id, evidence.sentence_text
                ));
            }
        }
    }
    out
}

/// Tab-separated ranking with a header row.
pub fn format_relation_tsv(results: &RelationResults) -> String {
    let mut out = String::from("result\tcount\tsimilarity\tscore\n");
    for m in &results.matches {
        out.push_str(&format!(
            "{}\t{}\t{:.6}\t{:.6}\n",
            m.result_text(),
            m.count,
            m.similarity,
            m.score
        ));
    }
    out
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TaxonomerArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Evidence;

    fn results() -> RelationResults {
        RelationResults {
            relation: "hyponym".into(),
            query: vec!["dog".into()],
            total_matches: 3,
            matches: vec![ScoredMatch {
                query: vec!["dog".into()],
                result: vec!["toy".into(), "poodle".into()],
                count: 3,
                similarity: 0.75,
                score: 1.039721,
                evidence: vec![Evidence::new(7, "dogs such as toy poodles")],
            }],
        }
    }

    #[test]
    fn test_tsv() {
        assert_eq!(
            format_relation_tsv(&results()),
            "result\tcount\tsimilarity\tscore\ntoy poodle\t3\t0.750000\t1.039721\n"
        );
    }

    #[test]
    fn test_human_evidence_depends_on_verbosity() {
        let quiet = format_relation_human(&results(), 1);
        assert!(quiet.starts_with("hyponym of 'dog' (1 of 3 shown)"));
        assert!(quiet.contains("toy poodle"));
        assert!(!quiet.contains("[doc 7]"));

        let verbose = format_relation_human(&results(), 2);
        assert!(verbose.contains("[doc 7] dogs such as toy poodles"));
    }

    #[test]
    fn test_json_serialization() {
        let json = serde_json::to_value(results()).unwrap();
        assert_eq!(json["matches"][0]["count"], 3);
        assert_eq!(json["matches"][0]["evidence"][0]["document_id"], 7);
    }
}
