//! Tab-separated diagnostic table for manual evaluation of a leaf.

use std::fmt::Write;

use crate::ontology::extension::{LeafCandidate, select_candidates};

/// Column header of every section.
pub const DIAGNOSTIC_COLUMNS: &str = "result\tquery\tscore\tsimilarity\trelevance_to_header";

/// Render three sections: candidates from all queries, from single-word
/// queries and from multi-word queries. Each is deduplicated and sorted like
/// the examples that would be added, but not capped.
pub fn render_diagnostics(candidates: &[LeafCandidate], excluded: &[String]) -> String {
    let sections: [(&str, fn(&LeafCandidate) -> bool); 3] = [
        ("all queries", |_| true),
        ("single-word queries", |c| c.from_single_word_query()),
        ("multi-word queries", |c| !c.from_single_word_query()),
    ];

    let mut out = String::new();
    for (index, (title, keep)) in sections.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "# {title}");
        let _ = writeln!(out, "{DIAGNOSTIC_COLUMNS}");

        let rows = select_candidates(candidates.iter().filter(|c| keep(c)), excluded, usize::MAX);
        for row in rows {
            let _ = writeln!(
                out,
                "{}\t{}\t{:.4}\t{:.4}\t{:.4}",
                row.surface(),
                row.scored.query.join(" "),
                row.scored.score,
                row.scored.similarity,
                row.relevance_to_header
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::types::ScoredMatch;

    fn candidate(result: &str, query: &str, score: f64) -> LeafCandidate {
        LeafCandidate {
            scored: ScoredMatch {
                query: query.split(' ').map(String::from).collect(),
                result: result.split(' ').map(String::from).collect(),
                count: 2,
                similarity: 0.75,
                score,
                evidence: Vec::new(),
            },
            relevance_to_header: 1.25,
        }
    }

    #[test]
    fn test_sections() {
        let candidates = vec![
            candidate("poodle", "dogs", 0.5),
            candidate("beagle", "guide dogs", 0.9),
            candidate("dogs", "guide dogs", 2.0),
        ];
        let report = render_diagnostics(&candidates, &["dogs".to_string()]);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(
            lines,
            vec![
                "# all queries",
                DIAGNOSTIC_COLUMNS,
                "beagle\tguide dogs\t0.9000\t0.7500\t1.2500",
                "poodle\tdogs\t0.5000\t0.7500\t1.2500",
                "",
                "# single-word queries",
                DIAGNOSTIC_COLUMNS,
                "poodle\tdogs\t0.5000\t0.7500\t1.2500",
                "",
                "# multi-word queries",
                DIAGNOSTIC_COLUMNS,
                "beagle\tguide dogs\t0.9000\t0.7500\t1.2500",
            ]
        );
    }
}
