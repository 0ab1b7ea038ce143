//! Ontology leaf files.
//!
//! Lines starting with `#` are header paths; every other non-empty line is an
//! example term. A leaf is read once and never edited in place; the enriched
//! version is rendered as new text.

use std::fs;
use std::path::Path;

use crate::analysis::lemmatizer::normalize_term;
use crate::error::{Result, TaxonomerError};
use crate::ontology::header::OntologyHeaderPath;
use crate::taxonomy::types::TokenSequence;

/// A parsed ontology leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct OntologyLeafFile {
    header_lines: Vec<String>,
    header_path: OntologyHeaderPath,
    examples: Vec<String>,
}

impl OntologyLeafFile {
    /// Parse leaf file content.
    pub fn parse(content: &str) -> Result<Self> {
        let mut header_lines = Vec::new();
        let mut header_path = OntologyHeaderPath::default();
        let mut examples: Vec<String> = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                header_path.extend(OntologyHeaderPath::parse_line(line));
                header_lines.push(line.to_string());
            } else if !examples.iter().any(|e| e == line) {
                examples.push(line.to_string());
            }
        }

        if header_path.is_empty() {
            return Err(TaxonomerError::invalid_argument(
                "Leaf file has no header path",
            ));
        }

        Ok(OntologyLeafFile {
            header_lines,
            header_path,
            examples,
        })
    }

    /// Read and parse a leaf file.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Header lines as written.
    pub fn header_lines(&self) -> &[String] {
        &self.header_lines
    }

    /// Segments of all header lines, root first.
    pub fn header_path(&self) -> &OntologyHeaderPath {
        &self.header_path
    }

    /// Example lines as written, in file order.
    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// Query terms derived from the header: the parts of the leaf-most
    /// segment of each header line.
    pub fn header_terms(&self) -> Vec<TokenSequence> {
        let mut terms: Vec<TokenSequence> = Vec::new();
        for line in &self.header_lines {
            let path = OntologyHeaderPath::parse_line(line);
            if let Some(leaf) = path.leaf() {
                for part in &leaf.parts {
                    if !terms.contains(part) {
                        terms.push(part.clone());
                    }
                }
            }
        }
        terms
    }

    /// Existing examples as lowercased word sequences.
    pub fn example_terms(&self) -> Result<Vec<TokenSequence>> {
        let mut terms = Vec::new();
        for example in &self.examples {
            let words = normalize_term(example)?;
            if !words.is_empty() && !terms.contains(&words) {
                terms.push(words);
            }
        }
        Ok(terms)
    }

    /// Render the leaf followed by added examples.
    pub fn render(&self, include_examples: bool, added: &[String]) -> String {
        let mut out = String::new();
        for line in &self.header_lines {
            out.push_str(line);
            out.push('\n');
        }
        if include_examples {
            for example in &self.examples {
                out.push_str(example);
                out.push('\n');
            }
        }
        for example in added {
            out.push_str(example);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAF: &str = "#Event/AnimalsAndPets/CatsAndDogs\n\nlabrador\n  tabby cat \nlabrador\n";

    #[test]
    fn test_parse() {
        let leaf = OntologyLeafFile::parse(LEAF).unwrap();
        assert_eq!(leaf.header_lines(), &["#Event/AnimalsAndPets/CatsAndDogs".to_string()]);
        assert_eq!(leaf.header_path().len(), 3);
        assert_eq!(leaf.examples(), &["labrador".to_string(), "tabby cat".to_string()]);
        assert_eq!(
            leaf.header_terms(),
            vec![vec!["cats".to_string()], vec!["dogs".to_string()]]
        );
        assert_eq!(
            leaf.example_terms().unwrap()[1],
            vec!["tabby".to_string(), "cat".to_string()]
        );
    }

    #[test]
    fn test_multiple_header_lines() {
        let leaf = OntologyLeafFile::parse("#Animals/Dogs\n#Pets/GuideDogs\npoodle\n").unwrap();
        assert_eq!(leaf.header_path().len(), 4);
        assert_eq!(
            leaf.header_terms(),
            vec![
                vec!["dogs".to_string()],
                vec!["guide".to_string(), "dogs".to_string()]
            ]
        );
    }

    #[test]
    fn test_missing_header_is_an_error() {
        assert!(OntologyLeafFile::parse("poodle\nterrier\n").is_err());
        assert!(OntologyLeafFile::parse("#/And/\npoodle\n").is_err());
    }

    #[test]
    fn test_render_round_trip() {
        let leaf = OntologyLeafFile::parse(LEAF).unwrap();
        let rendered = leaf.render(true, &[]);
        assert_eq!(rendered, "#Event/AnimalsAndPets/CatsAndDogs\nlabrador\ntabby cat\n");
        assert_eq!(OntologyLeafFile::parse(&rendered).unwrap().render(true, &[]), rendered);

        let added = leaf.render(false, &["beagle".to_string()]);
        assert_eq!(added, "#Event/AnimalsAndPets/CatsAndDogs\nbeagle\n");
    }
}
