//! Hierarchical header paths of ontology leaf files.
//!
//! A header line such as `#Event/AnimalsAndPets/CatsAndDogs` is a root-to-leaf
//! path of CamelCase segments. Each segment is split on capitalization
//! boundaries and on the connectives `And` / `Or`, which separate the
//! segment's parts: `CatsAndDogs` has the parts `cats` and `dogs`, while
//! `GuideDogs` has the single two-word part `guide dogs`.

use serde::{Deserialize, Serialize};

use crate::taxonomy::types::TokenSequence;

/// Words joining the parts of a segment.
pub const CONNECTIVES: [&str; 2] = ["and", "or"];

/// One path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSegment {
    /// Connective-separated parts, each a lowercased word sequence
    pub parts: Vec<TokenSequence>,
}

impl HeaderSegment {
    /// Parse a segment; `None` if it holds no words.
    pub fn parse(segment: &str) -> Option<Self> {
        let mut parts = Vec::new();
        let mut current = Vec::new();

        for word in split_words(segment) {
            if CONNECTIVES.contains(&word.as_str()) {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            } else {
                current.push(word);
            }
        }
        if !current.is_empty() {
            parts.push(current);
        }

        if parts.is_empty() {
            None
        } else {
            Some(HeaderSegment { parts })
        }
    }

    /// All words of the segment, connectives dropped.
    pub fn words(&self) -> TokenSequence {
        self.parts.iter().flatten().cloned().collect()
    }
}

/// A root-to-leaf sequence of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyHeaderPath {
    pub segments: Vec<HeaderSegment>,
}

impl OntologyHeaderPath {
    /// Parse one header line, with or without its leading `#`.
    pub fn parse_line(line: &str) -> Self {
        let path = line.trim().trim_start_matches('#');
        OntologyHeaderPath {
            segments: path.split('/').filter_map(HeaderSegment::parse).collect(),
        }
    }

    /// Append the segments of another path.
    pub fn extend(&mut self, other: OntologyHeaderPath) {
        self.segments.extend(other.segments);
    }

    /// The leaf-most segment.
    pub fn leaf(&self) -> Option<&HeaderSegment> {
        self.segments.last()
    }

    /// Word lists of every segment, root first.
    pub fn segment_words(&self) -> Vec<TokenSequence> {
        self.segments.iter().map(HeaderSegment::words).collect()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Split text into lowercased words at non-alphanumeric characters and
/// capitalization boundaries.
///
/// ```
/// use taxonomer::ontology::header::split_words;
///
/// assert_eq!(split_words("HTTPServerLogs"), vec!["http", "server", "logs"]);
/// assert_eq!(split_words("Cats_and-Dogs"), vec!["cats", "and", "dogs"]);
/// ```
pub fn split_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            flush(&mut current, &mut words);
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // "dogS" or the "S" of "HTTPServer"
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                flush(&mut current, &mut words);
            }
        }
        current.push(c);
    }
    flush(&mut current, &mut words);

    words
}

fn flush(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(current.to_lowercase());
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(words: &[&str]) -> TokenSequence {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("CatsAndDogs"), vec!["cats", "and", "dogs"]);
        assert_eq!(split_words("Event"), vec!["event"]);
        assert_eq!(split_words("Top10Lists"), vec!["top10", "lists"]);
        assert!(split_words("  ").is_empty());
    }

    #[test]
    fn test_segment_parts() {
        let segment = HeaderSegment::parse("CatsAndDogs").unwrap();
        assert_eq!(segment.parts, vec![seq(&["cats"]), seq(&["dogs"])]);
        assert_eq!(segment.words(), seq(&["cats", "dogs"]));

        let segment = HeaderSegment::parse("GuideDogsOrCats").unwrap();
        assert_eq!(segment.parts, vec![seq(&["guide", "dogs"]), seq(&["cats"])]);

        assert!(HeaderSegment::parse("And").is_none());
        assert!(HeaderSegment::parse("").is_none());
    }

    #[test]
    fn test_parse_line() {
        let path = OntologyHeaderPath::parse_line("#Event/AnimalsAndPets//CatsAndDogs/");
        assert_eq!(path.len(), 3);
        assert_eq!(
            path.segment_words(),
            vec![seq(&["event"]), seq(&["animals", "pets"]), seq(&["cats", "dogs"])]
        );
        assert_eq!(path.leaf().unwrap().words(), seq(&["cats", "dogs"]));
    }
}
