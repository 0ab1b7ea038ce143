//! Word vectors in the word2vec/GloVe text format.
//!
//! Each line holds a key followed by its components, separated by whitespace.
//! An optional first line `<count> <dimension>` is skipped. Multi-word phrases
//! may be stored under keys joined with `_` (`guide_dog`).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use log::{debug, info};

use crate::embedding::store::EmbeddingStore;
use crate::embedding::vector::Vector;
use crate::error::{Result, TaxonomerError};

/// Separator used for phrase keys.
pub const PHRASE_SEPARATOR: &str = "_";

/// In-memory word vector table.
#[derive(Debug, Clone)]
pub struct WordVectors {
    vectors: AHashMap<String, Vector>,
    dimension: usize,
}

impl WordVectors {
    /// Create an empty table of a given dimension.
    pub fn new(dimension: usize) -> Self {
        WordVectors {
            vectors: AHashMap::new(),
            dimension,
        }
    }

    /// Build a table from `(key, components)` pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Vec<f32>)>,
        K: Into<String>,
    {
        let mut table: Option<WordVectors> = None;
        for (key, data) in pairs {
            let table = table.get_or_insert_with(|| WordVectors::new(data.len()));
            table.insert(key.into(), Vector::new(data))?;
        }
        table.ok_or_else(|| TaxonomerError::embedding("No word vectors given"))
    }

    /// Load a table from a text file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            TaxonomerError::configuration(format!(
                "Cannot open embeddings '{}': {e}",
                path.display()
            ))
        })?;

        let table = Self::read(BufReader::new(file))?;
        info!(
            "Loaded {} word vectors of dimension {} from {}",
            table.len(),
            table.dimension,
            path.display()
        );
        Ok(table)
    }

    /// Read a table from any buffered reader.
    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        let mut table: Option<WordVectors> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            let mut fields = line.split_whitespace();
            let Some(key) = fields.next() else {
                continue;
            };
            let values: Vec<&str> = fields.collect();

            if index == 0 && values.len() == 1 {
                if let (Ok(_), Ok(dimension)) = (key.parse::<usize>(), values[0].parse::<usize>())
                {
                    debug!("Skipping word vector header, dimension {dimension}");
                    table = Some(WordVectors::new(dimension));
                    continue;
                }
            }

            let data = values
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| {
                    TaxonomerError::embedding(format!("Invalid component at line {line_no}: {e}"))
                })?;

            let table = table.get_or_insert_with(|| WordVectors::new(data.len()));
            table.insert(key.to_string(), Vector::new(data)).map_err(|e| {
                TaxonomerError::embedding(format!("Line {line_no}: {e}"))
            })?;
        }

        table.ok_or_else(|| TaxonomerError::embedding("Word vector file is empty"))
    }

    /// Insert a vector, checking its dimension.
    pub fn insert(&mut self, key: String, vector: Vector) -> Result<()> {
        if vector.dimension() != self.dimension || self.dimension == 0 {
            return Err(TaxonomerError::embedding(format!(
                "Vector for '{key}' has dimension {}, expected {}",
                vector.dimension(),
                self.dimension
            )));
        }
        self.vectors.insert(key, vector);
        Ok(())
    }

    /// Look up a single key, falling back to its lowercase form.
    pub fn get(&self, key: &str) -> Option<&Vector> {
        self.vectors
            .get(key)
            .or_else(|| self.vectors.get(&key.to_lowercase()))
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the table holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl EmbeddingStore for WordVectors {
    fn vector_for(&self, tokens: &[String]) -> Vector {
        if tokens.is_empty() {
            return Vector::zeros(self.dimension);
        }

        if tokens.len() > 1 {
            if let Some(phrase) = self.get(&tokens.join(PHRASE_SEPARATOR)) {
                return phrase.clone();
            }
        }

        Vector::mean(tokens.iter().filter_map(|t| self.get(t)))
            .unwrap_or_else(|| Vector::zeros(self.dimension))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &'static str {
        "word_vectors"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_read_with_header() {
        let text = "3 2\ndog 1.0 0.0\ncat 0.5 0.5\nguide_dog 0.0 1.0\n";
        let vectors = WordVectors::read(Cursor::new(text)).unwrap();

        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors.dimension(), 2);
        assert_eq!(vectors.get("Dog").unwrap().data, vec![1.0, 0.0]);
    }

    #[test]
    fn test_read_without_header() {
        let text = "dog 1 0 0\n\ncat 0 1 0\n";
        let vectors = WordVectors::read(Cursor::new(text)).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors.dimension(), 3);
    }

    #[test]
    fn test_read_errors() {
        assert!(WordVectors::read(Cursor::new("dog 1 0\ncat 1\n")).is_err());
        assert!(WordVectors::read(Cursor::new("dog 1 x\n")).is_err());
        assert!(WordVectors::read(Cursor::new("")).is_err());
        assert!(matches!(
            WordVectors::load("/nonexistent/vectors.txt"),
            Err(TaxonomerError::Configuration(_))
        ));
    }

    #[test]
    fn test_composite_lookup() {
        let vectors = WordVectors::from_pairs(vec![
            ("guide", vec![1.0, 0.0]),
            ("dog", vec![0.0, 1.0]),
            ("hot_dog", vec![5.0, 5.0]),
        ])
        .unwrap();

        // phrase key wins
        assert_eq!(vectors.vector_for(&tokens(&["hot", "dog"])).data, vec![5.0, 5.0]);
        // otherwise mean of known words, unknown words ignored
        assert_eq!(
            vectors.vector_for(&tokens(&["guide", "dog", "xyzzy"])).data,
            vec![0.5, 0.5]
        );
        // out of vocabulary falls back to zero
        assert!(vectors.vector_for(&tokens(&["xyzzy"])).is_zero());
        assert_eq!(vectors.vector_for(&[]).dimension(), 2);
    }
}
