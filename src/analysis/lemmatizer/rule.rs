//! Rule-based English lemmatizer.
//!
//! Ontology terms are overwhelmingly nominal, so the rules only undo plural
//! inflection. Irregular plurals are looked up in a fixed table first.

use ahash::AHashMap;

use super::Lemmatizer;

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("lice", "louse"),
    ("wolves", "wolf"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("wives", "wife"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("calves", "calf"),
    ("loaves", "loaf"),
    ("thieves", "thief"),
    ("shoes", "shoe"),
    ("toes", "toe"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("data", "datum"),
];

/// Suffixes that look plural but are not.
const INVARIANT_ENDINGS: &[&str] = &["ss", "us", "is", "ous"];

/// English plural-undoing lemmatizer.
#[derive(Debug, Clone)]
pub struct RuleLemmatizer {
    irregular: AHashMap<String, String>,
}

impl Default for RuleLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleLemmatizer {
    /// Create a lemmatizer with the built-in irregular table.
    pub fn new() -> Self {
        let irregular = IRREGULAR_PLURALS
            .iter()
            .map(|(form, lemma)| (form.to_string(), lemma.to_string()))
            .collect();
        RuleLemmatizer { irregular }
    }

    /// Add or override an irregular form.
    pub fn with_irregular<F: Into<String>, L: Into<String>>(mut self, form: F, lemma: L) -> Self {
        self.irregular.insert(form.into(), lemma.into());
        self
    }

    fn strip_plural(word: &str) -> String {
        if word.chars().count() <= 3 || INVARIANT_ENDINGS.iter().any(|e| word.ends_with(e)) {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("ies") {
            if stem.chars().count() >= 2 {
                return format!("{stem}y");
            }
        }

        for suffix in ["sses", "xes", "ches", "shes", "zzes", "oes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }

        match word.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        }
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize_word(&self, word: &str) -> String {
        if let Some(lemma) = self.irregular.get(word) {
            return lemma.clone();
        }
        if !word.chars().all(|c| c.is_alphabetic()) {
            return word.to_string();
        }
        Self::strip_plural(word)
    }

    fn name(&self) -> &'static str {
        "rule"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let lemmatizer = RuleLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize_word("dogs"), "dog");
        assert_eq!(lemmatizer.lemmatize_word("puppies"), "puppy");
        assert_eq!(lemmatizer.lemmatize_word("boxes"), "box");
        assert_eq!(lemmatizer.lemmatize_word("churches"), "church");
        assert_eq!(lemmatizer.lemmatize_word("classes"), "class");
        assert_eq!(lemmatizer.lemmatize_word("potatoes"), "potato");
    }

    #[test]
    fn test_invariant_words() {
        let lemmatizer = RuleLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize_word("glass"), "glass");
        assert_eq!(lemmatizer.lemmatize_word("octopus"), "octopus");
        assert_eq!(lemmatizer.lemmatize_word("analysis"), "analysis");
        assert_eq!(lemmatizer.lemmatize_word("bus"), "bus");
        assert_eq!(lemmatizer.lemmatize_word("k9s"), "k9s");
    }

    #[test]
    fn test_irregular_plurals() {
        let lemmatizer = RuleLemmatizer::new().with_irregular("cacti", "cactus");

        assert_eq!(lemmatizer.lemmatize_word("children"), "child");
        assert_eq!(lemmatizer.lemmatize_word("wolves"), "wolf");
        assert_eq!(lemmatizer.lemmatize_word("cacti"), "cactus");
    }

    #[test]
    fn test_name() {
        assert_eq!(RuleLemmatizer::new().name(), "rule");
    }
}
