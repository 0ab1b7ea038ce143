//! Rule templates, one per relation kind.
//!
//! A template is plain text holding one or more alternative rule bodies
//! separated by blank lines. Lines starting with `#` are comments. Each body
//! may reference the caller's term through the `$query` placeholder and mark
//! the extracted term with a `result:` capture.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaxonomerError};

/// Taxonomic relation kinds with a built-in rule template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Hypernym,
    Hyponym,
    Cohyponym,
}

impl RelationKind {
    /// All relation kinds.
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Hypernym,
        RelationKind::Hyponym,
        RelationKind::Cohyponym,
    ];

    /// Name of the template file for this relation.
    pub fn file_name(&self) -> &'static str {
        match self {
            RelationKind::Hypernym => "hypernym.rules",
            RelationKind::Hyponym => "hyponym.rules",
            RelationKind::Cohyponym => "cohyponym.rules",
        }
    }

    fn builtin_source(&self) -> &'static str {
        match self {
            RelationKind::Hypernym => include_str!("../../rules/hypernym.rules"),
            RelationKind::Hyponym => include_str!("../../rules/hyponym.rules"),
            RelationKind::Cohyponym => include_str!("../../rules/cohyponym.rules"),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Hypernym => write!(f, "hypernym"),
            RelationKind::Hyponym => write!(f, "hyponym"),
            RelationKind::Cohyponym => write!(f, "cohyponym"),
        }
    }
}

impl FromStr for RelationKind {
    type Err = TaxonomerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hypernym" | "hypernyms" => Ok(RelationKind::Hypernym),
            "hyponym" | "hyponyms" => Ok(RelationKind::Hyponym),
            "cohyponym" | "cohyponyms" | "co-hyponym" | "co-hyponyms" => {
                Ok(RelationKind::Cohyponym)
            }
            other => Err(TaxonomerError::invalid_argument(format!(
                "Unknown relation kind '{other}'"
            ))),
        }
    }
}

/// A parsed rule template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTemplate {
    rules: Vec<String>,
}

impl RuleTemplate {
    /// Split template text into rule bodies.
    ///
    /// ```
    /// use taxonomer::query::template::RuleTemplate;
    ///
    /// let template = RuleTemplate::parse("# comment\n$query \"such\" \"as\" result:[]\n\nresult:[] \"and\" $query\n");
    /// assert_eq!(template.rules().len(), 2);
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut rules = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with('#') {
                continue;
            }
            if trimmed.is_empty() {
                if !current.is_empty() {
                    rules.push(current.join("\n"));
                    current.clear();
                }
            } else {
                current.push(trimmed);
            }
        }
        if !current.is_empty() {
            rules.push(current.join("\n"));
        }

        RuleTemplate { rules }
    }

    /// Rule bodies in file order.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Whether the template has no rule bodies.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The rule templates for every relation kind.
#[derive(Debug, Clone)]
pub struct RuleSet {
    templates: HashMap<RelationKind, RuleTemplate>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleSet {
    /// Rule templates compiled into the library.
    pub fn builtin() -> Self {
        let templates = RelationKind::ALL
            .iter()
            .map(|kind| (*kind, RuleTemplate::parse(kind.builtin_source())))
            .collect();
        RuleSet { templates }
    }

    /// Load `hypernym.rules`, `hyponym.rules` and `cohyponym.rules` from a
    /// directory. Every file must exist and hold at least one rule body.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut templates = HashMap::new();

        for kind in RelationKind::ALL {
            let path = dir.join(kind.file_name());
            let text = fs::read_to_string(&path).map_err(|e| {
                TaxonomerError::configuration(format!(
                    "Failed to read {kind} rules '{}': {e}",
                    path.display()
                ))
            })?;

            let template = RuleTemplate::parse(&text);
            if template.is_empty() {
                return Err(TaxonomerError::configuration(format!(
                    "Rule file '{}' contains no rules",
                    path.display()
                )));
            }
            templates.insert(kind, template);
        }

        log::info!("Loaded rule templates from '{}'", dir.display());
        Ok(RuleSet { templates })
    }

    /// Get the template for a relation kind.
    pub fn get(&self, kind: RelationKind) -> Result<&RuleTemplate> {
        self.templates
            .get(&kind)
            .ok_or_else(|| TaxonomerError::configuration(format!("No rules for relation '{kind}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_segments() {
        let template = RuleTemplate::parse(
            "# header comment\n\n$query \"such\"\n  \"as\" result:[]\n\n\n# second\nresult:[] \"and\" $query\n",
        );
        assert_eq!(template.rules().len(), 2);
        assert_eq!(template.rules()[0], "$query \"such\"\n\"as\" result:[]");
        assert_eq!(template.rules()[1], "result:[] \"and\" $query");
    }

    #[test]
    fn test_builtin_rules_present() {
        let rules = RuleSet::builtin();
        for kind in RelationKind::ALL {
            let template = rules.get(kind).unwrap();
            assert!(!template.is_empty());
            assert!(template.rules().iter().all(|r| r.contains("$query")));
        }
    }

    #[test]
    fn test_load_missing_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hypernym.rules"), "result:[] \"and\" $query\n").unwrap();

        let result = RuleSet::load(dir.path());
        assert!(matches!(result, Err(TaxonomerError::Configuration(_))));
    }

    #[test]
    fn test_load_directory() {
        let dir = TempDir::new().unwrap();
        for kind in RelationKind::ALL {
            fs::write(dir.path().join(kind.file_name()), "$query result:[]\n").unwrap();
        }

        let rules = RuleSet::load(dir.path()).unwrap();
        assert_eq!(rules.get(RelationKind::Hyponym).unwrap().rules().len(), 1);
    }

    #[test]
    fn test_empty_rule_file_rejected() {
        let dir = TempDir::new().unwrap();
        for kind in RelationKind::ALL {
            fs::write(dir.path().join(kind.file_name()), "# nothing here\n").unwrap();
        }
        assert!(RuleSet::load(dir.path()).is_err());
    }

    #[test]
    fn test_relation_kind_from_str() {
        assert_eq!("Hyponyms".parse::<RelationKind>().unwrap(), RelationKind::Hyponym);
        assert_eq!("co-hyponym".parse::<RelationKind>().unwrap(), RelationKind::Cohyponym);
        assert!("meronym".parse::<RelationKind>().is_err());
    }
}
