//! Skill Dictionary: loads the categorized keyword list and flattens it.
//!
//! The resource is a JSON object mapping a category label to an array of skill
//! names. Categories are only an authoring convenience and are dropped on load.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read skill dictionary {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("skill dictionary {path} is not a category -> [skill] object: {source}")]
    Schema {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of the dictionary resource.
type CategorizedSkills = BTreeMap<String, Vec<String>>;

/// Immutable set of known lowercase skill keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillDictionary {
    terms: BTreeSet<String>,
}

impl SkillDictionary {
    /// Builds a dictionary from raw terms, normalizing each one.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// Parses the categorized JSON form and keeps the union of all categories.
    pub fn from_json(raw: &str, origin: &str) -> Result<Self, DictionaryError> {
        let categories: CategorizedSkills =
            serde_json::from_str(raw).map_err(|source| DictionaryError::Schema {
                path: origin.to_string(),
                source,
            })?;

        Ok(Self::from_terms(categories.into_values().flatten()))
    }

    /// Loads the dictionary from `path`.
    ///
    /// A missing file is not an error: it is logged and yields an empty
    /// dictionary, which disables keyword matching. A file that exists but
    /// cannot be read or parsed is reported to the caller.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let origin = path.display().to_string();

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Skill dictionary '{origin}' not found; keyword matching disabled");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(DictionaryError::Io {
                    path: origin,
                    source,
                })
            }
        };

        let dictionary = Self::from_json(&raw, &origin)?;
        info!(
            "Loaded {} skills from dictionary '{}'",
            dictionary.len(),
            origin
        );
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}
