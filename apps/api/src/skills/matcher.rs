//! Dictionary Matcher: finds dictionary skills in free text with a single regex.
//!
//! The alternation is compiled once per dictionary and shared read-only by all
//! requests. Every term is escaped, so entries like `c++` or `c#` are literal.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use super::dictionary::SkillDictionary;
use super::SkillSet;

const PATTERN_SIZE_LIMIT: usize = 64 * (1 << 20);

#[derive(Debug)]
pub struct SkillMatcher {
    dictionary: SkillDictionary,
    /// `None` when the dictionary is empty: an empty alternation matches nothing useful.
    pattern: Option<Regex>,
    /// Case-folded spelling of each term back to its dictionary form.
    canonical: HashMap<String, String>,
}

impl SkillMatcher {
    pub fn new(dictionary: SkillDictionary) -> Result<Self, regex::Error> {
        let pattern = if dictionary.is_empty() {
            None
        } else {
            Some(build_pattern(&dictionary)?)
        };

        let canonical = dictionary
            .iter()
            .map(|term| (fold_case(term), term.to_string()))
            .collect();

        Ok(Self {
            dictionary,
            pattern,
            canonical,
        })
    }

    pub fn dictionary(&self) -> &SkillDictionary {
        &self.dictionary
    }

    /// Returns the distinct dictionary skills present in `text`, each reported
    /// as spelled in the dictionary.
    pub fn find_skills(&self, text: &str) -> SkillSet {
        let Some(pattern) = &self.pattern else {
            return SkillSet::new();
        };

        let found: SkillSet = pattern
            .find_iter(text)
            .filter_map(|m| self.canonical.get(&fold_case(m.as_str())).cloned())
            .collect();

        debug!("Dictionary matcher found {} distinct skills", found.len());
        found
    }
}

/// Builds `(?i)(?:\bterm1\b|\bterm2\b|...)`.
///
/// A `\b` is only placed on a side of a term whose edge character is a word
/// character; `\b` next to a symbol such as the `+` in `c++` would require a
/// word character to follow it. Longer terms come first so that `c++` wins over
/// `c` at the same starting position.
fn build_pattern(dictionary: &SkillDictionary) -> Result<Regex, regex::Error> {
    let mut terms: Vec<&str> = dictionary.iter().collect();
    terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));

    let alternatives: Vec<String> = terms.into_iter().map(bounded_term).collect();
    let source = format!("(?:{})", alternatives.join("|"));

    RegexBuilder::new(&source)
        .case_insensitive(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
}

fn bounded_term(term: &str) -> String {
    let leading = term.chars().next().is_some_and(is_word_char);
    let trailing = term.chars().last().is_some_and(is_word_char);

    format!(
        "{}{}{}",
        if leading { r"\b" } else { "" },
        regex::escape(term),
        if trailing { r"\b" } else { "" }
    )
}

/// Maps spellings the case-insensitive regex treats as equal (`ſ` and `s`,
/// the Kelvin sign and `k`) onto one key.
fn fold_case(s: &str) -> String {
    s.to_uppercase().to_lowercase()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
