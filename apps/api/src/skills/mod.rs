// Skill identification: the static keyword dictionary, the regex matcher built
// from it, and the model-backed extractor. All skill strings are lowercase.

pub mod ai_extractor;
pub mod dictionary;
pub mod matcher;
pub mod prompts;

use std::collections::BTreeSet;

/// A set of distinct lowercase skill names.
pub type SkillSet = BTreeSet<String>;
