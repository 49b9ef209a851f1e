//! Skill-term normalization, the JD skill set, and the resume name projection.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::resume::SkillRecord;

/// Lower-cases and trims a skill name for comparison.
pub fn normalize_skill(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalized skill terms extracted from one job description.
///
/// Terms are unique and iterate in sorted order, so prompts built from the
/// same set are byte-identical across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct JdSkillSet(BTreeSet<String>);

impl JdSkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the normalized form of `term`. Blank terms are ignored.
    pub fn insert(&mut self, term: &str) -> bool {
        let normalized = normalize_skill(term);
        if normalized.is_empty() {
            return false;
        }
        self.0.insert(normalized)
    }

    #[cfg(test)]
    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(&normalize_skill(term))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for JdSkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = JdSkillSet::new();
        for term in iter {
            set.insert(term.as_ref());
        }
        set
    }
}

/// Skill names as the resume wrote them: input order, no normalization, no dedup.
/// Duplicates are kept because they may carry different years/last-used values.
/// Blank names are left out; a record without a name can never match.
pub fn names_of(records: &[SkillRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.skill_name.as_str())
        .filter(|name| !name.trim().is_empty())
        .collect()
}
