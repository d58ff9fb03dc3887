//! Set of recognition language codes
//!
//! Requests name languages as a comma-separated list (`"en,ar"`). Two lists
//! naming the same languages in a different order are the same set, which is
//! what the detector cache keys on.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// An order-insensitive, de-duplicated set of language codes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageSet(BTreeSet<String>);

impl LanguageSet {
    /// Parse a comma-separated list of language codes
    ///
    /// Codes are trimmed and lowercased; empty entries and duplicates are
    /// dropped.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let mut codes = BTreeSet::new();
        for raw in input.split(',') {
            let code = raw.trim().to_lowercase();
            if code.is_empty() {
                continue;
            }
            if !code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return Err(DomainError::InvalidLanguageCode(code));
            }
            codes.insert(code);
        }

        if codes.is_empty() {
            return Err(DomainError::InvalidLanguageSet(format!(
                "no language codes in '{input}'"
            )));
        }

        Ok(Self(codes))
    }

    /// Iterate over the codes in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of languages in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a parsed set; present for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether a code is part of the set
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.0.iter().map(String::as_str).collect::<Vec<_>>().join(",");
        f.write_str(&joined)
    }
}

impl FromStr for LanguageSet {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageSet {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageSet> for String {
    fn from(value: LanguageSet) -> Self {
        value.to_string()
    }
}
