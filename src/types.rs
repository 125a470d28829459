use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Two-letter uppercase postal code, e.g. `CA`
///
/// Only the shape is checked here. Membership in a vocabulary is checked by
/// whoever holds the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateCode(pub(crate) String);

impl StateCode {
    /// Build a code, rejecting anything that is not two ASCII uppercase letters
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(Error::InvalidStateCode(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StateCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        StateCode::new(value)
    }
}

impl TryFrom<&str> for StateCode {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        StateCode::new(value)
    }
}

impl From<StateCode> for String {
    fn from(code: StateCode) -> Self {
        code.0
    }
}

impl std::borrow::Borrow<str> for StateCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Approximate geographic centroid of a state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub latitude: f64,
    pub longitude: f64,
}

impl Centroid {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One organization mentioned in the text, with the states it was tied to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Record {
    /// Display name, trimmed and never empty
    pub organization: String,
    /// Sorted, deduplicated and never empty
    pub states: BTreeSet<StateCode>,
    /// The source line with its bullet marker removed
    pub description: String,
}

/// Unchecked wire shape of a [`Record`]
#[derive(Debug, Deserialize)]
struct RawRecord {
    organization: String,
    states: BTreeSet<StateCode>,
    description: String,
}

impl TryFrom<RawRecord> for Record {
    type Error = Error;

    fn try_from(raw: RawRecord) -> Result<Self> {
        if raw.organization.trim().is_empty() {
            return Err(Error::Config("Record organization is empty".to_string()));
        }
        if raw.organization.trim() != raw.organization {
            return Err(Error::Config(format!(
                "Record organization '{}' has surrounding whitespace",
                raw.organization
            )));
        }
        if raw.states.is_empty() {
            return Err(Error::Config(format!(
                "Record for '{}' has no states",
                raw.organization
            )));
        }
        Ok(Record {
            organization: raw.organization,
            states: raw.states,
            description: raw.description,
        })
    }
}

impl Record {
    /// States joined the way tables and exports show them: `CA, NY, TX`
    pub fn states_joined(&self) -> String {
        self.states
            .iter()
            .map(StateCode::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn has_state(&self, code: &StateCode) -> bool {
        self.states.contains(code)
    }
}

/// Why a non-empty line produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No parenthetical or trigger word ends an organization name
    NoOrganization,
    /// An organization was found but no known state code
    NoStates,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoOrganization => f.write_str("no organization name found"),
            SkipReason::NoStates => f.write_str("no state code found"),
        }
    }
}

/// A line that was dropped, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based position in the raw input, blank lines included
    pub line_number: usize,
    pub line: String,
    pub reason: SkipReason,
}

/// Records plus everything that was skipped on the way
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedLine>,
}
