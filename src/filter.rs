use crate::error::{Error, Result};
use crate::types::{Record, StateCode};
use serde::Serialize;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Which records a view should show
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StateFilter {
    /// No filtering - keep all records
    #[default]
    All,
    /// Only records tied to this state
    State(StateCode),
}

impl From<&str> for StateFilter {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "all" | "all states" => StateFilter::All,
            _ => match StateCode::new(trimmed.to_uppercase()) {
                Ok(code) => StateFilter::State(code),
                Err(_) => {
                    tracing::warn!("Unrecognized state filter '{}', showing all states", trimmed);
                    StateFilter::All
                }
            },
        }
    }
}

impl FromStr for StateFilter {
    type Err = Error;

    /// Like `From<&str>`, but an unparseable code is an error instead of "all"
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "all" | "all states" => Ok(StateFilter::All),
            _ => Ok(StateFilter::State(StateCode::new(trimmed.to_uppercase())?)),
        }
    }
}

/// Filter result indicating whether a record should be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    Keep,
    FilterOut,
}

impl StateFilter {
    pub fn matches(&self, record: &Record) -> FilterResult {
        match self {
            StateFilter::All => FilterResult::Keep,
            StateFilter::State(code) if record.has_state(code) => FilterResult::Keep,
            StateFilter::State(_) => FilterResult::FilterOut,
        }
    }

    /// Whether markers for `state` belong in this view
    pub fn allows_state(&self, state: &StateCode) -> bool {
        match self {
            StateFilter::All => true,
            StateFilter::State(code) => code == state,
        }
    }
}

/// Records kept by `filter`, in their original order
pub fn filter_records(records: &[Record], filter: &StateFilter) -> Vec<Record> {
    records
        .iter()
        .filter(|r| filter.matches(r) == FilterResult::Keep)
        .cloned()
        .collect()
}

/// Every state mentioned by at least one record, sorted
pub fn distinct_states(records: &[Record]) -> BTreeSet<StateCode> {
    records
        .iter()
        .flat_map(|r| r.states.iter().cloned())
        .collect()
}

/// Headline numbers for a record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_organizations: usize,
    pub total_states: usize,
    pub states: Vec<StateCode>,
}

impl Summary {
    pub fn from_records(records: &[Record]) -> Self {
        let states: Vec<StateCode> = distinct_states(records).into_iter().collect();
        Self {
            total_organizations: records.len(),
            total_states: states.len(),
            states,
        }
    }
}
