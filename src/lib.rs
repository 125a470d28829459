//! Heuristic extraction of organization/state records from bullet-point text.
//!
//! Each line that names an organization (ended by a parenthetical or a trigger
//! verb such as "is" or "has") and mentions at least one two-letter state code
//! becomes a [`Record`]. Everything else is dropped. The records can then be
//! filtered by state, exported, or laid out as map markers.

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod layout;
pub mod organization;
pub mod parser;
pub mod states;
pub mod types;

pub use config::{ConfigBuilder, ExtractorConfig, RulesFile};
pub use error::{Error, Result};
pub use export::OutputFormat;
pub use filter::{distinct_states, filter_records, FilterResult, StateFilter, Summary};
pub use layout::{build_markers, MapLayout, Marker};
pub use organization::{extract_organization, TriggerWords};
pub use parser::{parse, RecordParser};
pub use states::{recognize_states, StateVocabulary};
pub use types::{Centroid, ParseReport, Record, SkipReason, SkippedLine, StateCode};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigBuilder, ExtractorConfig};
    pub use crate::error::{Error, Result};
    pub use crate::filter::{filter_records, StateFilter};
    pub use crate::parser::{parse, RecordParser};
    pub use crate::states::StateVocabulary;
    pub use crate::types::{Record, StateCode};
}
