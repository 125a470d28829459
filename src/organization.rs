//! Organization name extraction.
//!
//! A name runs from the start of the line up to the earliest boundary: an
//! opening parenthesis, or one of a closed set of trigger verbs.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Verbs that end an organization name, e.g. "Red Cross *is* active in ..."
pub const DEFAULT_TRIGGER_WORDS: &[&str] = &[
    "is",
    "has",
    "have",
    "works",
    "working",
    "connects",
    "recruiting",
    "mobilized",
    "organized",
];

/// A closed set of trigger words compiled into a boundary pattern
#[derive(Debug, Clone)]
pub struct TriggerWords {
    words: Vec<String>,
    boundary: Regex,
}

impl TriggerWords {
    /// Compile a trigger set. Each word must be a single alphanumeric token.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for word in words {
            let word = word.into();
            let word = word.trim();
            if word.is_empty() {
                return Err(Error::Config("Empty trigger word".to_string()));
            }
            // The boundary pattern ends in `\b`, which never follows punctuation.
            if !word.chars().all(char::is_alphanumeric) {
                return Err(Error::Config(format!(
                    "Trigger word '{}' must contain only letters and digits",
                    word
                )));
            }
            if !list.iter().any(|w| w == word) {
                list.push(word.to_string());
            }
        }

        if list.is_empty() {
            return Err(Error::Config(
                "At least one trigger word is required".to_string(),
            ));
        }

        let alternation = list
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        // Either an opening parenthesis, or whitespace followed by a whole trigger word.
        let boundary = Regex::new(&format!(r"\s*\(|\s+(?:{})\b", alternation))?;

        Ok(Self {
            words: list,
            boundary,
        })
    }

    /// The built-in trigger set, compiled on first use
    pub fn standard() -> &'static TriggerWords {
        static STANDARD: OnceLock<TriggerWords> = OnceLock::new();
        STANDARD.get_or_init(|| {
            TriggerWords::new(DEFAULT_TRIGGER_WORDS.iter().copied())
                .expect("built-in trigger words compile")
        })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Byte offset where the organization name ends, if any boundary exists
    fn boundary_in(&self, line: &str) -> Option<usize> {
        self.boundary.find(line).map(|m| m.start())
    }
}

impl Default for TriggerWords {
    fn default() -> Self {
        Self::standard().clone()
    }
}

impl PartialEq for TriggerWords {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

/// Extract the organization name from a bullet line.
///
/// Returns `None` when no boundary is found, when the text before the boundary
/// is blank, or when it contains a stray parenthesis.
pub fn extract_organization(line: &str, triggers: &TriggerWords) -> Option<String> {
    let end = triggers.boundary_in(line)?;
    let candidate = &line[..end];

    if candidate.contains(')') {
        return None;
    }

    let name = candidate.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(line: &str) -> Option<String> {
        extract_organization(line, TriggerWords::standard())
    }

    #[test]
    fn test_parenthetical_boundary() {
        assert_eq!(
            extract("American Red Cross (ARC) is active in CA, NY, and TX"),
            Some("American Red Cross".to_string())
        );
        assert_eq!(extract("Team Rubicon(TR) in FL"), Some("Team Rubicon".to_string()));
    }

    #[test]
    fn test_trigger_boundary() {
        assert_eq!(extract("Org X has teams in OH"), Some("Org X".to_string()));
        assert_eq!(
            extract("World Central Kitchen is cooking in NC"),
            Some("World Central Kitchen".to_string())
        );
        assert_eq!(
            extract("Local churches have organized drives in GA"),
            Some("Local churches".to_string())
        );
        assert_eq!(
            extract("Mutual Aid Network connects donors in TN"),
            Some("Mutual Aid Network".to_string())
        );
    }

    #[test]
    fn test_earliest_boundary_wins() {
        assert_eq!(
            extract("Habitat is working (with partners) in SC"),
            Some("Habitat".to_string())
        );
        assert_eq!(
            extract("Crew (also working) is in VA"),
            Some("Crew".to_string())
        );
    }

    #[test]
    fn test_trigger_must_be_whole_word() {
        assert_eq!(extract("Isaiah House hasn't responded"), None);
        assert_eq!(extract("Island Aid is in HI"), Some("Island Aid".to_string()));
        assert_eq!(extract("Relief Corps hastened to TX"), None);
        assert_eq!(extract("The Works Foundation works in MI"), Some("The Works Foundation".to_string()));
    }

    #[test]
    fn test_triggers_are_case_sensitive() {
        assert_eq!(extract("Org IS active in OH"), None);
    }

    #[test]
    fn test_no_boundary() {
        assert_eq!(extract("Random note without any state code or trigger verb"), None);
        assert_eq!(extract("Org: 501c3 based in TX"), None);
        assert_eq!(extract(""), None);
    }

    #[test]
    fn test_empty_candidate() {
        assert_eq!(extract("(ARC) is active in CA"), None);
        assert_eq!(extract("   (ARC)"), None);
    }

    #[test]
    fn test_stray_closing_parenthesis() {
        assert_eq!(extract("Group A) is active in CA"), None);
    }

    #[test]
    fn test_custom_triggers() {
        let triggers = TriggerWords::new(["serves", "operates"]).unwrap();
        assert_eq!(
            extract_organization("Food Bank serves families in MN", &triggers),
            Some("Food Bank".to_string())
        );
        assert_eq!(extract_organization("Food Bank is in MN", &triggers), None);
        assert_eq!(triggers.words(), &["serves".to_string(), "operates".to_string()]);
    }

    #[test]
    fn test_trigger_words_validation() {
        assert!(TriggerWords::new(Vec::<String>::new()).is_err());
        assert!(TriggerWords::new(["  "]).is_err());
        assert!(TriggerWords::new(["works with"]).is_err());
        assert!(TriggerWords::new(["(is"]).is_err());
        assert!(TriggerWords::new(["c++"]).is_err());
        assert!(TriggerWords::new(["non-profit"]).is_err());
        let deduped = TriggerWords::new(["is", "is", " has "]).unwrap();
        assert_eq!(deduped.words(), &["is".to_string(), "has".to_string()]);
    }

    #[test]
    fn test_standard_matches_default_list() {
        let compiled = TriggerWords::new(DEFAULT_TRIGGER_WORDS.iter().copied()).unwrap();
        assert_eq!(&compiled, TriggerWords::standard());
    }
}
