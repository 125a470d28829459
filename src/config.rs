use crate::error::{Error, Result};
use crate::organization::TriggerWords;
use crate::states::StateVocabulary;
use crate::types::Centroid;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// Rule tables the extractors run against
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractorConfig {
    pub vocabulary: StateVocabulary,
    pub triggers: TriggerWords,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.is_empty() {
            return Err(Error::Config(
                "State vocabulary must contain at least one code".to_string(),
            ));
        }
        Ok(())
    }
}

/// On-disk rules file. Keys that are present replace the built-in tables.
///
/// ```toml
/// trigger_words = ["is", "has", "serves"]
///
/// [states]
/// DC = [38.9072, -77.0369]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesFile {
    pub trigger_words: Option<Vec<String>>,
    pub states: Option<IndexMap<String, (f64, f64)>>,
}

impl RulesFile {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let rules = Self::from_toml_str(&content)?;
        tracing::info!("Loaded rules file {}", path.display());
        Ok(rules)
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    vocabulary: Option<StateVocabulary>,
    trigger_words: Option<Vec<String>>,
}

impl ConfigBuilder {
    /// Create a new builder with the built-in tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the state vocabulary
    pub fn vocabulary(mut self, vocabulary: StateVocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Replace the trigger words
    pub fn trigger_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trigger_words = Some(words.into_iter().map(Into::into).collect());
        self
    }

    /// Add one trigger word on top of the current set
    pub fn add_trigger_word(mut self, word: impl Into<String>) -> Self {
        let words = self.trigger_words.get_or_insert_with(|| {
            TriggerWords::standard().words().to_vec()
        });
        let word = word.into();
        if !words.contains(&word) {
            words.push(word);
        }
        self
    }

    /// Set trigger words from a comma-separated string
    pub fn trigger_words_str(mut self, words: &str) -> Result<Self> {
        let parsed: Result<Vec<String>> = words
            .split(',')
            .map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Err(Error::Config("Empty trigger word".to_string()))
                } else {
                    Ok(trimmed.to_string())
                }
            })
            .collect();

        self.trigger_words = Some(parsed?);
        Ok(self)
    }

    /// Apply a parsed rules file
    pub fn rules(mut self, rules: RulesFile) -> Result<Self> {
        if let Some(words) = rules.trigger_words {
            self.trigger_words = Some(words);
        }
        if let Some(states) = rules.states {
            if states.is_empty() {
                tracing::warn!("Rules file has an empty [states] table; keeping current vocabulary");
            } else {
                let vocabulary = StateVocabulary::from_entries(
                    states
                        .into_iter()
                        .map(|(code, (lat, lon))| (code, Centroid::new(lat, lon))),
                )?;
                self.vocabulary = Some(vocabulary);
            }
        }
        Ok(self)
    }

    /// Load and apply a TOML rules file
    pub fn rules_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let rules = RulesFile::load(path.as_ref())?;
        self.rules(rules)
    }

    /// Build the final configuration
    pub fn build(self) -> Result<ExtractorConfig> {
        let vocabulary = self.vocabulary.unwrap_or_default();
        let triggers = match self.trigger_words {
            Some(words) => TriggerWords::new(words)?,
            None => TriggerWords::default(),
        };

        let config = ExtractorConfig {
            vocabulary,
            triggers,
        };
        config.validate()?;
        Ok(config)
    }
}
