//! Turns raw bullet-point text into records.

use crate::config::ExtractorConfig;
use crate::organization::{extract_organization, TriggerWords};
use crate::states::{recognize_states, StateVocabulary};
use crate::types::{ParseReport, Record, SkipReason, SkippedLine};
use std::borrow::Cow;

/// Parses text against an explicit set of rule tables
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    config: Option<ExtractorConfig>,
}

impl RecordParser {
    /// Parser using the built-in vocabulary and trigger words
    pub fn new() -> Self {
        Self { config: None }
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self {
            config: Some(config),
        }
    }

    fn vocabulary(&self) -> &StateVocabulary {
        match &self.config {
            Some(config) => &config.vocabulary,
            None => StateVocabulary::us_states(),
        }
    }

    fn triggers(&self) -> &TriggerWords {
        match &self.config {
            Some(config) => &config.triggers,
            None => TriggerWords::standard(),
        }
    }

    /// Parse text into records, dropping lines that do not yield one
    pub fn parse(&self, raw_text: &str) -> Vec<Record> {
        self.parse_with_report(raw_text).records
    }

    /// Parse text into records and keep a note of every dropped line
    pub fn parse_with_report(&self, raw_text: &str) -> ParseReport {
        let mut report = ParseReport::default();

        for (idx, raw_line) in raw_text.lines().enumerate() {
            let trimmed = raw_line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match self.build_record(trimmed) {
                Ok(record) => report.records.push(record),
                Err(reason) => {
                    tracing::debug!(line = idx + 1, %reason, "skipping line: {}", trimmed);
                    report.skipped.push(SkippedLine {
                        line_number: idx + 1,
                        line: trimmed.to_string(),
                        reason,
                    });
                }
            }
        }

        tracing::info!(
            records = report.records.len(),
            skipped = report.skipped.len(),
            "parsed input"
        );
        report
    }

    /// Build a record from one trimmed, non-empty line
    pub fn build_record(&self, line: &str) -> Result<Record, SkipReason> {
        let description = strip_bullet(line);

        let organization = extract_organization(&description, self.triggers())
            .ok_or(SkipReason::NoOrganization)?;

        let states = recognize_states(&description, self.vocabulary());
        if states.is_empty() {
            return Err(SkipReason::NoStates);
        }

        Ok(Record {
            organization,
            states,
            description: description.into_owned(),
        })
    }
}

/// Remove leading `*` bullet markers and the whitespace around them
fn strip_bullet(line: &str) -> Cow<'_, str> {
    let stripped = line.trim_start_matches(|c: char| c == '*' || c.is_whitespace());
    if stripped.len() == line.len() {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(stripped.to_string())
    }
}

/// Parse text with the built-in rule tables
pub fn parse(raw_text: &str) -> Vec<Record> {
    RecordParser::new().parse(raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;

    fn codes(record: &Record) -> Vec<&str> {
        record.states.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn test_red_cross_line() {
        let line = "* American Red Cross (ARC) is active in CA, NY, and TX with volunteers";
        let records = parse(line);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].organization, "American Red Cross");
        assert_eq!(codes(&records[0]), vec!["CA", "NY", "TX"]);
        assert_eq!(
            records[0].description,
            "American Red Cross (ARC) is active in CA, NY, and TX with volunteers"
        );
    }

    #[test]
    fn test_random_note_yields_nothing() {
        assert!(parse("Random note without any state code or trigger verb").is_empty());
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_states_anywhere_in_line() {
        let records = parse("Org X has teams in OH");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].organization, "Org X");
        assert_eq!(codes(&records[0]), vec!["OH"]);
    }

    #[test]
    fn test_state_in_name_counts() {
        // The recognizer runs on the whole line, including the name itself.
        let records = parse("NY Cares is recruiting volunteers");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].organization, "NY Cares");
        assert_eq!(codes(&records[0]), vec!["NY"]);
    }

    #[test]
    fn test_order_follows_input() {
        let text = "\
* Zeta Relief is in WA
* not a record
* Alpha Aid has a hub in FL and GA
*   Beta Fund works in OH
";
        let records = parse(text);
        let names: Vec<&str> = records.iter().map(|r| r.organization.as_str()).collect();
        assert_eq!(names, vec!["Zeta Relief", "Alpha Aid", "Beta Fund"]);
        assert_eq!(records[2].description, "Beta Fund works in OH");
    }

    #[test]
    fn test_report_reasons() {
        let text = "Random note\n\nShelter Co is open in Ohio\n* Food Bank is open in MN";
        let report = RecordParser::new().parse_with_report(text);

        assert_eq!(report.records.len(), 1);
        assert_eq!(
            report.skipped,
            vec![
                SkippedLine {
                    line_number: 1,
                    line: "Random note".to_string(),
                    reason: SkipReason::NoOrganization,
                },
                SkippedLine {
                    line_number: 3,
                    line: "Shelter Co is open in Ohio".to_string(),
                    reason: SkipReason::NoStates,
                },
            ]
        );
    }

    #[test]
    fn test_bullet_and_whitespace_stripping() {
        assert_eq!(strip_bullet("** \t Org is in CA"), "Org is in CA");
        assert_eq!(strip_bullet("Org is in CA *"), "Org is in CA *");
        assert!(matches!(strip_bullet("Org"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_windows_line_endings() {
        let records = parse("* Org A is in CA\r\n* Org B is in NV\r\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "Org A is in CA");
    }

    #[test]
    fn test_custom_config() {
        let config = ConfigBuilder::new()
            .trigger_words(["serves"])
            .build()
            .unwrap();
        let parser = RecordParser::with_config(config);

        assert!(parser.parse("Food Bank is open in MN").is_empty());
        let records = parser.parse("Food Bank serves MN");
        assert_eq!(records[0].organization, "Food Bank");
    }

    #[test]
    fn test_idempotent() {
        let text = "* Org A is in CA, NV\n* Org B (OB) in TX\nnothing here";
        assert_eq!(parse(text), parse(text));
    }
}
