use crate::error::{Error, Result};
use crate::types::Record;
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

/// Serialization formats for a record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(Error::Config(format!(
                "Invalid format '{}'. Allowed values are: json, csv, yaml",
                other
            ))),
        }
    }
}

/// One exported row: `Organization, States, Description`
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Organization")]
    organization: &'a str,
    #[serde(rename = "States")]
    states: String,
    #[serde(rename = "Description")]
    description: &'a str,
}

/// Write records as CSV with a header row
pub fn write_csv<W: Write>(records: &[Record], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    if records.is_empty() {
        wtr.write_record(["Organization", "States", "Description"])?;
    }
    for record in records {
        wtr.serialize(CsvRow {
            organization: &record.organization,
            states: record.states_joined(),
            description: &record.description,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(records: &[Record]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::Config(format!("CSV output is not UTF-8: {}", e)))
}

pub fn to_json_string(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn to_yaml_string(records: &[Record]) -> Result<String> {
    Ok(serde_yaml::to_string(records)?)
}

/// Render records in the requested format
pub fn render(records: &[Record], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json_string(records),
        OutputFormat::Csv => to_csv_string(records),
        OutputFormat::Yaml => to_yaml_string(records),
    }
}
