use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use org_state_analyzer::export::{self, OutputFormat};
use org_state_analyzer::prelude::*;
use org_state_analyzer::{build_markers, Summary};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Extract organization/state records from bullet-point text
#[derive(Parser, Debug)]
#[command(name = "orgstate")]
#[command(about = "Find organizations and the U.S. states they work in")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log skipped lines and rule loading (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input text file, or "-" for stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// TOML rules file replacing the trigger words and/or state table
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Comma-separated trigger words (e.g. "is,has,serves")
    #[arg(long)]
    triggers: Option<String>,

    /// Only keep records for this state code ("All States" for no filter).
    /// `summary` always reports totals over every record.
    #[arg(long, default_value = "All States")]
    state: String,
}

impl InputArgs {
    fn state_filter(&self) -> Result<StateFilter> {
        self.state
            .parse::<StateFilter>()
            .with_context(|| format!("Invalid --state value '{}'", self.state))
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse text into records
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Output format: json, csv or yaml
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print skipped lines and why they were skipped to stderr
        #[arg(long)]
        report: bool,
    },

    /// Lay out map markers (one per organization and state) as JSON
    Map {
        #[command(flatten)]
        input: InputArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show record and state counts
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },

    /// List the state vocabulary
    States {
        /// TOML rules file replacing the state table
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))
    }
}

fn build_config(rules: Option<&PathBuf>, triggers: Option<&str>) -> Result<ExtractorConfig> {
    let mut builder = ConfigBuilder::new();
    if let Some(path) = rules {
        builder = builder
            .rules_file(path)
            .with_context(|| format!("Failed to load rules file: {}", path.display()))?;
    }
    if let Some(words) = triggers {
        builder = builder.trigger_words_str(words)?;
    }
    Ok(builder.build()?)
}

fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, content)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            eprintln!("Output written to: {}", path.display());
        }
        None => {
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Parse {
            input,
            format,
            output,
            report,
        } => parse_command(input, &format, output, report),
        Command::Map { input, output } => map_command(input, output),
        Command::Summary { input } => summary_command(input),
        Command::States { rules } => states_command(rules),
    }
}

fn parse_command(
    input: InputArgs,
    format: &str,
    output: Option<PathBuf>,
    report: bool,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let config = build_config(input.rules.as_ref(), input.triggers.as_deref())?;
    let text = read_input(&input.input)?;

    let filter = input.state_filter()?;
    let parsed = RecordParser::with_config(config).parse_with_report(&text);
    if report {
        for skipped in &parsed.skipped {
            eprintln!("line {}: {} ({})", skipped.line_number, skipped.reason, skipped.line);
        }
        eprintln!(
            "{} records, {} lines skipped",
            parsed.records.len(),
            parsed.skipped.len()
        );
    }

    let records = filter_records(&parsed.records, &filter);
    let rendered = export::render(&records, format)?;
    write_output(output.as_ref(), &rendered)
}

fn map_command(input: InputArgs, output: Option<PathBuf>) -> Result<()> {
    let config = build_config(input.rules.as_ref(), input.triggers.as_deref())?;
    let filter = input.state_filter()?;
    let text = read_input(&input.input)?;

    let records = RecordParser::with_config(config.clone()).parse(&text);
    let layout = build_markers(&records, &config.vocabulary, &filter);

    let json = serde_json::to_string_pretty(&layout)?;
    write_output(output.as_ref(), &json)
}

fn summary_command(input: InputArgs) -> Result<()> {
    let config = build_config(input.rules.as_ref(), input.triggers.as_deref())?;
    let filter = input.state_filter()?;
    let text = read_input(&input.input)?;

    let records = RecordParser::with_config(config).parse(&text);
    let summary = Summary::from_records(&records);

    println!("Total Organizations: {}", summary.total_organizations);
    println!("Total States: {}", summary.total_states);
    if !summary.states.is_empty() {
        let states: Vec<&str> = summary.states.iter().map(StateCode::as_str).collect();
        println!("States: {}", states.join(", "));
    }
    if let StateFilter::State(code) = &filter {
        println!("Records in {}: {}", code, filter_records(&records, &filter).len());
    }
    Ok(())
}

fn states_command(rules: Option<PathBuf>) -> Result<()> {
    let config = build_config(rules.as_ref(), None)?;

    for (code, centroid) in config.vocabulary.iter() {
        println!(
            "{}\t{:.4}\t{:.4}",
            code, centroid.latitude, centroid.longitude
        );
    }
    Ok(())
}
