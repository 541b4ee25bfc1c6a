//! sheetexport - CSV to spreadsheet-friendly downloads

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use sheetexport::config::{ExportConfig, ExportFormat};
use sheetexport::export::{export_table, ExportRequest};
use sheetexport::model::NumberPolicy;
use sheetexport::parser::CsvParser;
use sheetexport::response::with_extension;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Xml,
    Html,
    Csv,
}

impl From<CliFormat> for ExportFormat {
    fn from(f: CliFormat) -> Self {
        match f {
            CliFormat::Xml => ExportFormat::XmlSpreadsheet,
            CliFormat::Html => ExportFormat::HtmlTable,
            CliFormat::Csv => ExportFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPolicy {
    LengthCutoff,
    LeadingZeroAware,
}

impl From<CliPolicy> for NumberPolicy {
    fn from(p: CliPolicy) -> Self {
        match p {
            CliPolicy::LengthCutoff => NumberPolicy::LengthCutoff,
            CliPolicy::LeadingZeroAware => NumberPolicy::LeadingZeroAware,
        }
    }
}

/// Convert CSV into a spreadsheet-friendly download (XML Spreadsheet, HTML table, CSV)
#[derive(Parser, Debug)]
#[command(name = "sheetexport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file to convert ("-" reads stdin)
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xml")]
    format: CliFormat,

    /// Treat the first row as a header
    #[arg(long)]
    header: bool,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Rule for presenting numeric-looking cells
    #[arg(long, value_enum, default_value = "length-cutoff")]
    policy: CliPolicy,

    /// Worksheet name (XML Spreadsheet only)
    #[arg(long, default_value = "Sheet1")]
    sheet: String,

    /// Download filename (defaults to the input file stem)
    #[arg(long)]
    filename: Option<String>,

    /// Client identity used to pick the Content-Disposition form
    #[arg(long, default_value = "")]
    user_agent: String,

    /// Write the artifact here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print response headers as JSON
    #[arg(long)]
    headers_json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1), // Empty input, nothing written
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    if !cli.delimiter.is_ascii() {
        anyhow::bail!("Delimiter must be a single ASCII character");
    }

    let config = ExportConfig::new(cli.format.into())
        .with_header(cli.header)
        .with_delimiter(cli.delimiter as u8)
        .with_number_policy(cli.policy.into())
        .with_sheet_name(cli.sheet);

    let raw = read_input(&cli.input)?;
    let table = CsvParser::new()
        .with_delimiter(config.delimiter)
        .parse_bytes(&raw)
        .with_context(|| format!("Failed to parse input: {}", cli.input.display()))?;

    let filename = cli
        .filename
        .unwrap_or_else(|| default_filename(&cli.input));
    let request = ExportRequest::new(table, with_extension(&filename, config.format))
        .with_header(config.has_header);

    let Some(artifact) = export_table(&request, &config, &cli.user_agent)? else {
        return Ok(false);
    };

    // Headers go to stderr when the artifact itself is on stdout
    let headers = if cli.headers_json {
        serde_json::to_string_pretty(&artifact.headers)? + "\n"
    } else {
        artifact.headers.to_string()
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, &artifact.body)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            print!("{}", headers);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&artifact.body)?;
            stdout.flush()?;
            eprint!("{}", headers);
        }
    }

    Ok(true)
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }

    fs::read(path).with_context(|| format!("Failed to open file: {}", path.display()))
}

fn default_filename(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| *s != "-")
        .unwrap_or("export")
        .to_string()
}
