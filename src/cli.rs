use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{headers::HeaderMode, io_utils::DEFAULT_CSV_DELIMITER, options::ReaderOptions};

#[derive(Debug, Parser)]
#[command(author, version, about = "Decode CSV files into typed records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode a people roster (first_name, last_name, age, email, active)
    People(PeopleArgs),
    /// Show how each header is rewritten before binding
    Headers(HeadersArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input CSV file ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Header naming convention used by the input
    #[arg(long = "header-mode", value_enum, default_value_t = HeaderMode::SnakeToTitle)]
    pub header_mode: HeaderMode,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

impl InputArgs {
    pub fn reader_options(&self) -> ReaderOptions {
        let mut options = ReaderOptions::new()
            .with_header_mode(self.header_mode)
            .with_delimiter(self.delimiter.unwrap_or(DEFAULT_CSV_DELIMITER));
        if let Some(label) = &self.input_encoding {
            options = options.with_input_encoding(label.clone());
        }
        options
    }
}

#[derive(Debug, Args)]
pub struct PeopleArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Output format for decoded records
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct HeadersArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
