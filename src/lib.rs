//! Decode CSV rows into statically declared record types.
//!
//! ```
//! csv_records::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Person {
//!         pub first_name: String,
//!         pub age: u32,
//!     }
//! }
//!
//! let data = "first_name,age\nAlice,30\nBob,25\n";
//! let people: Vec<Person> =
//!     csv_records::parse(data.as_bytes(), csv_records::ReaderOptions::default()).unwrap();
//! assert_eq!(people.len(), 2);
//! assert_eq!(people[1].age, 25);
//! ```
//!
//! Headers are converted from snake_case to TitleCase before they are matched
//! against field names. Use [`HeaderMode::None`] to match headers verbatim, or
//! [`ReaderOptions::with_header_transform`] for any other convention.

pub mod cli;
pub mod decode;
pub mod error;
pub mod fields;
pub mod headers;
pub mod headers_cmd;
pub mod io_utils;
mod macros;
pub mod options;
pub mod reader;
pub mod roster;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result as AnyResult;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

pub use crate::{
    error::{Error, Result},
    fields::{FieldDescriptor, FieldKind, FieldValue, Record, TypeShape, Visibility, introspect},
    headers::{Binding, HeaderMode, bind_headers, snake_to_title, transform_headers},
    options::ReaderOptions,
    reader::{RecordReader, parse, parse_path},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_records", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> AnyResult<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::People(args) => roster::execute(&args),
        Commands::Headers(args) => headers_cmd::execute(&args),
    }
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
