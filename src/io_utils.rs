//! I/O utilities for opening CSV sources.
//!
//! - **Encoding**: input is decoded through `encoding_rs_io`, defaulting to
//!   UTF-8 with byte-order-mark sniffing.
//! - **Reader construction**: `open_csv_reader` configures the tokenizer the
//!   same way for every source.
//! - **stdin**: the `-` path convention routes through standard input.

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use csv::StringRecord;
use encoding_rs::{Encoding, UTF_8};
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};

use crate::error::{Error, Result};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const UTF8_BOM: char = '\u{feff}';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| Error::UnknownEncoding(value.to_string()))
    } else {
        Ok(UTF_8)
    }
}

/// Wraps `reader` so the tokenizer always sees UTF-8.
///
/// UTF-8 input passes through untouched (invalid bytes are left for the
/// tokenizer to report); any other encoding is transcoded. A leading BOM
/// overrides the configured encoding.
pub fn decoding_reader<R: Read>(
    reader: R,
    encoding: &'static Encoding,
) -> DecodeReaderBytes<R, Vec<u8>> {
    let explicit = (encoding != UTF_8).then_some(encoding);
    DecodeReaderBytesBuilder::new()
        .encoding(explicit)
        .utf8_passthru(true)
        .build(reader)
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(false);
    builder.from_reader(reader)
}

pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    let reader: Box<dyn Read> = if is_dash(path) {
        Box::new(std::io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(path)?))
    };
    Ok(reader)
}

/// Removes a byte-order-mark left on the first header cell.
pub fn strip_bom(cell: &str) -> &str {
    cell.strip_prefix(UTF8_BOM).unwrap_or(cell)
}

/// Reads the first record as the header row. A source without one fails with
/// an [`io::ErrorKind::UnexpectedEof`] error.
pub fn read_header_row<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<String>> {
    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input has no header row",
        )));
    }
    Ok(record
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            if idx == 0 {
                strip_bom(cell).to_string()
            } else {
                cell.to_string()
            }
        })
        .collect())
}
