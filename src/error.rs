//! Error type shared by every stage of record decoding.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid type {found}; must be a struct")]
    InvalidType { found: &'static str },

    #[error("no visible fields")]
    NoVisibleFields,

    #[error("no exported fields")]
    NoExportedFields,

    #[error("missing {}: {}", header_noun(.missing), .missing.join(", "))]
    MissingHeaders { missing: Vec<String> },

    #[error("unsupported type: {kind}")]
    UnsupportedType { kind: &'static str },

    #[error("failed to convert \"{value}\" to {target}")]
    Conversion { value: String, target: &'static str },

    #[error("row has {len} cell(s) but field {field} is bound to column {index}")]
    MissingCell {
        field: String,
        index: usize,
        len: usize,
    },

    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn conversion(value: &str, target: &'static str) -> Self {
        Error::Conversion {
            value: value.to_string(),
            target,
        }
    }
}

fn header_noun(missing: &[String]) -> &'static str {
    if missing.len() > 1 { "headers" } else { "header" }
}
