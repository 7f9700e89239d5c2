//! Reader configuration applied once at construction.

use std::fmt;

use crate::{
    headers::{HeaderMode, HeaderTransform},
    io_utils::DEFAULT_CSV_DELIMITER,
};

pub struct ReaderOptions {
    pub header_mode: HeaderMode,
    pub header_transform: Option<HeaderTransform>,
    pub delimiter: u8,
    /// `encoding_rs` label of the input; UTF-8 when unset.
    pub input_encoding: Option<String>,
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header_mode(mut self, mode: HeaderMode) -> Self {
        self.header_mode = mode;
        self
    }

    /// Rewrites every header with `transform`, ignoring the header mode.
    pub fn with_header_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        self.header_transform = Some(Box::new(transform));
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_input_encoding(mut self, label: impl Into<String>) -> Self {
        self.input_encoding = Some(label.into());
        self
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            header_mode: HeaderMode::SnakeToTitle,
            header_transform: None,
            delimiter: DEFAULT_CSV_DELIMITER,
            input_encoding: None,
        }
    }
}

impl fmt::Debug for ReaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderOptions")
            .field("header_mode", &self.header_mode)
            .field("header_transform", &self.header_transform.is_some())
            .field("delimiter", &(self.delimiter as char))
            .field("input_encoding", &self.input_encoding)
            .finish()
    }
}
