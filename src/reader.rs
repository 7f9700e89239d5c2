//! Record reader: one-time header setup followed by row-by-row decoding.

use std::{io::Read, path::Path};

use csv::StringRecord;
use encoding_rs_io::DecodeReaderBytes;
use log::debug;

use crate::{
    decode::decode_row,
    error::Result,
    fields::{FieldDescriptor, Record, introspect},
    headers::{Binding, bind_headers, transform_headers},
    io_utils,
    options::ReaderOptions,
};

/// Decodes rows of `R` into `T`.
///
/// Construction introspects `T`, reads the header row, transforms it and
/// binds it to the exported fields. Every later read reuses that binding.
pub struct RecordReader<T: Record, R: Read> {
    reader: csv::Reader<DecodeReaderBytes<R, Vec<u8>>>,
    fields: Vec<FieldDescriptor<T>>,
    binding: Binding,
    row: StringRecord,
    rows_read: u64,
    exhausted: bool,
}

impl<T: Record> RecordReader<T, Box<dyn Read>> {
    /// Opens `path` (or stdin for `-`) and prepares a reader over it.
    pub fn from_path(path: &Path, options: ReaderOptions) -> Result<Self> {
        let input = io_utils::open_input(path)?;
        debug!("Opened {path:?} for {}", std::any::type_name::<T>());
        Self::from_reader(input, options)
    }
}

impl<T: Record, R: Read> RecordReader<T, R> {
    pub fn from_reader(source: R, options: ReaderOptions) -> Result<Self> {
        let fields = introspect::<T>()?;
        let encoding = io_utils::resolve_encoding(options.input_encoding.as_deref())?;
        let mut reader = io_utils::open_csv_reader(
            io_utils::decoding_reader(source, encoding),
            options.delimiter,
        );

        let raw_headers = io_utils::read_header_row(&mut reader)?;

        let headers = transform_headers(
            &raw_headers,
            options.header_mode,
            options.header_transform.as_deref(),
        );
        debug!("Header row {raw_headers:?} transformed to {headers:?}");
        let binding = bind_headers(&fields, &headers)?;

        Ok(Self {
            reader,
            fields,
            binding,
            row: StringRecord::new(),
            rows_read: 0,
            exhausted: false,
        })
    }

    /// Reads the next row. `Ok(None)` marks end of input and repeats on every
    /// later call.
    pub fn read_one(&mut self) -> Result<Option<T>> {
        if self.exhausted {
            return Ok(None);
        }
        if !self.reader.read_record(&mut self.row)? {
            debug!("End of input after {} row(s)", self.rows_read);
            self.exhausted = true;
            return Ok(None);
        }
        let record = decode_row(&self.fields, &self.binding, &self.row)?;
        self.rows_read += 1;
        Ok(Some(record))
    }

    /// Reads every remaining row. Any error discards the rows read so far.
    pub fn read_all(&mut self) -> Result<Vec<T>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_one()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Transformed header row the binding was built from.
    pub fn headers(&self) -> &[String] {
        self.binding.headers()
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// Number of rows decoded successfully.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}

impl<T: Record, R: Read> Iterator for RecordReader<T, R> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_one().transpose()
    }
}

/// Reads every record from `reader`.
pub fn parse<T: Record, R: Read>(reader: R, options: ReaderOptions) -> Result<Vec<T>> {
    RecordReader::<T, R>::from_reader(reader, options)?.read_all()
}

/// Reads every record from the file at `path` (stdin for `-`).
pub fn parse_path<T: Record>(path: &Path, options: ReaderOptions) -> Result<Vec<T>> {
    RecordReader::<T, Box<dyn Read>>::from_path(path, options)?.read_all()
}
