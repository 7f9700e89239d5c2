//! `people` command: decodes a roster file into [`Person`] records.

use std::io::{self, Write};

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::{
    cli::{OutputFormat, PeopleArgs},
    printable_delimiter,
    reader::RecordReader,
    table::{self, Column, TableRow},
};

crate::record! {
    #[derive(Debug, Default, Clone, PartialEq, Serialize)]
    pub struct Person {
        pub first_name: String,
        pub last_name: String,
        pub age: u32,
        pub email: String,
        pub active: bool,
    }
}

impl TableRow for Person {
    fn columns() -> Vec<Column> {
        vec![
            Column::left("first_name"),
            Column::left("last_name"),
            Column::right("age"),
            Column::left("email"),
            Column::left("active"),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.age.to_string(),
            self.email.clone(),
            self.active.to_string(),
        ]
    }
}

pub fn execute(args: &PeopleArgs) -> Result<()> {
    let options = args.input.reader_options();
    info!(
        "Reading people from '{}' with delimiter '{}'",
        args.input.input.display(),
        printable_delimiter(options.delimiter)
    );
    let mut reader = RecordReader::<Person, _>::from_path(&args.input.input, options)
        .with_context(|| format!("Opening roster {:?}", args.input.input))?;
    let people = reader
        .read_all()
        .with_context(|| format!("Decoding roster {:?}", args.input.input))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Table => write!(out, "{}", table::render_records(&people))?,
        OutputFormat::Json => {
            for person in &people {
                serde_json::to_writer(&mut out, person)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    info!("Decoded {} person record(s)", people.len());
    Ok(())
}
