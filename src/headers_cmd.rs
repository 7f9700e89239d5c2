//! `headers` command: shows each raw header next to its binding name.

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::HeadersArgs,
    headers::transform_headers,
    io_utils, printable_delimiter,
    table::{self, Column},
};

pub fn execute(args: &HeadersArgs) -> Result<()> {
    let options = args.input.reader_options();
    info!(
        "Inspecting headers of '{}' with delimiter '{}'",
        args.input.input.display(),
        printable_delimiter(options.delimiter)
    );
    let encoding = io_utils::resolve_encoding(options.input_encoding.as_deref())?;
    let input = io_utils::open_input(&args.input.input)
        .with_context(|| format!("Opening input file {:?}", args.input.input))?;
    let mut reader =
        io_utils::open_csv_reader(io_utils::decoding_reader(input, encoding), options.delimiter);

    let raw = io_utils::read_header_row(&mut reader)
        .with_context(|| format!("Reading header row of {:?}", args.input.input))?;
    let transformed = transform_headers(&raw, options.header_mode, None);

    let rows = raw
        .iter()
        .zip(&transformed)
        .enumerate()
        .map(|(idx, (raw, canonical))| vec![(idx + 1).to_string(), raw.clone(), canonical.clone()])
        .collect::<Vec<_>>();
    let columns = vec![Column::right("#"), Column::left("raw"), Column::left("field")];
    print!("{}", table::render_table(&columns, &rows));
    info!("Listed {} header(s)", raw.len());
    Ok(())
}
