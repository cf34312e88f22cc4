// src/process/mod.rs
pub mod convert;
pub mod date_parser;
pub mod ordinal;
pub mod raw_table;
pub mod record;
pub mod utils;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::{debug, info, trace};

pub use convert::{coerce_table, coerce_value, CoercionFailure, CoercionOutput, DuplicateRecord};
pub use raw_table::{RawRecord, RawTable};
pub use record::{CanonicalColumn, CanonicalRecord, CanonicalTable, Ordinal, RecordKey, Value};

/// Read a delimited survey export with a header row.
///
/// - headers are trimmed and a leading BOM is stripped;
/// - every cell is trimmed, short rows are padded, long rows are truncated;
/// - rows whose cells are all blank are skipped but still count toward row
///   numbers.
pub fn read_export<R: Read>(reader: R, delimiter: u8) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // keep this so records with different field-counts work
        .delimiter(delimiter)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("reading header row")?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { utils::strip_bom(h) } else { h };
            h.trim().to_string()
        })
        .collect();
    debug!(columns = headers.len(), "export headers read");

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = idx + 1;
        let record = result.with_context(|| format!("parse error at data row {}", row))?;

        if record.iter().all(|c| c.trim().is_empty()) {
            trace!(row, "blank row skipped");
            continue;
        }

        let mut cells: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
        cells.resize(headers.len(), String::new());
        records.push(RawRecord { row, cells });
    }

    Ok(RawTable { headers, records })
}

/// Open `path` and read it with [`read_export`].
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_export<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<RawTable> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open export: {}", path.display()))?;
    let table = read_export(BufReader::new(file), delimiter)
        .with_context(|| format!("Failed to read export: {}", path.display()))?;
    info!(
        records = table.len(),
        columns = table.headers.len(),
        "export loaded"
    );
    Ok(table)
}
