use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use crate::error::{CaryError, Result};

/// Rows present in the raw text but absent from the numeric grid: the trace
/// name header and the units row.
pub const HEADER_ROWS: usize = 2;

// ---------------------------------------------------------------------------
// RawTable – the numeric grid of an export
// ---------------------------------------------------------------------------

/// Numeric content of a Cary Eclipse export, before it is split into traces.
///
/// The padding column and the units row are already removed, and the grid
/// stops at the log boundary when there is one.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Header cells of row 0, one per column (always an even count).
    pub headers: Vec<String>,
    /// Data rows; every row has exactly `headers.len()` cells.
    pub rows: Vec<Vec<Option<f64>>>,
    /// Index (into `rows` numbering) of the first row of the log section.
    pub log_start_row: Option<usize>,
}

impl RawTable {
    pub fn contains_log(&self) -> bool {
        self.log_start_row.is_some()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of wavelength/intensity column pairs.
    pub fn trace_count(&self) -> usize {
        self.headers.len() / 2
    }

    /// Declared name of trace `i`: the header of its wavelength column, or of
    /// its intensity column when the former is blank.
    pub fn trace_header(&self, i: usize) -> &str {
        let first = self.headers[2 * i].as_str();
        if first.trim().is_empty() {
            self.headers[2 * i + 1].as_str()
        } else {
            first
        }
    }

    /// Cells of one column in row order.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().map(move |row| row[idx])
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the numeric grid of an export file.
pub fn load_table(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(|e| CaryError::io(path, e))?;
    read_table(BufReader::new(file))
}

/// Read the numeric grid from any byte source.
///
/// Layout: row 0 holds trace names, row 1 holds units and is discarded, every
/// row carries one trailing empty column. The first row whose cells are all
/// empty apart from the first one separates the data from the log section.
pub fn read_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = csv_reader.byte_records();

    let header = records
        .next()
        .transpose()?
        .ok_or_else(|| CaryError::MalformedData("file is empty".into()))?;
    let mut headers: Vec<String> = header.iter().map(decode_latin1).collect();
    headers.pop(); // padding column

    if headers.is_empty() {
        return Err(CaryError::MalformedData(
            "header row declares no trace columns".into(),
        ));
    }
    if headers.len() % 2 != 0 {
        return Err(CaryError::MalformedData(format!(
            "header row has {} columns, expected wavelength/intensity pairs",
            headers.len()
        )));
    }

    if records.next().transpose()?.is_none() {
        return Err(CaryError::MalformedData("units row is missing".into()));
    }

    let width = headers.len();
    let mut rows = Vec::new();
    let mut log_start_row = None;

    for result in records {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        // Fields past `width` are the padding column (or junk) and are ignored.
        let cells: Vec<&[u8]> = (0..width).map(|i| record.get(i).unwrap_or_default()).collect();

        if cells[1..].iter().all(|c| is_blank(c)) {
            log_start_row = Some(rows.len());
            debug!("log section starts at data row {} (line {line})", rows.len());
            break;
        }

        let row = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| parse_cell(cell, line, col))
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    debug!(
        "loaded {} rows x {} columns, log present: {}",
        rows.len(),
        width,
        log_start_row.is_some()
    );

    Ok(RawTable {
        headers,
        rows,
        log_start_row,
    })
}

/// Read the source as raw text lines with line endings removed.
pub fn read_source_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| CaryError::io(path, e))?;
    Ok(decode_latin1(&bytes).lines().map(str::to_string).collect())
}

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

/// The instrument software writes Latin-1; each byte is one code point.
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn is_blank(cell: &[u8]) -> bool {
    cell.iter().all(u8::is_ascii_whitespace)
}

fn parse_cell(cell: &[u8], line: u64, col: usize) -> Result<Option<f64>> {
    if is_blank(cell) {
        return Ok(None);
    }
    let text = decode_latin1(cell);
    text.trim().parse::<f64>().map(Some).map_err(|_| {
        CaryError::MalformedData(format!(
            "line {line}, column {col}: '{text}' is not a number"
        ))
    })
}
