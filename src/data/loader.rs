use std::path::Path;

use log::{info, warn};

use super::assembler::assemble;
use super::collection_log::parse_log;
use super::model::CaryDataset;
use super::table::{load_table, read_source_lines, HEADER_ROWS};
use crate::config::LoadOptions;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a Cary Eclipse CSV export with default options.
pub fn load_file(path: &Path) -> Result<CaryDataset> {
    load_file_with(path, &LoadOptions::default())
}

/// Load a Cary Eclipse CSV export.
///
/// The file is read twice: once as a numeric grid, and, when it carries a log
/// section that is not skipped, once more as raw text for the collection
/// times.
pub fn load_file_with(path: &Path, options: &LoadOptions) -> Result<CaryDataset> {
    let table = load_table(path)?;
    let assembled = assemble(&table, options.tolerance)?;

    let collection_times = match table.log_start_row {
        Some(start_row) if !options.skip_log => {
            let lines = read_source_lines(path)?;
            let parsed = parse_log(&lines, start_row + HEADER_ROWS, &assembled.declared_names)?;
            if parsed.blocks.len() != assembled.traces.len() {
                warn!(
                    "{}: log has {} trace blocks but the data has {} traces",
                    path.display(),
                    parsed.blocks.len(),
                    assembled.traces.len()
                );
            }
            Some(parsed.collection_times)
        }
        _ => None,
    };

    info!(
        "loaded {} traces from {} (log: {}, uniform wavelengths: {})",
        assembled.traces.len(),
        path.display(),
        table.contains_log(),
        assembled.all_wavelengths_equal
    );

    Ok(CaryDataset::from_parts(
        path.to_path_buf(),
        assembled.traces,
        assembled.all_wavelengths_equal,
        table.contains_log(),
        collection_times,
    ))
}
