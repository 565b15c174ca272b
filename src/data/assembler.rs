use log::{debug, warn};

use super::model::Trace;
use super::names::DuplicateNames;
use super::table::RawTable;
use crate::config::WavelengthTolerance;
use crate::error::{CaryError, Result};

/// Traces split out of a [`RawTable`].
#[derive(Debug, Clone)]
pub struct AssembledTraces {
    /// Traces in column order, with unique names.
    pub traces: Vec<Trace>,
    /// Header names as written in the file, duplicates included.
    pub declared_names: Vec<String>,
    /// Consecutive traces share a wavelength axis.
    pub all_wavelengths_equal: bool,
}

/// Split the grid into one trace per wavelength/intensity column pair.
pub fn assemble(table: &RawTable, tolerance: WavelengthTolerance) -> Result<AssembledTraces> {
    let mut names = DuplicateNames::new();
    let mut traces = Vec::with_capacity(table.trace_count());
    let mut declared_names = Vec::with_capacity(table.trace_count());

    for i in 0..table.trace_count() {
        let declared = table.trace_header(i);
        let name = names.resolve(declared);
        if name != declared {
            debug!("duplicate trace name '{declared}' renamed to '{name}'");
        }

        let mut wavelengths = Vec::with_capacity(table.rows.len());
        let mut intensities = Vec::with_capacity(table.rows.len());

        for (row, (wl, y)) in table
            .column(2 * i)
            .zip(table.column(2 * i + 1))
            .enumerate()
        {
            match (wl, y) {
                (Some(wl), Some(y)) => {
                    wavelengths.push(wl);
                    intensities.push(y);
                }
                (None, Some(_)) => {
                    return Err(CaryError::MalformedData(format!(
                        "trace '{name}', data row {row}: intensity without wavelength"
                    )));
                }
                _ => {}
            }
        }

        declared_names.push(declared.to_string());
        traces.push(Trace {
            name,
            wavelengths,
            intensities,
        });
    }

    let all_wavelengths_equal = consecutive_axes_equal(&traces, tolerance);
    if !all_wavelengths_equal {
        debug!("traces do not share a common wavelength axis");
    }
    if traces.iter().any(Trace::is_empty) {
        warn!("export contains traces without data points");
    }

    Ok(AssembledTraces {
        traces,
        declared_names,
        all_wavelengths_equal,
    })
}

/// Compare each trace with its right-hand neighbour only.
fn consecutive_axes_equal(traces: &[Trace], tolerance: WavelengthTolerance) -> bool {
    traces
        .windows(2)
        .all(|pair| tolerance.axes_close(&pair[0].wavelengths, &pair[1].wavelengths))
}
