use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::LoadOptions;
use crate::error::Result;

/// Collection timestamp per (disambiguated) trace name.
pub type CollectionTimes = BTreeMap<String, NaiveDateTime>;

// ---------------------------------------------------------------------------
// Trace – one wavelength/intensity column pair
// ---------------------------------------------------------------------------

/// A single named trace of the export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    /// Unique name (duplicates carry a `.N` suffix).
    pub name: String,
    /// Wavelength axis in nm.
    pub wavelengths: Vec<f64>,
    /// Intensity values – same length as `wavelengths`.
    pub intensities: Vec<f64>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.intensities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intensities.is_empty()
    }

    /// `(wavelength, intensity)` pairs in row order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wavelengths
            .iter()
            .copied()
            .zip(self.intensities.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// CaryDataset – the complete parsed export
// ---------------------------------------------------------------------------

/// A parsed Cary Eclipse export. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct CaryDataset {
    pub(crate) source_path: PathBuf,
    /// Traces in column order.
    pub(crate) traces: Vec<Trace>,
    #[serde(skip)]
    pub(crate) index: HashMap<String, usize>,
    pub(crate) all_wavelengths_equal: bool,
    pub(crate) contains_log: bool,
    pub(crate) collection_times: Option<CollectionTimes>,
}

impl CaryDataset {
    /// Read an export with default options.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        super::loader::load_file(path.as_ref())
    }

    pub fn from_csv_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        super::loader::load_file_with(path.as_ref(), options)
    }

    pub(crate) fn from_parts(
        source_path: PathBuf,
        traces: Vec<Trace>,
        all_wavelengths_equal: bool,
        contains_log: bool,
        collection_times: Option<CollectionTimes>,
    ) -> Self {
        let index = traces
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), i))
            .collect();
        Self {
            source_path,
            traces,
            index,
            all_wavelengths_equal,
            contains_log,
            collection_times,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Whether the file carried a log section after the spectral data.
    pub fn contains_log(&self) -> bool {
        self.contains_log
    }

    /// Whether consecutive traces share one wavelength axis (3D scans).
    pub fn all_wavelengths_equal(&self) -> bool {
        self.all_wavelengths_equal
    }

    /// Trace names in column order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.traces.iter().map(|t| t.name.as_str())
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.index.get(name).map(|&i| &self.traces[i])
    }

    /// Intensity series of the named trace.
    pub fn intensities(&self, name: &str) -> Option<&[f64]> {
        self.trace(name).map(|t| t.intensities.as_slice())
    }

    /// Number of traces.
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Collection times from the log, `None` when there was no log or it was skipped.
    pub fn collection_times(&self) -> Option<&CollectionTimes> {
        self.collection_times.as_ref()
    }

    pub fn collection_time(&self, name: &str) -> Option<NaiveDateTime> {
        self.collection_times.as_ref()?.get(name).copied()
    }
}
