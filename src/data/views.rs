use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use log::debug;
use serde::Serialize;

use super::model::CaryDataset;
use super::names::{excitation_wavelength, sample_name};
use crate::error::{CaryError, Result};

pub const WAVELENGTH_INDEX_NAME: &str = "Wavelength (nm)";

// ---------------------------------------------------------------------------
// SpectralTable – traces collapsed onto one wavelength axis
// ---------------------------------------------------------------------------

/// Intensities of several traces over one shared wavelength index.
///
/// `L` is the column label: the trace name for a collapsed table, the
/// excitation wavelength for an excitation-emission matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectralTable<L> {
    pub index_name: String,
    /// Row index (emission wavelengths).
    pub index: Vec<f64>,
    pub columns: Vec<L>,
    /// Column-major values: `values[col][row]`.
    pub values: Vec<Vec<f64>>,
}

impl<L> SpectralTable<L> {
    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    pub fn column_at(&self, col: usize) -> Option<&[f64]> {
        self.values.get(col).map(Vec::as_slice)
    }

    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(col)?.get(row).copied()
    }

    /// Same data under new column labels.
    fn relabel<M>(self, columns: Vec<M>) -> SpectralTable<M> {
        debug_assert_eq!(columns.len(), self.values.len());
        SpectralTable {
            index_name: self.index_name,
            index: self.index,
            columns,
            values: self.values,
        }
    }
}

impl<L: PartialEq> SpectralTable<L> {
    /// Values of the first column carrying `label`.
    pub fn column(&self, label: &L) -> Option<&[f64]> {
        let pos = self.columns.iter().position(|c| c == label)?;
        self.column_at(pos)
    }
}

impl<L: Display> SpectralTable<L> {
    /// Convert to an Arrow record batch: the index column followed by one
    /// `Float64` column per label.
    pub fn to_record_batch(&self) -> std::result::Result<RecordBatch, ArrowError> {
        let mut fields = Vec::with_capacity(self.n_cols() + 1);
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(self.n_cols() + 1);

        fields.push(Field::new(&self.index_name, DataType::Float64, false));
        arrays.push(Arc::new(Float64Array::from(self.index.clone())));

        for (label, values) in self.columns.iter().zip(&self.values) {
            fields.push(Field::new(label.to_string(), DataType::Float64, false));
            arrays.push(Arc::new(Float64Array::from(values.clone())));
        }

        RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
    }
}

// ---------------------------------------------------------------------------
// Derived views of a dataset
// ---------------------------------------------------------------------------

impl CaryDataset {
    /// One column per trace over the wavelength axis of the first trace.
    ///
    /// Only available when all traces share a wavelength axis. Rows are
    /// aligned by position, not by matching wavelength values.
    pub fn collapsed_table(&self) -> Result<SpectralTable<String>> {
        if !self.all_wavelengths_equal {
            return Err(CaryError::InvalidState(
                "collapsed table requires all traces to share one wavelength axis".into(),
            ));
        }
        let first = self.traces.first().ok_or_else(|| {
            CaryError::InvalidState("collapsed table requires at least one trace".into())
        })?;

        Ok(SpectralTable {
            index_name: WAVELENGTH_INDEX_NAME.to_string(),
            index: first.wavelengths.clone(),
            columns: self.traces.iter().map(|t| t.name.clone()).collect(),
            values: self.traces.iter().map(|t| t.intensities.clone()).collect(),
        })
    }

    /// Excitation-emission matrix of a 3D scan: rows are emission
    /// wavelengths, columns the excitation wavelengths parsed from the trace
    /// names (`EX_<nm>`).
    pub fn ex_em_matrix(&self) -> Result<SpectralTable<f64>> {
        let table = self.collapsed_table()?;
        let excitation = table
            .columns
            .iter()
            .map(|name| excitation_wavelength(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(table.relabel(excitation))
    }

    /// One excitation-emission matrix per sample of a multi-sample 3D scan.
    ///
    /// Traces are grouped by the name text preceding `EX_`; within a sample
    /// the columns keep file order.
    pub fn multi_sample_ex_em_matrices(&self) -> Result<BTreeMap<String, SpectralTable<f64>>> {
        let table = self.collapsed_table()?;
        let mut samples: BTreeMap<String, SpectralTable<f64>> = BTreeMap::new();

        for (name, values) in table.columns.iter().zip(table.values) {
            let sample = sample_name(name)?;
            let excitation = excitation_wavelength(name)?;
            let matrix = samples
                .entry(sample.to_string())
                .or_insert_with(|| SpectralTable {
                    index_name: table.index_name.clone(),
                    index: table.index.clone(),
                    columns: Vec::new(),
                    values: Vec::new(),
                });
            matrix.columns.push(excitation);
            matrix.values.push(values);
        }

        debug!("split excitation-emission scan into {} samples", samples.len());
        Ok(samples)
    }
}
