//! Reader for Agilent Cary Eclipse fluorescence spectrometer CSV exports.
//!
//! An export interleaves one wavelength/intensity column pair per trace,
//! may repeat trace names, and may end with a free-text log holding the
//! collection time of every trace. [`CaryDataset::from_csv`] turns such a
//! file into named traces and exposes the collapsed table and the
//! excitation-emission matrix of 3D scans.
//!
//! ```rust,no_run
//! use cary_reader::CaryDataset;
//!
//! let data = CaryDataset::from_csv("berio_matrix_300_450.csv")?;
//! let eem = data.ex_em_matrix()?;
//! println!("{} emission x {} excitation wavelengths", eem.n_rows(), eem.n_cols());
//! # Ok::<(), cary_reader::CaryError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;

pub use config::{LoadOptions, WavelengthTolerance};
pub use data::loader::{load_file, load_file_with};
pub use data::model::{CaryDataset, CollectionTimes, Trace};
pub use data::views::SpectralTable;
pub use error::{CaryError, Result};
