use std::path::PathBuf;

/// Errors raised while reading a Cary Eclipse export or deriving views from it.
///
/// Every variant is fatal for the file it was raised for; no partially parsed
/// dataset is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum CaryError {
    /// I/O error opening or reading the source file
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV tokenizer rejected the input
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A data cell is not numeric, or a wavelength is missing next to an intensity
    #[error("malformed data: {0}")]
    MalformedData(String),

    /// A `Collection Time:` line in the log section could not be parsed
    #[error("malformed log at line {line}: {message}")]
    MalformedLog { line: usize, message: String },

    /// A trace name does not carry an `EX_<wavelength>` token
    #[error("trace name '{0}' does not contain an excitation wavelength (EX_<nm>)")]
    MalformedName(String),

    /// The dataset does not meet the precondition of the requested view
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl CaryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CaryError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CaryError>;
