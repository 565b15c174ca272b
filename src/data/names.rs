use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CaryError, Result};

/// Excitation wavelength token the instrument embeds in 3D-scan trace names.
static EXCITATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"EX_(\d+\.\d+)").expect("valid excitation pattern"));

// ---------------------------------------------------------------------------
// Duplicate trace names
// ---------------------------------------------------------------------------

/// Resolves repeated trace names to unique ones, in order of appearance.
///
/// The first occurrence of a name is kept as-is, later ones get `.1`, `.2`, …
/// Column parsing and log parsing each run their own instance over the same
/// sequence of names, so both arrive at identical labels.
#[derive(Debug, Default, Clone)]
pub struct DuplicateNames {
    seen: HashMap<String, usize>,
}

impl DuplicateNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the unique label for the next occurrence of `base`.
    pub fn resolve(&mut self, base: &str) -> String {
        let count = self.seen.entry(base.to_string()).or_insert(0);
        let name = if *count == 0 {
            base.to_string()
        } else {
            format!("{base}.{count}")
        };
        *count += 1;
        name
    }
}

// ---------------------------------------------------------------------------
// Excitation-emission naming
// ---------------------------------------------------------------------------

/// Excitation wavelength encoded in a trace name as `EX_<digits>.<digits>`.
pub fn excitation_wavelength(name: &str) -> Result<f64> {
    EXCITATION_PATTERN
        .captures(name)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .ok_or_else(|| CaryError::MalformedName(name.to_string()))
}

/// Sample a multi-sample 3D-scan trace belongs to: the text before `EX_`,
/// without trailing separators.
pub fn sample_name(name: &str) -> Result<&str> {
    let token = EXCITATION_PATTERN
        .find(name)
        .ok_or_else(|| CaryError::MalformedName(name.to_string()))?;
    Ok(name[..token.start()].trim_end_matches(|c: char| c == '_' || c.is_whitespace()))
}
