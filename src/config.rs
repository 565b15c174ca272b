// ---------------------------------------------------------------------------
// Load options
// ---------------------------------------------------------------------------

/// Closeness test used to decide whether two traces share a wavelength axis.
///
/// Two values are close when `|a - b| <= absolute + relative * |b|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavelengthTolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Default for WavelengthTolerance {
    fn default() -> Self {
        Self {
            relative: 1e-5,
            absolute: 1e-8,
        }
    }
}

impl WavelengthTolerance {
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        // NaN compares false here, so a NaN is never close to anything
        (a - b).abs() <= self.absolute + self.relative * b.abs()
    }

    /// Elementwise closeness of two axes. Axes of different length are never close.
    pub fn axes_close(&self, a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.is_close(x, y))
    }
}

/// Options controlling how a Cary Eclipse export is read.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Detect and drop the log section, but do not parse collection times.
    pub skip_log: bool,
    /// Tolerance for the uniform-wavelength check.
    pub tolerance: WavelengthTolerance,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_log(mut self, skip: bool) -> Self {
        self.skip_log = skip;
        self
    }

    pub fn tolerance(mut self, tolerance: WavelengthTolerance) -> Self {
        self.tolerance = tolerance;
        self
    }
}
