#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

/// One trace of a synthetic export.
pub struct FixtureTrace {
    pub name: String,
    pub wavelengths: Vec<f64>,
    pub intensities: Vec<Option<f64>>,
}

impl FixtureTrace {
    pub fn new(name: &str, wavelengths: Vec<f64>, intensities: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            wavelengths,
            intensities: intensities.into_iter().map(Some).collect(),
        }
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Render traces the way the instrument exports them: name row, units row,
/// data rows, and a trailing empty column on every row. When `log` is not
/// empty a blank sentinel row and the log lines follow.
pub fn export_csv(traces: &[FixtureTrace], log: &[String]) -> String {
    let mut out = String::new();

    for t in traces {
        out.push_str(&format!("{},,", t.name));
    }
    out.push('\n');
    for _ in traces {
        out.push_str("Wavelength (nm),Intensity (a.u.),");
    }
    out.push('\n');

    let n_rows = traces.iter().map(|t| t.wavelengths.len()).max().unwrap_or(0);
    for row in 0..n_rows {
        for t in traces {
            match t.wavelengths.get(row) {
                Some(wl) => out.push_str(&format!("{wl},")),
                None => out.push(','),
            }
            match t.intensities.get(row).copied().flatten() {
                Some(y) => out.push_str(&format!("{y},")),
                None => out.push(','),
            }
        }
        out.push('\n');
    }

    if !log.is_empty() {
        out.push('\n');
        for line in log {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Log section with one block per trace name.
pub fn log_blocks(names: &[&str], times: &[&str]) -> Vec<String> {
    names
        .iter()
        .zip(times)
        .flat_map(|(name, time)| {
            vec![
                name.to_string(),
                "Method Log".to_string(),
                format!("Collection Time:  {time}"),
                String::new(),
            ]
        })
        .collect()
}

pub fn write_fixture(dir: &TempDir, file_name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(file_name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

/// Multi-sample 3D scan: `samples` × 31 excitation wavelengths (250–400 nm),
/// 226 emission wavelengths (275–500 nm).
pub fn multi_sample_scan(samples: &[&str]) -> Vec<FixtureTrace> {
    let emission: Vec<f64> = (0..226).map(|i| 275.0 + i as f64).collect();
    let mut traces = Vec::new();
    for (s, sample) in samples.iter().enumerate() {
        for e in 0..31 {
            let ex = 250.0 + e as f64 * 5.0;
            let intensities = emission
                .iter()
                .map(|em| (s + 1) as f64 * 10.0 + (em - ex).abs() / 100.0)
                .collect();
            traces.push(FixtureTrace::new(
                &format!("{sample}_EX_{ex:.2}"),
                emission.clone(),
                intensities,
            ));
        }
    }
    traces
}
