use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use arrow::util::pretty::pretty_format_batches;
use chrono::{Duration, NaiveDate};
use log::info;

use cary_reader::CaryDataset;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Emission spectrum of one excitation wavelength: a fluorophore band that
/// follows the excitation plus the first-order Rayleigh scatter line.
fn generate_emission(
    emission: &[f64],
    excitation: f64,
    band: (f64, f64, f64),
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    let (mu, sigma, amp) = band;
    let efficiency = gaussian(excitation, mu - 60.0, 30.0, 1.0);
    emission
        .iter()
        .map(|&em| {
            let signal = gaussian(em, mu, sigma, amp * efficiency) + gaussian(em, excitation, 2.0, 400.0);
            (signal + rng.gauss(0.0, noise_level)).max(0.0)
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_eem.csv"));

    let mut rng = SimpleRng::new(42);

    // Emission 275 → 500 nm (226 points), excitation 250 → 400 nm in 5 nm steps (31 scans)
    let emission: Vec<f64> = (0..226).map(|i| 275.0 + i as f64).collect();
    let excitation: Vec<f64> = (0..31).map(|i| 250.0 + i as f64 * 5.0).collect();

    let samples: [(&str, (f64, f64, f64)); 4] = [
        ("Sample1", (340.0, 18.0, 120.0)),
        ("Sample2", (360.0, 22.0, 80.0)),
        ("Sample3", (420.0, 25.0, 150.0)),
        ("Sample4", (450.0, 30.0, 60.0)),
    ];

    let mut names = Vec::new();
    let mut columns = Vec::new();
    for (sample, band) in &samples {
        for &ex in &excitation {
            names.push(format!("{sample}_EX_{ex:.2}"));
            columns.push(generate_emission(&emission, ex, *band, 0.5, &mut rng));
        }
    }

    let file = File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    let mut out = BufWriter::new(file);

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(&mut out);

    // Name header (name on the wavelength column only) and units row,
    // both followed by the empty padding column the instrument writes.
    let mut header = Vec::with_capacity(names.len() * 2 + 1);
    let mut units = Vec::with_capacity(names.len() * 2 + 1);
    for name in &names {
        header.extend([name.as_str(), ""]);
        units.extend(["Wavelength (nm)", "Intensity (a.u.)"]);
    }
    header.push("");
    units.push("");
    writer.write_record(&header).context("writing header row")?;
    writer.write_record(&units).context("writing units row")?;

    for (row, em) in emission.iter().enumerate() {
        let mut record = Vec::with_capacity(names.len() * 2 + 1);
        for col in &columns {
            record.push(format!("{em:.1}"));
            record.push(format!("{:.3}", col[row]));
        }
        record.push(String::new());
        writer.write_record(&record).context("writing data row")?;
    }
    writer.flush().context("flushing data rows")?;
    drop(writer);

    // Sentinel row, then one log block per trace.
    writeln!(out)?;
    let started = NaiveDate::from_ymd_opt(2022, 3, 14)
        .and_then(|d| d.and_hms_opt(22, 15, 0))
        .context("building start time")?;
    for (i, name) in names.iter().enumerate() {
        let collected = started + Duration::seconds(45 * i as i64);
        writeln!(out, "{name}")?;
        writeln!(out, "Method Log")?;
        writeln!(out, "Collection Time:  {}", collected.format("%m/%d/%Y %I:%M:%S %p"))?;
        writeln!(out)?;
    }
    out.flush().context("flushing log section")?;
    drop(out);

    info!("wrote {} traces to {}", names.len(), output_path.display());

    // Read the file back and show what the reader makes of it.
    let data = CaryDataset::from_csv(&output_path)
        .with_context(|| format!("reading back {}", output_path.display()))?;
    let matrices = data.multi_sample_ex_em_matrices()?;

    for (sample, matrix) in &matrices {
        println!("{sample}: {} emission x {} excitation", matrix.n_rows(), matrix.n_cols());
    }

    if let Some((sample, matrix)) = matrices.iter().next() {
        let batch = matrix.to_record_batch()?;
        let preview = batch.slice(0, batch.num_rows().min(5));
        let preview = preview.project(&(0..preview.num_columns().min(6)).collect::<Vec<_>>())?;
        println!("{sample} (first rows):\n{}", pretty_format_batches(&[preview])?);
    }

    let times = serde_json::to_string_pretty(&data.collection_times())?;
    println!("collection times:\n{times}");

    Ok(())
}
