use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::Float64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn generate_spectrum(
    wavenumbers: &[f64],
    peaks: &[(f64, f64, f64)],
    offset: f64,
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    wavenumbers
        .iter()
        .map(|&wn| {
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(wn, mu, sigma, amp))
                .sum();
            signal + offset + rng.gauss(0.0, noise_level)
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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Instrument-style CSV: free-text preamble, a header row, then data.
fn write_csv(
    path: &Path,
    preamble: &[String],
    wavenumbers: &[f64],
    intensities: &[f64],
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for line in preamble {
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["Wavenumber", "Intensity"])?;
    for (wn, y) in wavenumbers.iter().zip(intensities) {
        writer.write_record([wn.to_string(), y.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, wavenumbers: &[f64], intensities: &[f64]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("wavenumber", DataType::Float64, false),
        Field::new("intensity", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from(wavenumbers.to_vec())),
            Arc::new(Float64Array::from(intensities.to_vec())),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("samples"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    // Wavenumbers: 4000 → 2002, step 2
    let wavenumbers: Vec<f64> = (0..1000).map(|i| 4000.0 - i as f64 * 2.0).collect();

    let base_peaks = [(3400.0, 80.0, 0.8), (2900.0, 40.0, 0.5), (2350.0, 30.0, 0.3)];

    // Scaled and offset copies of one spectrum, the case MSC corrects.
    let samples = [
        ("Sample_A", 1.0, 0.05),
        ("Sample_B", 1.6, 0.12),
        ("Sample_C", 0.7, 0.02),
        ("Sample_D", 2.3, 0.20),
    ];

    for (name, scale, offset) in samples {
        let peaks: Vec<(f64, f64, f64)> = base_peaks
            .iter()
            .map(|&(mu, sigma, amp)| (mu, sigma, amp * scale))
            .collect();
        let y = generate_spectrum(&wavenumbers, &peaks, offset, 0.005, &mut rng);
        let preamble = vec![
            format!("Sample: {name}"),
            format!("Scale: {scale}"),
            "Instrument: synthetic".to_string(),
        ];
        let path = out_dir.join(format!("{name}.csv"));
        write_csv(&path, &preamble, &wavenumbers, &y)?;
        log::info!("Wrote {}", path.display());
    }

    let reference = generate_spectrum(&wavenumbers, &base_peaks, 0.0, 0.0, &mut rng);
    let reference_path = out_dir.join("reference.csv");
    write_csv(&reference_path, &[], &wavenumbers, &reference)?;

    let baseline: Vec<f64> = wavenumbers
        .iter()
        .map(|&wn| 0.02 + (4000.0 - wn) * 1e-5)
        .collect();
    let baseline_path = out_dir.join("baseline.csv");
    write_csv(&baseline_path, &[], &wavenumbers, &baseline)?;

    let parquet_path = out_dir.join("Sample_E.parquet");
    let y = generate_spectrum(&wavenumbers, &base_peaks, 0.08, 0.005, &mut rng);
    write_parquet(&parquet_path, &wavenumbers, &y)?;

    println!(
        "Wrote {} spectra ({} wavenumbers each) plus reference and baseline to {}",
        samples.len() + 1,
        wavenumbers.len(),
        out_dir.display()
    );
    Ok(())
}
