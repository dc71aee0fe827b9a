//! Writes `sample_runs.csv`: a deterministic multi-run export in the
//! latest-run-first layout the transform engine expects, so the app can be
//! exercised without instrument data.

use anyhow::{Context, Result};

const RUNS: usize = 3;
const WAVELENGTH_START: u32 = 400;
const WAVELENGTH_END: u32 = 700;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
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

    /// Box-Muller.
    fn gauss(&mut self, mu: f64, sigma: f64) -> f64 {
        let u1 = self.next_f64().max(f64::MIN_POSITIVE);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mu + sigma * z
    }
}

fn intensity(wavelength: f64, run: usize, rng: &mut SimpleRng) -> f64 {
    let drift = run as f64 * 0.02;
    let signal = gaussian(wavelength, 470.0, 12.0, 0.8)
        + gaussian(wavelength, 540.0, 20.0, 0.5 + drift)
        + gaussian(wavelength, 650.0, 9.0, 0.3);
    (signal + rng.gauss(0.0, 0.01)).max(0.0)
}

fn main() -> Result<()> {
    let path = "sample_runs.csv";
    let mut writer = csv::Writer::from_path(path).context("creating sample CSV")?;

    // Latest-run-first layout: canonical key, newest run's value, then one
    // (duplicate key, value) pair per older run in chronological order.
    let mut header = vec![
        "Wavelength:Wavelength (nm)".to_string(),
        format!("Run {RUNS}:Intensity"),
    ];
    for run in 1..RUNS {
        header.push("Wavelength".to_string());
        header.push(format!("Run {run}:Intensity"));
    }
    writer.write_record(&header)?;

    let mut rng = SimpleRng::new(42);
    for wl in WAVELENGTH_START..=WAVELENGTH_END {
        let wavelength = wl as f64;
        let mut row = vec![
            format!("{wl}"),
            format!("{:.4}", intensity(wavelength, RUNS, &mut rng)),
        ];
        for run in 1..RUNS {
            row.push(format!("{wl}"));
            row.push(format!("{:.4}", intensity(wavelength, run, &mut rng)));
        }
        writer.write_record(&row)?;
    }
    writer.flush().context("writing sample CSV")?;

    println!(
        "Wrote {path}: {} wavelengths x {RUNS} runs",
        WAVELENGTH_END - WAVELENGTH_START + 1
    );
    Ok(())
}
