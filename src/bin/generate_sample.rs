use std::path::Path;

use anyhow::{Context, Result};

const REPLICATIONS: usize = 5;
const ITERATIONS: usize = 200;
const OUTPUT_DIR: &str = "sample_runs";

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

/// One replication: population (logistic growth), energy (damped
/// oscillation) and mean age (random walk), one row per iteration.
fn generate_run(rng: &mut SimpleRng) -> Vec<[f64; 3]> {
    let growth = rng.gauss(0.05, 0.01);
    let phase = rng.next_f64() * std::f64::consts::PI;
    let mut population = 50.0;
    let mut age = 10.0;

    (0..ITERATIONS)
        .map(|i| {
            let t = i as f64;
            population += growth * population * (1.0 - population / 1000.0) + rng.gauss(0.0, 3.0);
            let energy = 200.0 + 80.0 * (-t / 80.0).exp() * (t / 12.0 + phase).sin() + rng.gauss(0.0, 5.0);
            age = (age + rng.gauss(0.02, 0.3)).max(0.0);
            [population.max(0.0), energy, age]
        })
        .collect()
}

fn write_run(path: &Path, rows: &[[f64; 3]]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer
            .write_record(row.iter().map(|v| format!("{v:.4}")))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(dir).with_context(|| format!("creating {OUTPUT_DIR}"))?;

    for rep in 1..=REPLICATIONS {
        let path = dir.join(format!("stats{rep:02}.txt"));
        write_run(&path, &generate_run(&mut rng))?;
        log::debug!("Wrote {}", path.display());
    }

    println!(
        "Wrote {REPLICATIONS} runs ({ITERATIONS} iterations x 3 outputs) to {OUTPUT_DIR}/"
    );
    Ok(())
}
