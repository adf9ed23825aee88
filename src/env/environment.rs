use serde::{Serialize, Deserialize};

/// Environment variable carrying the reproducibility seed between processes.
pub const SEED_ENV_VAR: &str = "FERRITE_RBM_SEED";

/// How the backend evaluates `a · b`.
///
/// - `Direct`     — reads `b` column-wise in place; no setup work per product.
/// - `Transposed` — materialises `bᵀ` first so the inner loop is contiguous.
///
/// Both produce bit-identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelMode {
    Direct,
    Transposed,
}

/// Floating-point precision of values produced by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Results are rounded to the nearest `f32`.
    Single,
    Double,
}

impl Precision {
    pub fn quantize(self, x: f64) -> f64 {
        match self {
            Precision::Single => x as f32 as f64,
            Precision::Double => x,
        }
    }
}

/// Backend configuration. Build one, adjust it, then hand it to
/// `Backend::new` (or any `Rbm` constructor). Nothing here touches process
/// state except `export_hash_seed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub kernel: KernelMode,
    /// Keep gradient scratch buffers alive between batches instead of
    /// reallocating them.
    pub retain_buffers: bool,
    pub precision: Precision,
    /// Seed shared by every RNG stream; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            kernel: KernelMode::Transposed,
            retain_buffers: false,
            precision: Precision::Double,
            seed: None,
        }
    }
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Favours short experimental runs: skip per-product setup work and keep
    /// scratch buffers around.
    pub fn enable_sandbox_mode(&mut self) -> &mut Self {
        self.kernel = KernelMode::Direct;
        self.retain_buffers = true;
        self
    }

    /// Seeds the general, array and sampling RNG streams with `seed` so that
    /// weight initialisation, Gibbs sampling and batch shuffling repeat
    /// exactly across runs.
    pub fn make_reproducible(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Single precision and retained buffers.
    pub fn enable_speed_mode(&mut self) -> &mut Self {
        self.precision = Precision::Single;
        self.retain_buffers = true;
        self
    }

    /// Writes the seed to `FERRITE_RBM_SEED` for child processes.
    ///
    /// Best-effort: only a process that calls `from_process_env` at start-up
    /// picks it up. Does nothing when no seed is set.
    pub fn export_hash_seed(&self) {
        if let Some(seed) = self.seed {
            std::env::set_var(SEED_ENV_VAR, seed.to_string());
        }
    }

    /// Default environment, made reproducible if `FERRITE_RBM_SEED` holds a
    /// valid seed. Unparseable values are ignored.
    pub fn from_process_env() -> Self {
        let mut env = Environment::default();
        if let Some(seed) = std::env::var(SEED_ENV_VAR).ok().and_then(|s| s.trim().parse().ok()) {
            env.make_reproducible(seed);
        }
        env
    }

    /// Serializes the environment to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes an environment from a JSON file written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<Environment> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_are_idempotent() {
        let mut once = Environment::new();
        once.enable_sandbox_mode().enable_speed_mode().make_reproducible(3);
        let mut twice = once.clone();
        twice.enable_sandbox_mode().enable_speed_mode().make_reproducible(3);
        assert_eq!(once, twice);
    }

    #[test]
    fn sandbox_mode_switches_kernel_and_retains_buffers() {
        let mut env = Environment::new();
        env.enable_sandbox_mode();
        assert_eq!(env.kernel, KernelMode::Direct);
        assert!(env.retain_buffers);
        assert_eq!(env.precision, Precision::Double);
    }

    #[test]
    fn speed_mode_selects_single_precision() {
        let mut env = Environment::new();
        env.enable_speed_mode();
        assert_eq!(env.precision, Precision::Single);
        assert_eq!(Precision::Single.quantize(0.1), 0.1f32 as f64);
        assert_eq!(Precision::Double.quantize(0.1), 0.1);
    }

    #[test]
    fn json_round_trip_preserves_settings() {
        let mut env = Environment::new();
        env.enable_sandbox_mode().make_reproducible(42);
        let path = std::env::temp_dir().join(format!("ferrite_rbm_env_{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        env.save_json(path).unwrap();
        let loaded = Environment::load_json(path).unwrap();
        std::fs::remove_file(path).ok();
        assert_eq!(env, loaded);
    }

    #[test]
    fn exported_seed_is_read_back() {
        let mut env = Environment::new();
        env.make_reproducible(1234).export_hash_seed();
        assert_eq!(Environment::from_process_env().seed, Some(1234));
    }
}
