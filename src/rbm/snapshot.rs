use serde::{Serialize, Deserialize};

use crate::env::{Environment, Precision};
use crate::error::{RbmError, Result};
use crate::math::matrix::Matrix;
use crate::rbm::config::RbmConfig;
use crate::rbm::rbm::Rbm;

/// Version written by this build. Loading any other version fails with
/// `RbmError::Format`.
pub const FORMAT_VERSION: u32 = 1;

/// On-disk representation of a trained model.
///
/// Holds everything needed to reproduce `visible_to_hidden` and
/// `hidden_to_visible` exactly. RNG state is not stored; a loaded model draws
/// from streams seeded by the `Environment` it is loaded with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RbmSnapshot {
    pub format_version: u32,
    pub n_visible: usize,
    pub n_hidden: usize,
    pub step: f64,
    pub batch_size: usize,
    /// Precision the model was trained at; restored on load.
    pub precision: Precision,
    /// `n_visible` rows of `n_hidden` values.
    pub weights: Vec<Vec<f64>>,
    pub visible_bias: Vec<f64>,
    pub hidden_bias: Vec<f64>,
}

impl RbmSnapshot {
    pub fn from_model(rbm: &Rbm) -> RbmSnapshot {
        RbmSnapshot {
            format_version: FORMAT_VERSION,
            n_visible: rbm.n_visible,
            n_hidden: rbm.n_hidden,
            step: rbm.step,
            batch_size: rbm.batch_size,
            precision: rbm.precision(),
            weights: rbm.weights.data.clone(),
            visible_bias: rbm.visible_bias.clone(),
            hidden_bias: rbm.hidden_bias.clone(),
        }
    }

    /// Rebuilds a model, checking version, hyperparameters and shapes.
    pub fn into_model(self, env: &Environment) -> Result<Rbm> {
        if self.format_version != FORMAT_VERSION {
            return Err(RbmError::Format(format!(
                "expected format version {}, found {}",
                FORMAT_VERSION, self.format_version
            )));
        }

        let config = RbmConfig::new(self.n_visible, self.n_hidden)
            .step(self.step)
            .batch_size(self.batch_size);
        config.validate()?;

        if self.weights.len() != self.n_visible {
            return Err(RbmError::shape("weight rows", self.n_visible, self.weights.len()));
        }
        let weights = Matrix {
            rows: self.n_visible,
            cols: self.n_hidden,
            data: self.weights,
        };

        let mut env = env.clone();
        env.precision = self.precision;
        Rbm::from_parts(config, weights, self.visible_bias, self.hidden_bias, &env)
    }
}

impl Rbm {
    /// Serializes the model to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &RbmSnapshot::from_model(self))?;
        Ok(())
    }

    /// Loads a model from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str, env: &Environment) -> Result<Rbm> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let snapshot: RbmSnapshot = serde_json::from_reader(reader)?;
        snapshot.into_model(env)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&RbmSnapshot::from_model(self))?)
    }

    pub fn from_json_str(json: &str, env: &Environment) -> Result<Rbm> {
        let snapshot: RbmSnapshot = serde_json::from_str(json)?;
        snapshot.into_model(env)
    }
}
