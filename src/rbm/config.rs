use serde::{Serialize, Deserialize};

use crate::error::{RbmError, Result};

/// How the weight matrix is filled at construction. Biases always start at
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WeightInit {
    /// N(0, std).
    Normal { std: f64 },
    /// N(0, sqrt(2 / (n_visible + n_hidden))).
    Xavier,
    Zeros,
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit::Normal { std: 0.01 }
    }
}

/// Hyperparameters of a Bernoulli RBM.
///
/// # Fields
/// - `n_visible`  — number of visible units, i.e. sample length
/// - `n_hidden`   — number of hidden units
/// - `step`       — learning rate of the contrastive-divergence update
/// - `batch_size` — samples per mini-batch; the last batch of an epoch may be
///                  shorter
/// - `init`       — weight initialisation
#[derive(Debug, Clone, PartialEq)]
pub struct RbmConfig {
    pub n_visible: usize,
    pub n_hidden: usize,
    pub step: f64,
    pub batch_size: usize,
    pub init: WeightInit,
}

impl RbmConfig {
    /// Config with default `step = 0.1`, `batch_size = 10` and small Gaussian
    /// weights.
    pub fn new(n_visible: usize, n_hidden: usize) -> Self {
        RbmConfig {
            n_visible,
            n_hidden,
            step: 0.1,
            batch_size: 10,
            init: WeightInit::default(),
        }
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn init(mut self, init: WeightInit) -> Self {
        self.init = init;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_visible == 0 {
            return Err(RbmError::Configuration("n_visible must be positive".into()));
        }
        if self.n_hidden == 0 {
            return Err(RbmError::Configuration("n_hidden must be positive".into()));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(RbmError::Configuration(format!(
                "step must be a positive finite number, got {}",
                self.step
            )));
        }
        if self.batch_size == 0 {
            return Err(RbmError::Configuration("batch_size must be at least 1".into()));
        }
        if let WeightInit::Normal { std } = self.init {
            if !(std.is_finite() && std > 0.0) {
                return Err(RbmError::Configuration(format!(
                    "initial weight std must be a positive finite number, got {}",
                    std
                )));
            }
        }
        Ok(())
    }
}
