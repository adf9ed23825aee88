use crate::env::{Backend, Environment, Precision};
use crate::error::{RbmError, Result};
use crate::math::matrix::Matrix;
use crate::rbm::config::{RbmConfig, WeightInit};

/// Bernoulli Restricted Boltzmann Machine.
///
/// `weights` is `n_visible × n_hidden`; `visible_bias` and `hidden_bias` have
/// one entry per unit. These shapes hold for the lifetime of the model: only
/// the training loop mutates parameters, and it validates every sample first.
///
/// A model owns its `Backend` (and so its RNG streams). `train` takes
/// `&mut self`; sharing one model between threads requires the caller to
/// wrap it in a lock.
#[derive(Debug, Clone)]
pub struct Rbm {
    pub(crate) n_visible: usize,
    pub(crate) n_hidden: usize,
    pub(crate) step: f64,
    pub(crate) batch_size: usize,
    pub(crate) weights: Matrix,
    pub(crate) visible_bias: Vec<f64>,
    pub(crate) hidden_bias: Vec<f64>,
    pub(crate) backend: Backend,
}

impl Rbm {
    /// Builds a model with freshly initialised weights and zero biases.
    pub fn new(config: RbmConfig, env: &Environment) -> Result<Rbm> {
        config.validate()?;
        let mut backend = Backend::new(env);

        let weights = match config.init {
            WeightInit::Normal { std } => backend.gaussian(config.n_visible, config.n_hidden, std),
            WeightInit::Xavier => backend.xavier(config.n_visible, config.n_hidden),
            WeightInit::Zeros => Matrix::zeros(config.n_visible, config.n_hidden),
        };

        Ok(Rbm {
            n_visible: config.n_visible,
            n_hidden: config.n_hidden,
            step: config.step,
            batch_size: config.batch_size,
            weights,
            visible_bias: vec![0.0; config.n_visible],
            hidden_bias: vec![0.0; config.n_hidden],
            backend,
        })
    }

    /// Builds a model from explicit parameters. `config.init` is ignored.
    pub fn from_parts(
        config: RbmConfig,
        weights: Matrix,
        visible_bias: Vec<f64>,
        hidden_bias: Vec<f64>,
        env: &Environment,
    ) -> Result<Rbm> {
        config.validate()?;

        if weights.rows != config.n_visible || weights.data.len() != config.n_visible {
            return Err(RbmError::shape("weight rows", config.n_visible, weights.data.len()));
        }
        if weights.cols != config.n_hidden {
            return Err(RbmError::shape("weight columns", config.n_hidden, weights.cols));
        }
        if let Some((i, row)) = weights.data.iter().enumerate().find(|(_, r)| r.len() != config.n_hidden) {
            return Err(RbmError::shape(format!("weight row {}", i), config.n_hidden, row.len()));
        }
        if visible_bias.len() != config.n_visible {
            return Err(RbmError::shape("visible bias", config.n_visible, visible_bias.len()));
        }
        if hidden_bias.len() != config.n_hidden {
            return Err(RbmError::shape("hidden bias", config.n_hidden, hidden_bias.len()));
        }

        Ok(Rbm {
            n_visible: config.n_visible,
            n_hidden: config.n_hidden,
            step: config.step,
            batch_size: config.batch_size,
            weights,
            visible_bias,
            hidden_bias,
            backend: Backend::new(env),
        })
    }

    pub fn n_visible(&self) -> usize {
        self.n_visible
    }

    pub fn n_hidden(&self) -> usize {
        self.n_hidden
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn visible_bias(&self) -> &[f64] {
        &self.visible_bias
    }

    pub fn hidden_bias(&self) -> &[f64] {
        &self.hidden_bias
    }

    pub fn precision(&self) -> Precision {
        self.backend.precision()
    }

    /// Ensures `batch` is non-empty and has `expected` columns.
    pub(crate) fn check_batch(batch: &Matrix, expected: usize, context: &str) -> Result<()> {
        if batch.rows == 0 || batch.data.is_empty() {
            return Err(RbmError::InvalidArgument(format!("{} batch must not be empty", context)));
        }
        if batch.rows != batch.data.len() {
            return Err(RbmError::shape(format!("{} rows", context), batch.rows, batch.data.len()));
        }
        if batch.cols != expected {
            return Err(RbmError::shape(format!("{} batch", context), expected, batch.cols));
        }
        if let Some((i, row)) = batch.data.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(RbmError::shape(format!("{} row {}", context, i), expected, row.len()));
        }
        Ok(())
    }
}
