use crate::error::Result;
use crate::rbm::rbm::Rbm;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

impl Rbm {
    /// Trains on `data` for `epochs` epochs in consecutive batches of
    /// `batch_size` and returns the last epoch's mean reconstruction error.
    ///
    /// Shorthand for `train_loop(self, data, &TrainConfig::new(epochs))`.
    pub fn train(&mut self, data: &[Vec<f64>], epochs: usize) -> Result<f64> {
        train_loop(self, data, &TrainConfig::new(epochs))
    }
}
