pub mod math;
pub mod activation;
pub mod env;
pub mod error;
pub mod rbm;
pub mod train;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use env::{Backend, Environment, KernelMode, Precision};
pub use error::{RbmError, Result};
pub use rbm::{Rbm, RbmConfig, RbmSnapshot, WeightInit};
pub use train::{train_loop, EpochStats, TrainConfig};
