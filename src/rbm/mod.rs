pub mod config;
pub mod rbm;
pub mod sampling;
pub mod snapshot;

pub use config::{RbmConfig, WeightInit};
pub use rbm::Rbm;
pub use snapshot::{RbmSnapshot, FORMAT_VERSION};
