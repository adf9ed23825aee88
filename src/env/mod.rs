pub mod backend;
pub mod environment;

pub use backend::Backend;
pub use environment::{Environment, KernelMode, Precision, SEED_ENV_VAR};
