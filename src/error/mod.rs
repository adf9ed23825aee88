pub mod rbm_error;

pub use rbm_error::{RbmError, Result};
