pub mod error;
pub mod result;

pub use error::{CostError, ExitCode};
pub use result::Result;
