pub mod config;
pub mod error;
pub mod traits;

pub use config::SamplingConfig;
pub use error::{Result, SurfError};
