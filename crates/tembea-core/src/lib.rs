pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::{Collection, ContentStore};
pub use config::TembeaConfig;
pub use error::{Result, TembeaError};
pub use types::*;
