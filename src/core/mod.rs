// Public modules
pub mod command;
pub mod config;
pub mod deploy;
pub mod env;
pub mod error;
pub mod executor;
pub mod secrets;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
