//! The `utils` module provides shared definitions used by both processes:
//! the crate's error type and logging initialization.

pub mod error;
pub mod logging;

pub use error::ClientError;
