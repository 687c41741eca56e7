//! Shared definitions used throughout the toldiff library

pub mod error;

pub use error::{Error, Result};
