//! Common utilities for the velo route engine

pub mod error;

pub use error::{Error, Result};
