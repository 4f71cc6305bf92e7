//! Error types for the velo route engine
//!
//! Every fallible operation in the workspace reports one of four failure
//! families:
//!
//! - [`Error::InvalidArgument`]: a constructor precondition was violated
//!   (point outside the region, empty route, too few elevation samples).
//! - [`Error::OutOfRange`]: an id-based accessor was called with an id that
//!   does not exist in the table it addresses.
//! - [`Error::Io`] / [`Error::Malformed`]: a graph file could not be mapped, or
//!   its size does not match the record layout.
//!
//! "No route between two nodes" is a normal outcome and is reported as
//! `Ok(None)` by the route computer, never as an error.

use std::io;
use std::path::PathBuf;

/// Main error type for velo operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Construction-time precondition violation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Id outside the valid extent of a table
    #[error("{table} id {id} out of range (table holds {len} records)")]
    OutOfRange {
        table: &'static str,
        id: u64,
        len: usize,
    },

    /// Graph file missing or unreadable
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Graph file readable but not shaped like the expected table
    #[error("Malformed graph file {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn out_of_range(table: &'static str, id: impl Into<u64>, len: usize) -> Self {
        Error::OutOfRange {
            table,
            id: id.into(),
            len,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for failures raised while loading graph files.
    ///
    /// The engine never retries a load; callers decide whether to try another
    /// directory.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Error::Io { .. } | Error::Malformed { .. })
    }
}

/// Convenience type alias for Results with velo errors
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_the_table() {
        let err = Error::out_of_range("edge", 42u32, 10);
        assert_eq!(
            err.to_string(),
            "edge id 42 out of range (table holds 10 records)"
        );
    }

    #[test]
    fn io_error_keeps_its_source() {
        let err = Error::io(
            "graph/nodes.bin",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("graph/nodes.bin"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.is_load_failure());
    }
}
