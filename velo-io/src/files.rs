//! Mapping a graph directory into memory
//!
//! A graph directory holds six files written by the offline graph builder:
//!
//! | file              | table              |
//! |-------------------|--------------------|
//! | `sectors.bin`     | [`GraphSectors`]   |
//! | `nodes.bin`       | [`GraphNodes`]     |
//! | `edges.bin`       | [`GraphEdges`]     |
//! | `profile_ids.bin` | [`GraphEdges`]     |
//! | `elevations.bin`  | [`GraphEdges`]     |
//! | `attributes.bin`  | [`AttributeTable`] |
//!
//! Each file is mapped read-only and handed to its table as a [`Bytes`] view
//! that owns the mapping.

use bytes::Bytes;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;
use velo_common::{Error, Result};

use crate::attributes::AttributeTable;
use crate::edges::GraphEdges;
use crate::nodes::GraphNodes;
use crate::sectors::GraphSectors;

pub const SECTORS_FILE: &str = "sectors.bin";
pub const NODES_FILE: &str = "nodes.bin";
pub const EDGES_FILE: &str = "edges.bin";
pub const PROFILE_IDS_FILE: &str = "profile_ids.bin";
pub const ELEVATIONS_FILE: &str = "elevations.bin";
pub const ATTRIBUTES_FILE: &str = "attributes.bin";

/// Every table of one graph directory.
#[derive(Debug, Clone)]
pub struct GraphFiles {
    pub sectors: GraphSectors,
    pub nodes: GraphNodes,
    pub edges: GraphEdges,
    pub attributes: AttributeTable,
}

impl GraphFiles {
    /// Maps the six graph files found in `dir`.
    ///
    /// A missing or unreadable file fails with [`Error::Io`]; a file whose
    /// size does not fit its record layout fails with [`Error::Malformed`].
    pub fn map(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        let sectors = GraphSectors::new(map_file(&dir.join(SECTORS_FILE))?)
            .map_err(|e| malformed(dir.join(SECTORS_FILE), e))?;
        let nodes = GraphNodes::new(map_file(&dir.join(NODES_FILE))?)
            .map_err(|e| malformed(dir.join(NODES_FILE), e))?;

        let edges_bytes = map_file(&dir.join(EDGES_FILE))?;
        let profile_ids = map_file(&dir.join(PROFILE_IDS_FILE))?;
        let elevations = map_file(&dir.join(ELEVATIONS_FILE))?;
        let edges = GraphEdges::new(edges_bytes, profile_ids, elevations)
            .map_err(|e| malformed(dir.join(EDGES_FILE), e))?;

        let attributes = AttributeTable::new(map_file(&dir.join(ATTRIBUTES_FILE))?)
            .map_err(|e| malformed(dir.join(ATTRIBUTES_FILE), e))?;

        debug!(
            dir = %dir.display(),
            nodes = nodes.count(),
            edges = edges.count(),
            attribute_sets = attributes.count(),
            "mapped graph files"
        );

        Ok(Self {
            sectors,
            nodes,
            edges,
            attributes,
        })
    }
}

/// Maps `path` read-only. Empty files yield an empty view, since a zero-length
/// mapping is rejected by some platforms.
pub fn map_file(path: &Path) -> Result<Bytes> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let len = file.metadata().map_err(|e| Error::io(path, e))?.len();
    if len == 0 {
        return Ok(Bytes::new());
    }
    // SAFETY: graph files are immutable once built; nothing in this process
    // writes to them while the mapping is alive.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::io(path, e))?;
    Ok(Bytes::from_owner(mmap))
}

fn malformed(path: PathBuf, err: Error) -> Error {
    match err {
        Error::InvalidArgument(reason) => Error::malformed(path, reason),
        other => other,
    }
}
