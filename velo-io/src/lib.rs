//! Binary graph tables for the velo route engine
//!
//! The graph is stored as a handful of flat, fixed-width record files which
//! are memory-mapped and read in place. Each table type wraps one file (or,
//! for edges, three) and decodes records on access.

pub mod attributes;
pub mod bits;
pub mod edges;
pub mod files;
pub mod nodes;
pub mod sectors;

pub use attributes::{AttributeSet, AttributeTable};
pub use edges::{GraphEdges, ProfileKind};
pub use files::GraphFiles;
pub use nodes::GraphNodes;
pub use sectors::{GraphSectors, Sector};

/// Index into the node table.
pub type NodeId = u32;
/// Index into the edge table.
pub type EdgeId = u32;
/// Index into the attribute-set table.
pub type AttributeIndex = u16;
