//! sectors.bin - 128 x 128 spatial partition of the node table
//!
//! Layout (big-endian), exactly [`SECTOR_COUNT`] records of 6 bytes:
//!
//! ```text
//!   i32 first_node_id
//!   u16 node_count
//! ```
//!
//! Sector `i` covers row `i / 128`, column `i % 128` of the grid laid over
//! [`SwissBounds`]. Node ids are sorted by sector at build time, so a sector
//! is the id range `[first_node_id, first_node_id + node_count)`. Contiguity
//! between consecutive sectors is assumed, never checked.

use bytes::Bytes;
use velo_common::{Error, Result};
use velo_geometry::{PointCh, SwissBounds};

use crate::bits::{be_i32, be_u16};
use crate::NodeId;

pub const GRID_SIDE: usize = 128;
pub const SECTOR_COUNT: usize = GRID_SIDE * GRID_SIDE;
pub const SECTOR_BYTES: usize = 6;

const OFFSET_FIRST_NODE: usize = 0;
const OFFSET_NODE_COUNT: usize = OFFSET_FIRST_NODE + 4;

/// Node id range `[start_node_id, end_node_id)` of one sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sector {
    pub start_node_id: NodeId,
    pub end_node_id: NodeId,
}

impl Sector {
    pub fn node_ids(&self) -> std::ops::Range<NodeId> {
        self.start_node_id..self.end_node_id
    }
}

#[derive(Debug, Clone)]
pub struct GraphSectors {
    buffer: Bytes,
}

impl GraphSectors {
    pub fn new(buffer: Bytes) -> Result<Self> {
        let expected = SECTOR_COUNT * SECTOR_BYTES;
        if buffer.len() != expected {
            return Err(Error::invalid_argument(format!(
                "sector table holds {} bytes, expected {expected}",
                buffer.len()
            )));
        }
        Ok(Self { buffer })
    }

    pub fn sector(&self, index: usize) -> Result<Sector> {
        if index >= SECTOR_COUNT {
            return Err(Error::out_of_range("sector", index as u64, SECTOR_COUNT));
        }
        Ok(self.sector_unchecked(index))
    }

    fn sector_unchecked(&self, index: usize) -> Sector {
        let offset = index * SECTOR_BYTES;
        let start = be_i32(&self.buffer, offset + OFFSET_FIRST_NODE) as u32;
        let count = u32::from(be_u16(&self.buffer, offset + OFFSET_NODE_COUNT));
        Sector {
            start_node_id: start,
            end_node_id: start.saturating_add(count),
        }
    }

    /// Every sector whose cell intersects the square of half-side `distance`
    /// centred on `center`, in ascending sector index order.
    ///
    /// Cells beyond the grid are dropped by clamping the row/column bounds.
    pub fn sectors_in_area(&self, center: &PointCh, distance: f64) -> Vec<Sector> {
        let cell_width = SwissBounds::WIDTH / GRID_SIDE as f64;
        let cell_height = SwissBounds::HEIGHT / GRID_SIDE as f64;

        let col_min = grid_index(center.e() - distance - SwissBounds::MIN_E, cell_width);
        let col_max = grid_index(center.e() + distance - SwissBounds::MIN_E, cell_width);
        let row_min = grid_index(center.n() - distance - SwissBounds::MIN_N, cell_height);
        let row_max = grid_index(center.n() + distance - SwissBounds::MIN_N, cell_height);

        // A negative distance inverts the bounds and selects nothing.
        let cols = (col_max + 1).saturating_sub(col_min);
        let rows = (row_max + 1).saturating_sub(row_min);
        let mut sectors = Vec::with_capacity(cols * rows);
        for row in row_min..=row_max {
            for col in col_min..=col_max {
                sectors.push(self.sector_unchecked(row * GRID_SIDE + col));
            }
        }
        sectors
    }
}

fn grid_index(offset: f64, cell_size: f64) -> usize {
    let raw = (offset / cell_size).floor();
    raw.clamp(0.0, (GRID_SIDE - 1) as f64) as usize
}
