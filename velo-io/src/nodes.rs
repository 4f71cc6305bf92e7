//! nodes.bin - node positions and adjacency
//!
//! Layout (big-endian), one 12-byte record per node:
//!
//! ```text
//!   u32 east    UQ28.4 meters
//!   u32 north   UQ28.4 meters
//!   u32 out     bits 31..28 out-degree, bits 27..0 first out-edge id
//! ```
//!
//! The out-edges of a node occupy the contiguous id range
//! `first .. first + degree`.

use bytes::Bytes;
use velo_common::{Error, Result};

use crate::bits::{be_i32, be_u32, q28_4, unsigned_field};
use crate::{EdgeId, NodeId};

pub const NODE_BYTES: usize = 12;

const OFFSET_E: usize = 0;
const OFFSET_N: usize = OFFSET_E + 4;
const OFFSET_OUT_EDGES: usize = OFFSET_N + 4;

const DEGREE_START: u32 = 28;
const DEGREE_BITS: u32 = 4;
const FIRST_EDGE_START: u32 = 0;
const FIRST_EDGE_BITS: u32 = 28;

#[derive(Debug, Clone)]
pub struct GraphNodes {
    buffer: Bytes,
}

impl GraphNodes {
    pub fn new(buffer: Bytes) -> Result<Self> {
        if buffer.len() % NODE_BYTES != 0 {
            return Err(Error::invalid_argument(format!(
                "node table length {} is not a multiple of {NODE_BYTES}",
                buffer.len()
            )));
        }
        Ok(Self { buffer })
    }

    pub fn count(&self) -> usize {
        self.buffer.len() / NODE_BYTES
    }

    fn offset(&self, node_id: NodeId) -> Result<usize> {
        let count = self.count();
        if node_id as usize >= count {
            return Err(Error::out_of_range("node", node_id, count));
        }
        Ok(node_id as usize * NODE_BYTES)
    }

    pub fn node_e(&self, node_id: NodeId) -> Result<f64> {
        let offset = self.offset(node_id)?;
        Ok(q28_4::as_double(be_i32(&self.buffer, offset + OFFSET_E)))
    }

    pub fn node_n(&self, node_id: NodeId) -> Result<f64> {
        let offset = self.offset(node_id)?;
        Ok(q28_4::as_double(be_i32(&self.buffer, offset + OFFSET_N)))
    }

    pub fn out_degree(&self, node_id: NodeId) -> Result<u32> {
        let packed = self.out_edges(node_id)?;
        Ok(unsigned_field(packed, DEGREE_START, DEGREE_BITS))
    }

    /// Id of the `index`-th out-edge of `node_id`.
    pub fn edge_id(&self, node_id: NodeId, index: u32) -> Result<EdgeId> {
        let packed = self.out_edges(node_id)?;
        let degree = unsigned_field(packed, DEGREE_START, DEGREE_BITS);
        if index >= degree {
            return Err(Error::out_of_range("out-edge", index, degree as usize));
        }
        Ok(unsigned_field(packed, FIRST_EDGE_START, FIRST_EDGE_BITS) + index)
    }

    fn out_edges(&self, node_id: NodeId) -> Result<u32> {
        let offset = self.offset(node_id)?;
        Ok(be_u32(&self.buffer, offset + OFFSET_OUT_EDGES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(e_q4: u32, n_q4: u32, degree: u32, first_edge: u32) -> Vec<u8> {
        let mut buf = Vec::with_capacity(NODE_BYTES);
        buf.extend_from_slice(&e_q4.to_be_bytes());
        buf.extend_from_slice(&n_q4.to_be_bytes());
        buf.extend_from_slice(&((degree << 28) | first_edge).to_be_bytes());
        buf
    }

    #[test]
    fn decodes_position_and_adjacency() {
        let mut buf = record(2_600_000 << 4, (1_200_000 << 4) | 8, 2, 0x1234);
        buf.extend(record(2_485_000 << 4, 1_075_000 << 4, 15, 0x0FFF_FFF0));
        let nodes = GraphNodes::new(Bytes::from(buf)).unwrap();

        assert_eq!(nodes.count(), 2);
        assert_eq!(nodes.node_e(0).unwrap(), 2_600_000.0);
        assert_eq!(nodes.node_n(0).unwrap(), 1_200_000.5);
        assert_eq!(nodes.out_degree(0).unwrap(), 2);
        assert_eq!(nodes.edge_id(0, 0).unwrap(), 0x1234);
        assert_eq!(nodes.edge_id(0, 1).unwrap(), 0x1235);

        assert_eq!(nodes.out_degree(1).unwrap(), 15);
        assert_eq!(nodes.edge_id(1, 14).unwrap(), 0x0FFF_FFFE);
    }

    #[test]
    fn ids_outside_the_table_fail() {
        let nodes = GraphNodes::new(Bytes::from(record(0, 0, 1, 0))).unwrap();
        assert!(matches!(nodes.node_e(1), Err(Error::OutOfRange { table: "node", .. })));
        assert!(matches!(nodes.edge_id(0, 1), Err(Error::OutOfRange { table: "out-edge", .. })));
    }

    #[test]
    fn truncated_table_is_rejected() {
        assert!(GraphNodes::new(Bytes::from(vec![0u8; NODE_BYTES + 3])).is_err());
    }
}
