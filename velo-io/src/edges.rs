//! edges.bin, profile_ids.bin, elevations.bin - directed edges and their
//! elevation samples
//!
//! Edge record (big-endian), 10 bytes per edge:
//!
//! ```text
//!   i32 target      >= 0: target node id; < 0: inverted edge, target = !value
//!   u16 length      UQ12.4 meters
//!   u16 gain        UQ12.4 meters of positive elevation change
//!   u16 attributes  index into attributes.bin
//! ```
//!
//! Profile descriptor, one `u32` per edge:
//!
//! ```text
//!   bits 31..30  kind  0 = none, 1 = raw UQ12.4, 2 = Q4.4 deltas, 3 = Q0.4 deltas
//!   bits 29..0   index of the first sample in elevations.bin
//! ```
//!
//! An edge of `length_q4` carries `1 + ceil(length_q4 / 32)` samples (one
//! every two meters, both ends included). Compressed kinds store the first
//! sample raw, then signed deltas packed from the most significant bits of
//! each `u16` downwards (two per word for Q4.4, four for Q0.4). Samples of an
//! inverted edge are stored in way order and reversed on decode.

use bytes::Bytes;
use velo_common::{Error, Result};
use velo_geometry::math::ceil_div;

use crate::bits::{be_i32, be_u16, be_u32, q28_4, signed_field, unsigned_field};
use crate::{AttributeIndex, EdgeId, NodeId};

pub const EDGE_BYTES: usize = 10;
pub const PROFILE_ID_BYTES: usize = 4;
pub const ELEVATION_BYTES: usize = 2;

const OFFSET_TARGET: usize = 0;
const OFFSET_LENGTH: usize = OFFSET_TARGET + 4;
const OFFSET_GAIN: usize = OFFSET_LENGTH + 2;
const OFFSET_ATTRIBUTES: usize = OFFSET_GAIN + 2;

const KIND_START: u32 = 30;
const KIND_BITS: u32 = 2;
const FIRST_SAMPLE_START: u32 = 0;
const FIRST_SAMPLE_BITS: u32 = 30;

/// Meters between consecutive samples, as UQ28.4.
const SAMPLE_SPACING_Q4: u32 = 2 << 4;

/// How an edge's elevation samples are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    None,
    Raw,
    /// 8-bit Q4.4 deltas, two per word
    DeltaQ4_4,
    /// 4-bit Q0.4 deltas, four per word
    DeltaQ0_4,
}

impl ProfileKind {
    fn from_bits(bits: u32) -> Self {
        match bits {
            0 => ProfileKind::None,
            1 => ProfileKind::Raw,
            2 => ProfileKind::DeltaQ4_4,
            _ => ProfileKind::DeltaQ0_4,
        }
    }

    /// Width in bits of one delta, `None` for uncompressed kinds.
    fn delta_bits(self) -> Option<u32> {
        match self {
            ProfileKind::DeltaQ4_4 => Some(8),
            ProfileKind::DeltaQ0_4 => Some(4),
            ProfileKind::None | ProfileKind::Raw => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphEdges {
    edges: Bytes,
    profile_ids: Bytes,
    elevations: Bytes,
}

impl GraphEdges {
    pub fn new(edges: Bytes, profile_ids: Bytes, elevations: Bytes) -> Result<Self> {
        if edges.len() % EDGE_BYTES != 0 {
            return Err(Error::invalid_argument(format!(
                "edge table length {} is not a multiple of {EDGE_BYTES}",
                edges.len()
            )));
        }
        if profile_ids.len() != edges.len() / EDGE_BYTES * PROFILE_ID_BYTES {
            return Err(Error::invalid_argument(format!(
                "{} profile descriptors for {} edges",
                profile_ids.len() / PROFILE_ID_BYTES,
                edges.len() / EDGE_BYTES
            )));
        }
        if elevations.len() % ELEVATION_BYTES != 0 {
            return Err(Error::invalid_argument(format!(
                "elevation table length {} is odd",
                elevations.len()
            )));
        }
        Ok(Self {
            edges,
            profile_ids,
            elevations,
        })
    }

    pub fn count(&self) -> usize {
        self.edges.len() / EDGE_BYTES
    }

    fn offset(&self, edge_id: EdgeId) -> Result<usize> {
        let count = self.count();
        if edge_id as usize >= count {
            return Err(Error::out_of_range("edge", edge_id, count));
        }
        Ok(edge_id as usize * EDGE_BYTES)
    }

    fn raw_target(&self, edge_id: EdgeId) -> Result<i32> {
        let offset = self.offset(edge_id)?;
        Ok(be_i32(&self.edges, offset + OFFSET_TARGET))
    }

    /// True if the edge runs against the direction of the way it was built from.
    pub fn is_inverted(&self, edge_id: EdgeId) -> Result<bool> {
        Ok(self.raw_target(edge_id)? < 0)
    }

    pub fn target_node_id(&self, edge_id: EdgeId) -> Result<NodeId> {
        let raw = self.raw_target(edge_id)?;
        let target = if raw < 0 { !raw } else { raw };
        Ok(target as NodeId)
    }

    fn length_q4(&self, edge_id: EdgeId) -> Result<u16> {
        let offset = self.offset(edge_id)?;
        Ok(be_u16(&self.edges, offset + OFFSET_LENGTH))
    }

    pub fn length(&self, edge_id: EdgeId) -> Result<f64> {
        Ok(q28_4::as_double(i32::from(self.length_q4(edge_id)?)))
    }

    pub fn elevation_gain(&self, edge_id: EdgeId) -> Result<f64> {
        let offset = self.offset(edge_id)?;
        Ok(q28_4::as_double(i32::from(be_u16(&self.edges, offset + OFFSET_GAIN))))
    }

    pub fn attributes_index(&self, edge_id: EdgeId) -> Result<AttributeIndex> {
        let offset = self.offset(edge_id)?;
        Ok(be_u16(&self.edges, offset + OFFSET_ATTRIBUTES))
    }

    fn profile_descriptor(&self, edge_id: EdgeId) -> Result<u32> {
        self.offset(edge_id)?;
        Ok(be_u32(&self.profile_ids, edge_id as usize * PROFILE_ID_BYTES))
    }

    pub fn profile_kind(&self, edge_id: EdgeId) -> Result<ProfileKind> {
        let descriptor = self.profile_descriptor(edge_id)?;
        Ok(ProfileKind::from_bits(unsigned_field(
            descriptor, KIND_START, KIND_BITS,
        )))
    }

    pub fn has_profile(&self, edge_id: EdgeId) -> Result<bool> {
        Ok(self.profile_kind(edge_id)? != ProfileKind::None)
    }

    /// Decoded elevation samples of the edge, in travel direction.
    ///
    /// Empty when the edge has no profile.
    pub fn profile_samples(&self, edge_id: EdgeId) -> Result<Vec<f32>> {
        let descriptor = self.profile_descriptor(edge_id)?;
        let kind = ProfileKind::from_bits(unsigned_field(descriptor, KIND_START, KIND_BITS));
        if kind == ProfileKind::None {
            return Ok(Vec::new());
        }

        let first = unsigned_field(descriptor, FIRST_SAMPLE_START, FIRST_SAMPLE_BITS) as usize;
        let count = 1 + ceil_div(u32::from(self.length_q4(edge_id)?), SAMPLE_SPACING_Q4) as usize;

        let mut samples = Vec::with_capacity(count);
        samples.push(q28_4::as_float(i32::from(self.elevation_word(first)?)));

        match kind.delta_bits() {
            None => {
                for i in 1..count {
                    samples.push(q28_4::as_float(i32::from(self.elevation_word(first + i)?)));
                }
            }
            Some(bits) => {
                let per_word = (16 / bits) as usize;
                let mut current = samples[0];
                for i in 1..count {
                    let word = u32::from(self.elevation_word(first + 1 + (i - 1) / per_word)?);
                    let slot = ((i - 1) % per_word) as u32;
                    let delta = signed_field(word, 16 - bits * (slot + 1), bits);
                    current += q28_4::as_float(delta);
                    samples.push(current);
                }
            }
        }

        if self.is_inverted(edge_id)? {
            samples.reverse();
        }
        Ok(samples)
    }

    fn elevation_word(&self, index: usize) -> Result<u16> {
        let count = self.elevations.len() / ELEVATION_BYTES;
        if index >= count {
            return Err(Error::out_of_range("elevation sample", index as u64, count));
        }
        Ok(be_u16(&self.elevations, index * ELEVATION_BYTES))
    }
}
