//! attributes.bin - distinct attribute sets shared by edges
//!
//! One big-endian `u64` per set. Edges refer to a set by its 16-bit index.

use bytes::Bytes;
use std::fmt;
use velo_common::{Error, Result};

use crate::bits::be_u64;
use crate::AttributeIndex;

pub const ATTRIBUTE_SET_BYTES: usize = 8;

/// Immutable set of up to 64 attribute flags (highway class, surface, access...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AttributeSet(u64);

impl AttributeSet {
    pub const EMPTY: AttributeSet = AttributeSet(0);

    pub const fn from_bits(bits: u64) -> Self {
        AttributeSet(bits)
    }

    /// Set holding exactly the given flag positions.
    pub fn of(flags: &[u32]) -> Result<Self> {
        let mut bits = 0u64;
        for &flag in flags {
            if flag >= u64::BITS {
                return Err(Error::invalid_argument(format!(
                    "attribute {flag} does not fit in a 64-bit set"
                )));
            }
            bits |= 1 << flag;
        }
        Ok(AttributeSet(bits))
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn contains(self, flag: u32) -> bool {
        flag < u64::BITS && self.0 & (1 << flag) != 0
    }

    pub const fn intersects(self, that: AttributeSet) -> bool {
        self.0 & that.0 != 0
    }

    pub const fn union(self, that: AttributeSet) -> AttributeSet {
        AttributeSet(self.0 | that.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for flag in (0..u64::BITS).filter(|&b| self.contains(b)) {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{flag}")?;
            first = false;
        }
        f.write_str("}")
    }
}

#[derive(Debug, Clone)]
pub struct AttributeTable {
    buffer: Bytes,
}

impl AttributeTable {
    pub fn new(buffer: Bytes) -> Result<Self> {
        if buffer.len() % ATTRIBUTE_SET_BYTES != 0 {
            return Err(Error::invalid_argument(format!(
                "attribute table length {} is not a multiple of {ATTRIBUTE_SET_BYTES}",
                buffer.len()
            )));
        }
        Ok(Self { buffer })
    }

    pub fn count(&self) -> usize {
        self.buffer.len() / ATTRIBUTE_SET_BYTES
    }

    pub fn get(&self, index: AttributeIndex) -> Result<AttributeSet> {
        let count = self.count();
        if usize::from(index) >= count {
            return Err(Error::out_of_range("attribute set", index, count));
        }
        Ok(AttributeSet(be_u64(
            &self.buffer,
            usize::from(index) * ATTRIBUTE_SET_BYTES,
        )))
    }
}
