//! Bit-field and fixed-point decoding for the packed graph records
//!
//! Bit positions count from the least significant bit (bit 0). A field
//! `(start, length)` covers bits `start .. start + length`.

use velo_common::{Error, Result};

fn check_range(start: u32, length: u32) -> Result<()> {
    if length == 0 || length > 32 || start >= 32 || start + length > 32 {
        return Err(Error::invalid_argument(format!(
            "bit range start={start} length={length} does not fit in 32 bits"
        )));
    }
    Ok(())
}

/// Unsigned field `(start, length)` of `value`.
pub fn extract_unsigned(value: u32, start: u32, length: u32) -> Result<u32> {
    check_range(start, length)?;
    Ok(unsigned_field(value, start, length))
}

/// Two's-complement field `(start, length)` of `value`, sign-extended.
pub fn extract_signed(value: u32, start: u32, length: u32) -> Result<i32> {
    check_range(start, length)?;
    Ok(signed_field(value, start, length))
}

// Callers pass constant, already valid ranges.
pub(crate) const fn unsigned_field(value: u32, start: u32, length: u32) -> u32 {
    let mask = if length == 32 {
        u32::MAX
    } else {
        (1u32 << length) - 1
    };
    (value >> start) & mask
}

pub(crate) const fn signed_field(value: u32, start: u32, length: u32) -> i32 {
    ((value << (32 - start - length)) as i32) >> (32 - length)
}

/// Fixed-point numbers with 4 fractional bits (Q28.4 and its narrower
/// relatives UQ12.4, Q4.4, Q0.4, which all decode the same way).
pub mod q28_4 {
    pub fn of_int(i: i32) -> i32 {
        i << 4
    }

    pub fn as_double(q: i32) -> f64 {
        f64::from(q) / 16.0
    }

    pub fn as_float(q: i32) -> f32 {
        q as f32 / 16.0
    }
}

pub(crate) fn be_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([buf[at], buf[at + 1]])
}

pub(crate) fn be_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

pub(crate) fn be_i32(buf: &[u8], at: usize) -> i32 {
    be_u32(buf, at) as i32
}

pub(crate) fn be_u64(buf: &[u8], at: usize) -> u64 {
    u64::from_be_bytes([
        buf[at],
        buf[at + 1],
        buf[at + 2],
        buf[at + 3],
        buf[at + 4],
        buf[at + 5],
        buf[at + 6],
        buf[at + 7],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_fields() {
        assert_eq!(extract_unsigned(0b1011_0110, 1, 3).unwrap(), 0b011);
        assert_eq!(extract_unsigned(0xF000_0000, 28, 4).unwrap(), 0xF);
        assert_eq!(extract_unsigned(0xDEAD_BEEF, 0, 32).unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn signed_fields_are_sign_extended() {
        assert_eq!(extract_signed(0b1010_0000, 4, 4).unwrap(), -6);
        assert_eq!(extract_signed(0b0110_0000, 4, 4).unwrap(), 6);
        assert_eq!(extract_signed(0x0000_FF00, 8, 8).unwrap(), -1);
        assert_eq!(extract_signed(0xFFFF_FFFF, 0, 32).unwrap(), -1);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        assert!(extract_unsigned(1, 0, 0).is_err());
        assert!(extract_unsigned(1, 30, 3).is_err());
        assert!(extract_signed(1, 32, 1).is_err());
    }

    #[test]
    fn fixed_point() {
        assert_eq!(q28_4::of_int(2), 32);
        assert_eq!(q28_4::as_double(0b1_1000), 1.5);
        assert_eq!(q28_4::as_float(-8), -0.5);
    }

    #[test]
    fn big_endian_reads() {
        let buf = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0];
        assert_eq!(be_u16(&buf, 0), 0x1234);
        assert_eq!(be_u32(&buf, 2), 0x5678_9ABC);
        assert_eq!(be_u64(&buf, 0), 0x1234_5678_9ABC_DEF0);
        assert!(be_i32(&[0xFF, 0xFF, 0xFF, 0xFE], 0) == -2);
    }
}
