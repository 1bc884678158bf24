//! Fixed prefix-code table for match distances.
//!
//! A match distance is encoded as an 8-bit prefix followed by 1 to 6 extra
//! bits. The prefix (read as 8 continuous bits of the stream, not aligned to
//! input bytes) indexes two tables: the pre-shifted high 6 bits of the
//! 12-bit distance, and how many extra bits follow. Extra bits are appended
//! to the low end of the prefix; the low 6 bits of the extended value are
//! the distance's low half. Short distances get short groups, so the table
//! front is dense with small bases.
//!
//! The tables are fixed data shared with the encoder; they are embedded
//! verbatim, never recomputed.

use kycmid_core::bitstream::BitReader;
use kycmid_core::error::Result;

/// High 6 bits of the distance, pre-shifted, indexed by the 8-bit prefix.
pub(crate) const DISTANCE_BASE: [u16; 256] = [
    0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000,
    0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000,
    0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000,
    0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000, 0x000,
    0x040, 0x040, 0x040, 0x040, 0x040, 0x040, 0x040, 0x040,
    0x040, 0x040, 0x040, 0x040, 0x040, 0x040, 0x040, 0x040,
    0x080, 0x080, 0x080, 0x080, 0x080, 0x080, 0x080, 0x080,
    0x080, 0x080, 0x080, 0x080, 0x080, 0x080, 0x080, 0x080,
    0x0C0, 0x0C0, 0x0C0, 0x0C0, 0x0C0, 0x0C0, 0x0C0, 0x0C0,
    0x0C0, 0x0C0, 0x0C0, 0x0C0, 0x0C0, 0x0C0, 0x0C0, 0x0C0,
    0x100, 0x100, 0x100, 0x100, 0x100, 0x100, 0x100, 0x100,
    0x140, 0x140, 0x140, 0x140, 0x140, 0x140, 0x140, 0x140,
    0x180, 0x180, 0x180, 0x180, 0x180, 0x180, 0x180, 0x180,
    0x1C0, 0x1C0, 0x1C0, 0x1C0, 0x1C0, 0x1C0, 0x1C0, 0x1C0,
    0x200, 0x200, 0x200, 0x200, 0x200, 0x200, 0x200, 0x200,
    0x240, 0x240, 0x240, 0x240, 0x240, 0x240, 0x240, 0x240,
    0x280, 0x280, 0x280, 0x280, 0x280, 0x280, 0x280, 0x280,
    0x2C0, 0x2C0, 0x2C0, 0x2C0, 0x2C0, 0x2C0, 0x2C0, 0x2C0,
    0x300, 0x300, 0x300, 0x300, 0x340, 0x340, 0x340, 0x340,
    0x380, 0x380, 0x380, 0x380, 0x3C0, 0x3C0, 0x3C0, 0x3C0,
    0x400, 0x400, 0x400, 0x400, 0x440, 0x440, 0x440, 0x440,
    0x480, 0x480, 0x480, 0x480, 0x4C0, 0x4C0, 0x4C0, 0x4C0,
    0x500, 0x500, 0x500, 0x500, 0x540, 0x540, 0x540, 0x540,
    0x580, 0x580, 0x580, 0x580, 0x5C0, 0x5C0, 0x5C0, 0x5C0,
    0x600, 0x600, 0x640, 0x640, 0x680, 0x680, 0x6C0, 0x6C0,
    0x700, 0x700, 0x740, 0x740, 0x780, 0x780, 0x7C0, 0x7C0,
    0x800, 0x800, 0x840, 0x840, 0x880, 0x880, 0x8C0, 0x8C0,
    0x900, 0x900, 0x940, 0x940, 0x980, 0x980, 0x9C0, 0x9C0,
    0xA00, 0xA00, 0xA40, 0xA40, 0xA80, 0xA80, 0xAC0, 0xAC0,
    0xB00, 0xB00, 0xB40, 0xB40, 0xB80, 0xB80, 0xBC0, 0xBC0,
    0xC00, 0xC40, 0xC80, 0xCC0, 0xD00, 0xD40, 0xD80, 0xDC0,
    0xE00, 0xE40, 0xE80, 0xEC0, 0xF00, 0xF40, 0xF80, 0xFC0,
];

/// Number of extra bits following the 8-bit prefix, indexed likewise.
pub(crate) const DISTANCE_EXTRA: [u8; 256] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3,
    3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3,
    3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3,
    3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6,
];

/// Read one match distance (0..=4095) from the bit stream.
///
/// The actual backward offset is `distance + 1` bytes behind the window
/// cursor; the caller applies that shift.
pub(crate) fn read_match_distance(bits: &mut BitReader<'_>) -> Result<usize> {
    let prefix = bits.read_bits(8)? as usize;
    let extra = DISTANCE_EXTRA[prefix];
    let extended = ((prefix as u16) << extra) | bits.read_bits(extra)?;
    Ok(usize::from(DISTANCE_BASE[prefix] | (extended & 0x3F)))
}
