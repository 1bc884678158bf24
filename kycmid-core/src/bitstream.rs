//! Bit-level I/O for the LZAH codec.
//!
//! The KYC payload is a raw bit stream with no byte alignment guarantees:
//! Huffman codes, the 8-bit distance prefix, and the distance extra bits all
//! run back to back. Bits are packed MSB-first within each byte.
//!
//! # Example
//!
//! ```
//! use kycmid_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3);
//! writer.write_bits(0b1100, 4);
//! let data = writer.finish();
//!
//! let mut reader = BitReader::new(&data);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{KycError, Result};

/// An MSB-first bit reader over an in-memory byte slice.
///
/// Exhausting the input is an explicit error rather than an implicit pad:
/// a well-formed container never needs more bits than its declared output
/// length requires, so running dry means the stream is truncated.
#[derive(Debug)]
pub struct BitReader<'a> {
    /// Compressed byte sequence.
    input: &'a [u8],
    /// Index of the next byte to pull.
    next: usize,
    /// Byte currently being consumed, left-shifted as bits are taken.
    current: u8,
    /// Unconsumed bits remaining in `current` (0-8).
    bits_left: u8,
    /// Total bits consumed (for error reporting).
    total_bits_read: u64,
}

impl<'a> BitReader<'a> {
    /// Create a new `BitReader` over the given input.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            next: 0,
            current: 0,
            bits_left: 0,
            total_bits_read: 0,
        }
    }

    /// Get the current bit position (total bits consumed so far).
    pub fn bit_position(&self) -> u64 {
        self.total_bits_read
    }

    /// Read a single bit, MSB-first.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bits_left == 0 {
            let byte = *self
                .input
                .get(self.next)
                .ok_or(KycError::UnexpectedEndOfInput {
                    bit_position: self.total_bits_read,
                })?;
            self.next += 1;
            self.current = byte;
            self.bits_left = 8;
        }

        let bit = self.current & 0x80 != 0;
        self.current <<= 1;
        self.bits_left -= 1;
        self.total_bits_read += 1;

        Ok(bit)
    }

    /// Read up to 16 bits, assembled MSB-first.
    ///
    /// The first bit read lands in the most significant position of the
    /// result. The read is bit-stream continuous, not input-byte aligned.
    pub fn read_bits(&mut self, count: u8) -> Result<u16> {
        debug_assert!(count <= 16, "Cannot read more than 16 bits at once");

        let mut value = 0u16;
        for _ in 0..count {
            value = (value << 1) | u16::from(self.read_bit()?);
        }
        Ok(value)
    }
}

/// An MSB-first bit writer accumulating into a `Vec<u8>`.
///
/// The codec itself never writes bits; this exists so tests can assemble
/// compressed fixtures bit by bit.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// Completed bytes.
    output: Vec<u8>,
    /// Byte being filled, MSB-first.
    current: u8,
    /// Bits already placed in `current` (0-7).
    bits_in_current: u8,
}

impl BitWriter {
    /// Create a new, empty `BitWriter`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        self.current = (self.current << 1) | u8::from(bit);
        self.bits_in_current += 1;
        if self.bits_in_current == 8 {
            self.output.push(self.current);
            self.current = 0;
            self.bits_in_current = 0;
        }
    }

    /// Write the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 != 0);
        }
    }

    /// Total bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.output.len() as u64 * 8 + u64::from(self.bits_in_current)
    }

    /// Pad the final partial byte with zero bits and return the bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits_in_current > 0 {
            self.current <<= 8 - self.bits_in_current;
            self.output.push(self.current);
        }
        self.output
    }
}
