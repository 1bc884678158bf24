//! LZAH decompression.
//!
//! One symbol per loop iteration: literals (0..256) pass straight into the
//! history window, match symbols (256..314) pull a distance code and replay
//! window history. The tree is updated after every symbol, matching the
//! encoder's schedule.

use crate::distance::read_match_distance;
use crate::tree::AdaptiveHuffman;
use kycmid_core::bitstream::BitReader;
use kycmid_core::error::Result;
use kycmid_core::window::{HistoryWindow, WINDOW_MASK};

/// Symbol values below this are literal bytes; the rest are length classes.
const LITERAL_LIMIT: u16 = 256;

/// Copy length = symbol - LENGTH_BASE, giving lengths 3..=60 for symbols
/// 256..=313.
const LENGTH_BASE: u16 = 253;

/// A single-use LZAH decoder.
///
/// The decoder owns its bit reader, tree, and window, and is consumed by
/// [`decode`](Self::decode): every decode operation starts from a freshly
/// initialized tree and window, so independent decodes can run in parallel
/// without sharing state.
#[derive(Debug)]
pub struct LzahDecoder<'a> {
    /// Compressed bit stream.
    bits: BitReader<'a>,
    /// Adaptive Huffman tree.
    tree: AdaptiveHuffman,
    /// Sliding-window history plus accumulated output.
    window: HistoryWindow,
    /// Output bytes still owed.
    remaining: usize,
}

impl<'a> LzahDecoder<'a> {
    /// Create a decoder for one compressed payload and its declared
    /// decoded length.
    pub fn new(input: &'a [u8], output_len: usize) -> Self {
        Self {
            bits: BitReader::new(input),
            tree: AdaptiveHuffman::new(),
            window: HistoryWindow::new(output_len),
            remaining: output_len,
        }
    }

    /// Run the decode loop to completion.
    ///
    /// On success the output length equals the declared length exactly.
    /// If the compressed stream runs out first, the error from the bit
    /// reader propagates; the partial output is dropped with the decoder.
    pub fn decode(mut self) -> Result<Vec<u8>> {
        while self.remaining > 0 {
            let symbol = self.tree.decode_symbol(&mut self.bits)?;
            self.tree.update(symbol);

            if symbol < LITERAL_LIMIT {
                self.window.write_literal(symbol as u8);
                self.remaining -= 1;
            } else {
                let length = usize::from(symbol - LENGTH_BASE);
                let distance = read_match_distance(&mut self.bits)?;
                let start = self.window.position().wrapping_sub(distance + 1) & WINDOW_MASK;
                // The declared length caps the copy; a match is allowed to
                // run past the end of the stream.
                let count = length.min(self.remaining);
                self.window.copy_match(start, count);
                self.remaining -= count;
            }
        }

        Ok(self.window.into_output())
    }
}

/// Decode a complete LZAH payload into exactly `output_len` bytes.
pub fn decode_lzah(input: &[u8], output_len: usize) -> Result<Vec<u8>> {
    LzahDecoder::new(input, output_len).decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::fixture::write_distance;
    use kycmid_core::bitstream::BitWriter;
    use kycmid_core::error::KycError;

    /// Mirror encoder: maintains the same adaptive tree as the decoder and
    /// emits symbol codes and distance fields bit for bit.
    struct FixtureEncoder {
        tree: AdaptiveHuffman,
        writer: BitWriter,
    }

    impl FixtureEncoder {
        fn new() -> Self {
            Self {
                tree: AdaptiveHuffman::new(),
                writer: BitWriter::new(),
            }
        }

        fn symbol(&mut self, symbol: u16) {
            let (code, len) = self.tree.symbol_code(symbol);
            self.writer.write_bits(code, len);
            self.tree.update(symbol);
        }

        fn literal(&mut self, byte: u8) {
            self.symbol(u16::from(byte));
        }

        fn match_ref(&mut self, distance: usize, length: usize) {
            assert!((3..=60).contains(&length));
            self.symbol(length as u16 + LENGTH_BASE);
            write_distance(&mut self.writer, distance);
        }

        fn finish(self) -> Vec<u8> {
            self.writer.finish()
        }
    }

    #[test]
    fn test_literals_decode_exactly() {
        let mut encoder = FixtureEncoder::new();
        for &byte in b"MID" {
            encoder.literal(byte);
        }
        let data = encoder.finish();

        let output = decode_lzah(&data, 3).unwrap();
        assert_eq!(output, b"MID");
    }

    #[test]
    fn test_decode_is_deterministic() {
        let mut encoder = FixtureEncoder::new();
        for &byte in b"deterministic" {
            encoder.literal(byte);
        }
        let data = encoder.finish();

        let first = decode_lzah(&data, 13).unwrap();
        let second = decode_lzah(&data, 13).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 13);
    }

    #[test]
    fn test_match_replays_history() {
        let mut encoder = FixtureEncoder::new();
        for &byte in b"ABC" {
            encoder.literal(byte);
        }
        // Distance field 2 = three bytes back; length 5 overlaps the
        // cursor, so the copy reads bytes it wrote itself.
        encoder.match_ref(2, 5);
        let data = encoder.finish();

        let output = decode_lzah(&data, 8).unwrap();
        assert_eq!(output, b"ABCABCAB");
    }

    #[test]
    fn test_match_respects_declared_length() {
        let mut encoder = FixtureEncoder::new();
        for &byte in b"ABC" {
            encoder.literal(byte);
        }
        encoder.match_ref(2, 5);
        let data = encoder.finish();

        // Only 6 bytes declared: the match is cut short.
        let output = decode_lzah(&data, 6).unwrap();
        assert_eq!(output, b"ABCABC");
    }

    #[test]
    fn test_match_into_preloaded_window() {
        // At stream start the window holds fill bytes; a match may
        // legitimately reference them.
        let mut encoder = FixtureEncoder::new();
        encoder.match_ref(100, 4);
        let data = encoder.finish();

        let output = decode_lzah(&data, 4).unwrap();
        assert_eq!(output, b"    ");
    }

    #[test]
    fn test_zero_length_output() {
        let output = decode_lzah(&[], 0).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_empty_input_with_owed_output_fails() {
        let err = decode_lzah(&[], 1).unwrap_err();
        assert!(matches!(err, KycError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn test_truncated_stream_fails_without_padding() {
        let mut encoder = FixtureEncoder::new();
        for &byte in b"MID" {
            encoder.literal(byte);
        }
        let data = encoder.finish();

        // Declared one byte more than the stream encodes. Codes are still
        // at least 8 bits this early, longer than any zero padding in the
        // final byte, so the reader must run dry rather than fabricate a
        // fourth symbol.
        let err = decode_lzah(&data, 4).unwrap_err();
        assert!(matches!(err, KycError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn test_mixed_stream() {
        // Literal runs and matches interleaved, checked against an
        // independently computed expansion.
        let mut encoder = FixtureEncoder::new();
        for &byte in b"the quick brown fox " {
            encoder.literal(byte);
        }
        encoder.match_ref(19, 10); // "the quick "
        for &byte in b"dog" {
            encoder.literal(byte);
        }
        encoder.match_ref(6, 3); // "ick" out of the second "quick"
        let data = encoder.finish();

        let expected = b"the quick brown fox the quick dogick";
        let output = decode_lzah(&data, expected.len()).unwrap();
        assert_eq!(output, expected);
    }
}
