//! # kycmid-container
//!
//! Parsing for the KYC resource container and extraction of the embedded
//! music track.
//!
//! The container has no self-describing structure worth speaking of: the
//! fields we need sit at fixed offsets. A little-endian u32 at byte 208
//! gives the size of a secondary embedded section that precedes the track
//! in the decoded output (it is discarded), a little-endian u32 at byte 740
//! gives the exact decoded length, and the LZAH bit stream starts at
//! byte 748 and runs to the end of the file.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

use kycmid_core::error::{KycError, Result};
use kycmid_lzah::decode_lzah;
use std::path::{Path, PathBuf};

/// Offset of the discard-prefix length field (little-endian u32).
pub const DISCARD_LEN_OFFSET: usize = 208;

/// Offset of the decoded-length field (little-endian u32).
pub const OUTPUT_LEN_OFFSET: usize = 740;

/// Offset where the compressed bit stream begins.
pub const PAYLOAD_OFFSET: usize = 748;

/// Hard ceiling on expansion: one payload bit cannot decode to more than
/// one maximum-length match (60 bytes). Declared lengths above this bound
/// cannot come from a well-formed container.
const MAX_BYTES_PER_PAYLOAD_BIT: usize = 60;

/// The header fields of a KYC container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KycHeader {
    /// Bytes to discard from the front of the decoded output.
    pub discard_len: usize,
    /// Exact decoded output length.
    pub output_len: usize,
}

impl KycHeader {
    /// Parse and validate the fixed-offset header fields.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < PAYLOAD_OFFSET {
            return Err(KycError::malformed(format!(
                "file is {} bytes, shorter than the {} byte header",
                data.len(),
                PAYLOAD_OFFSET
            )));
        }

        let discard_len = read_u32_le(data, DISCARD_LEN_OFFSET) as usize;
        let output_len = read_u32_le(data, OUTPUT_LEN_OFFSET) as usize;

        if discard_len > output_len {
            return Err(KycError::malformed(format!(
                "discard prefix {discard_len} exceeds decoded length {output_len}"
            )));
        }

        let payload_bits = (data.len() - PAYLOAD_OFFSET) * 8;
        if output_len > payload_bits * MAX_BYTES_PER_PAYLOAD_BIT {
            return Err(KycError::malformed(format!(
                "decoded length {output_len} is impossible for a {} byte payload",
                data.len() - PAYLOAD_OFFSET
            )));
        }

        Ok(Self {
            discard_len,
            output_len,
        })
    }
}

/// Decode the container's payload and return the embedded track with the
/// secondary-section prefix removed.
pub fn extract_track(data: &[u8]) -> Result<Vec<u8>> {
    let header = KycHeader::parse(data)?;
    let mut decoded = decode_lzah(&data[PAYLOAD_OFFSET..], header.output_len)?;
    decoded.drain(..header.discard_len);
    Ok(decoded)
}

/// Derive the output path: the input with its extension (whatever its
/// case) replaced by `.mid`.
pub fn track_output_path(input: &Path) -> PathBuf {
    input.with_extension("mid")
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assemble a container with the given header fields and payload.
    fn build_container(discard_len: u32, output_len: u32, payload: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; PAYLOAD_OFFSET];
        data[DISCARD_LEN_OFFSET..DISCARD_LEN_OFFSET + 4]
            .copy_from_slice(&discard_len.to_le_bytes());
        data[OUTPUT_LEN_OFFSET..OUTPUT_LEN_OFFSET + 4].copy_from_slice(&output_len.to_le_bytes());
        data.extend_from_slice(payload);
        data
    }

    /// A one-symbol payload: the fresh tree's code for the literal `M`
    /// (nine bits, 1110_1100_1) plus zero padding.
    const LITERAL_M_PAYLOAD: [u8; 2] = [0xEC, 0x80];

    #[test]
    fn test_parse_valid_header() {
        let data = build_container(4, 16, &[0u8; 8]);
        let header = KycHeader::parse(&data).unwrap();
        assert_eq!(
            header,
            KycHeader {
                discard_len: 4,
                output_len: 16
            }
        );
    }

    #[test]
    fn test_short_file_is_malformed() {
        let err = KycHeader::parse(&[0u8; 100]).unwrap_err();
        assert!(matches!(err, KycError::MalformedContainer { .. }));

        // One byte short of the payload start still fails.
        let err = KycHeader::parse(&[0u8; PAYLOAD_OFFSET - 1]).unwrap_err();
        assert!(matches!(err, KycError::MalformedContainer { .. }));
    }

    #[test]
    fn test_discard_larger_than_output_is_malformed() {
        let data = build_container(17, 16, &[0u8; 8]);
        let err = KycHeader::parse(&data).unwrap_err();
        assert!(matches!(err, KycError::MalformedContainer { .. }));
    }

    #[test]
    fn test_absurd_output_length_is_malformed() {
        // 4 payload bytes cannot decode to a megabyte.
        let data = build_container(0, 1 << 20, &[0u8; 4]);
        let err = KycHeader::parse(&data).unwrap_err();
        assert!(matches!(err, KycError::MalformedContainer { .. }));
    }

    #[test]
    fn test_extract_single_literal() {
        let data = build_container(0, 1, &LITERAL_M_PAYLOAD);
        assert_eq!(extract_track(&data).unwrap(), b"M");
    }

    #[test]
    fn test_extract_discards_prefix() {
        // The whole decoded output is the secondary section.
        let data = build_container(1, 1, &LITERAL_M_PAYLOAD);
        assert_eq!(extract_track(&data).unwrap(), b"");
    }

    #[test]
    fn test_extract_zero_length_track() {
        let data = build_container(0, 0, &[]);
        assert_eq!(extract_track(&data).unwrap(), b"");
    }

    #[test]
    fn test_truncated_payload_propagates() {
        // Declares two bytes of output but carries a one-symbol stream.
        let data = build_container(0, 2, &LITERAL_M_PAYLOAD);
        let err = extract_track(&data).unwrap_err();
        assert!(matches!(err, KycError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn test_track_output_path() {
        assert_eq!(
            track_output_path(Path::new("03000.KYC")),
            PathBuf::from("03000.mid")
        );
        assert_eq!(
            track_output_path(Path::new("music/03000.kyc")),
            PathBuf::from("music/03000.mid")
        );
        assert_eq!(
            track_output_path(Path::new("bare")),
            PathBuf::from("bare.mid")
        );
    }
}
