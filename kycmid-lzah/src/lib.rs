//! # kycmid-lzah
//!
//! Decoder for the LZAH compression scheme used by KYC game resource
//! containers: an LZ77-style 4096-byte sliding window driven by a
//! self-adjusting (adaptive) Huffman code over a 314-symbol alphabet:
//! 256 literal byte values plus 58 match-length classes for copy lengths
//! 3 to 60.
//!
//! The tree mutates after every decoded symbol and rebuilds itself whenever
//! the root weight saturates, exactly mirroring the encoder, so decoding is
//! bit-for-bit deterministic. There is no encoder here; the format is only
//! ever read.
//!
//! ## Example
//!
//! ```
//! use kycmid_lzah::decode_lzah;
//!
//! // An empty payload legitimately decodes to an empty output.
//! let output = decode_lzah(&[], 0).unwrap();
//! assert!(output.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod distance;
pub mod tree;

// Re-exports
pub use decode::{LzahDecoder, decode_lzah};
pub use tree::AdaptiveHuffman;
