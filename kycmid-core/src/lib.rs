//! # kycmid-core
//!
//! Core components for the kycmid extractor.
//!
//! This crate provides the fundamental building blocks shared by the codec
//! and container layers:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for variable-length codes
//! - [`window`]: sliding-window history buffer for back-reference copies
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! kycmid is a small layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ L4: CLI (kycmid-cli)                        │
//! ├─────────────────────────────────────────────┤
//! │ L3: Container (kycmid-container)            │
//! │     KYC header fields, track extraction     │
//! ├─────────────────────────────────────────────┤
//! │ L2: Codec (kycmid-lzah)                     │
//! │     LZSS + adaptive Huffman decoder         │
//! ├─────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                  │
//! │     BitReader/BitWriter, HistoryWindow      │
//! └─────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod window;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{KycError, Result};
pub use window::HistoryWindow;
