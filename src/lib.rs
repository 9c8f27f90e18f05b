#![cfg_attr(docsrs, feature(doc_cfg))]
//! # bmsframe_lib
//!
//! This crate provides a decoder for the telemetry frames reported by the Titan battery
//! management system (BMS) through its scanning service.
//!
//! A frame is a short byte sequence, usually received as a hex string:
//!
//! ```text
//! [0] header  [1] opcode  [2] length  [3..3+length] payload  [rest] trailer
//! ```
//!
//! The payload is a sequence of big-endian 16-bit words carrying capacity, state of charge,
//! current, voltage and status flags. Decoding never fails: malformed or truncated input
//! results in a partially populated [`protocol::DecodedFrame`] with warnings attached.
//!
//! ```
//! let frame = bmsframe_lib::protocol::decode_hex("010312 01a0 0033 0055 0030 0001 0c0d 010a 0081 0002");
//! assert_eq!(frame.soc_pct, Some(51));
//! assert_eq!(frame.voltage_v, Some(26.6));
//! assert_eq!(frame.current_a, Some(-30.85));
//! assert!(frame.warnings.is_empty());
//! ```
//!
//! ## Features
//!
//! - `default`: Enables `bin-dependencies`, which is intended for compiling the `bmsframe` command-line tool.
//! - `serde`: Enables `serde` serialization of the decoded frame.
//! - `bin-dependencies`: Enables all features required by the `bmsframe` binary executable.

/// Contains error types for the library.
mod error;
/// Hex text <-> byte conversion used by the decoder.
pub mod hex;
/// Static word layouts of the known frame versions.
pub mod layout;
/// Defines the frame decoder and its output.
pub mod protocol;

pub use error::Error;
pub use layout::{Field, FrameLayout, TITAN};
pub use protocol::{decode_bytes, decode_hex, DecodedFrame, FrameDecoder, Warning};
