//! ACR-NEMA message stream decoding
//!
//! This crate turns a raw ACR-NEMA (or early DICOM) message stream into a tree of
//! groups and elements, and renders that tree as a deterministic text dump.
//!
//! # Features
//! - Byte-order detection from the leading group id, or an explicit override
//! - Implicit, explicit or auto-sensed VR encoding
//! - Strict or tolerant handling of malformed records
//! - Group-id ceiling to bound how far a stream is scanned
//! - Partial trees are always returned alongside a terminal status

pub mod byte_order;
pub mod config;
pub mod decoder;
pub mod dictionary;
pub mod dump;
pub mod error;
pub mod source;
pub mod status;
pub mod types;

// Re-export commonly used types
pub use byte_order::{detect_byte_order, ByteOrder};
pub use config::{DecodeOptions, DumpOptions, VrEncoding};
pub use decoder::{decode, decode_reader};
pub use dump::{render, render_to_string};
pub use error::{AcrError, Result};
pub use source::Source;
pub use status::{ErrorPolicy, Status};
pub use types::{DecodeOutcome, Element, Group, GroupList, Value, VrSource};

pub use dicom_core::{Tag, VR};

/// Default upper bound on a single element's value length (256 MiB)
pub const DEFAULT_MAX_VALUE_LENGTH: u32 = 256 * 1024 * 1024;

/// Length value marking an undefined-length element
pub const UNDEFINED_LENGTH: u32 = 0xFFFF_FFFF;
