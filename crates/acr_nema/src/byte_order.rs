//! Byte order handling and detection

use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::source::Source;

/// Group ids below this value are expected at the start of a message
const PLAUSIBLE_GROUP_LIMIT: u16 = 0x0100;

/// Byte order of the multi-byte integers in a message stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    /// Read a u16 from the first two bytes of `bytes`
    pub fn u16(self, bytes: &[u8]) -> u16 {
        let raw = [bytes[0], bytes[1]];
        match self {
            ByteOrder::Little => u16::from_le_bytes(raw),
            ByteOrder::Big => u16::from_be_bytes(raw),
        }
    }

    /// Read a u32 from the first four bytes of `bytes`
    pub fn u32(self, bytes: &[u8]) -> u32 {
        let raw = [bytes[0], bytes[1], bytes[2], bytes[3]];
        match self {
            ByteOrder::Little => u32::from_le_bytes(raw),
            ByteOrder::Big => u32::from_be_bytes(raw),
        }
    }

    /// Read a u64 from the first eight bytes of `bytes`
    pub fn u64(self, bytes: &[u8]) -> u64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[..8]);
        match self {
            ByteOrder::Little => u64::from_le_bytes(raw),
            ByteOrder::Big => u64::from_be_bytes(raw),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ByteOrder::Little => "little-endian",
            ByteOrder::Big => "big-endian",
        }
    }
}

/// Guess the byte order from the leading record of `source`.
///
/// The bytes are only peeked, so the decoder still sees them. Returns `None` when
/// neither interpretation of the first group id is plausible or the stream is too
/// short to tell; callers then fall back to little-endian.
pub fn detect_byte_order<R: Read>(source: &mut Source<R>) -> Option<ByteOrder> {
    let available = match source.fill(8) {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!("Could not peek stream for byte-order test: {}", e);
            return None;
        }
    };
    guess_from_prefix(&source.peek()[..available])
}

fn guess_from_prefix(prefix: &[u8]) -> Option<ByteOrder> {
    if prefix.len() < 4 {
        return None;
    }

    let little = ByteOrder::Little.u16(prefix) < PLAUSIBLE_GROUP_LIMIT;
    let big = ByteOrder::Big.u16(prefix) < PLAUSIBLE_GROUP_LIMIT;

    match (little, big) {
        (true, false) => Some(ByteOrder::Little),
        (false, true) => Some(ByteOrder::Big),
        (false, false) => None,
        (true, true) => {
            // Group 0x0000 reads the same both ways; the length field settles it
            if prefix.len() < 8 {
                return Some(ByteOrder::Little);
            }
            let le_len = ByteOrder::Little.u32(&prefix[4..]);
            let be_len = ByteOrder::Big.u32(&prefix[4..]);
            if be_len < le_len {
                Some(ByteOrder::Big)
            } else {
                Some(ByteOrder::Little)
            }
        }
    }
}
