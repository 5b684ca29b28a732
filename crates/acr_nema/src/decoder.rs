//! Group/element decoding
//!
//! A single forward pass over the source. Each iteration peeks one record header,
//! decides whether to stop (end of stream, ceiling, strict-mode error), and only
//! then consumes the record. Whatever was decoded before the pass ended is kept.
//!
//! # Resynchronisation
//!
//! Under [`ErrorPolicy::Tolerant`](crate::status::ErrorPolicy) a malformed record
//! is skipped as a whole when its declared extent is defined, within the value
//! length limit and fully present in the stream. Otherwise the decoder advances
//! [`RESYNC_STEP`] bytes from the start of the record and tries again, so every
//! skip consumes input.
//!
//! # VR encoding
//!
//! [`VrEncoding::Auto`] is settled on the first complete record header: a known
//! VR code after the tag pins the stream to explicit VR, anything else to
//! implicit VR. The choice then holds for the rest of the pass, so an implicit
//! length whose low bytes happen to spell a VR is never read as one.

use dicom_core::{Tag, VR};
use std::io::{self, Read};
use thiserror::Error;

use crate::byte_order::{detect_byte_order, ByteOrder};
use crate::config::{DecodeOptions, VrEncoding};
use crate::dictionary::default_vr;
use crate::source::Source;
use crate::status::Status;
use crate::types::{DecodeOutcome, Element, GroupList, VrSource};
use crate::UNDEFINED_LENGTH;

/// Bytes skipped when a malformed record has no usable extent
pub const RESYNC_STEP: usize = 2;

/// Tag plus short explicit VR plus 16-bit length, or tag plus 32-bit length
const SHORT_HEADER_LEN: usize = 8;

/// Tag plus explicit VR plus two reserved bytes plus 32-bit length
const LONG_HEADER_LEN: usize = 12;

/// Decode a reader from its first byte
pub fn decode_reader<R: Read>(reader: R, options: &DecodeOptions) -> DecodeOutcome {
    decode(Source::new(reader), options)
}

/// Decode `source` into a group list.
///
/// Takes the source by value: it is dropped, and any file behind it closed, when
/// the pass ends.
#[tracing::instrument(level = "debug", skip_all, fields(max_group = options.max_group))]
pub fn decode<R: Read>(mut source: Source<R>, options: &DecodeOptions) -> DecodeOutcome {
    let byte_order = match options.byte_order {
        Some(order) => order,
        None => match detect_byte_order(&mut source) {
            Some(order) => {
                tracing::debug!("Detected {} byte order", order.name());
                order
            }
            None => {
                tracing::warn!("Could not determine byte order, assuming little-endian");
                ByteOrder::Little
            }
        },
    };

    let mut groups = GroupList::new();
    let mut skipped = 0;
    let mut encoding = options.vr_encoding;

    let status = loop {
        let offset = source.consumed();
        let header = match peek_header(&mut source, byte_order, &mut encoding) {
            Ok(Peeked::End) => break Status::Ok,
            Ok(Peeked::Partial(available)) => {
                tracing::debug!(
                    "Stream ends inside a record header at offset {} ({} bytes left)",
                    offset,
                    available
                );
                break Status::AbnormalEndOfInput;
            }
            Ok(Peeked::Header(header)) => header,
            Err(e) => {
                tracing::error!("Read failed at offset {}: {}", offset, e);
                break Status::OtherError;
            }
        };

        if options.above_ceiling(header.tag.group()) {
            tracing::debug!(
                "Group 0x{:04x} is above the ceiling 0x{:04x}, stopping",
                header.tag.group(),
                options.max_group
            );
            break Status::Ok;
        }

        let (vr, vr_source) = match header.resolve(options.max_value_length) {
            Ok(resolved) => resolved,
            Err(violation) => {
                tracing::warn!(
                    "Protocol error in {} at offset {}: {}",
                    format_tag(header.tag),
                    offset,
                    violation
                );
                if !options.policy.is_tolerant() {
                    break Status::ProtocolError;
                }
                skipped += 1;
                match resync(&mut source, &header, options.max_value_length) {
                    Ok(step) => {
                        tracing::debug!("Skipped {} bytes to resynchronise", step);
                        continue;
                    }
                    Err(e) => {
                        tracing::error!("Read failed while skipping record: {}", e);
                        break Status::OtherError;
                    }
                }
            }
        };

        let length = header.length as usize;
        let extent = header.header_len + length;
        match source.fill(extent) {
            Ok(available) if available < extent => {
                tracing::debug!(
                    "Value of {} truncated: {} of {} bytes present",
                    format_tag(header.tag),
                    available.saturating_sub(header.header_len),
                    length
                );
                break Status::AbnormalEndOfInput;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!("Read failed at offset {}: {}", offset, e);
                break Status::OtherError;
            }
        }

        source.consume(header.header_len);
        let data = source.take(length);
        tracing::trace!("{} {:?} length {}", format_tag(header.tag), vr, length);
        groups.push(Element::new(header.tag, vr, vr_source, data, byte_order));
    };

    let outcome = DecodeOutcome {
        status,
        byte_order,
        bytes_read: source.consumed(),
        skipped,
        groups,
    };
    tracing::info!(
        "Decoded {} elements in {} groups from {} bytes ({})",
        outcome.groups.element_count(),
        outcome.groups.len(),
        outcome.bytes_read,
        outcome.status
    );
    outcome
}

fn format_tag(tag: Tag) -> String {
    format!("({:04x},{:04x})", tag.group(), tag.element())
}

#[derive(Debug)]
enum Peeked {
    /// No bytes left at a record boundary
    End,
    /// Stream ends inside the header
    Partial(usize),
    Header(Header),
}

#[derive(Debug, Clone, Copy)]
enum HeaderVr {
    Implicit,
    Known(VR),
    Unknown([u8; 2]),
}

#[derive(Debug, Clone, Copy)]
struct Header {
    tag: Tag,
    vr: HeaderVr,
    length: u32,
    header_len: usize,
}

/// Structural problems that make a record malformed
#[derive(Error, Debug, PartialEq, Eq)]
enum Violation {
    #[error("unrecognized value representation {0:?}")]
    UnknownVr(String),

    #[error("undefined length is not supported")]
    UndefinedLength,

    #[error("odd value length {0}")]
    OddLength(u32),

    #[error("value length {length} exceeds limit {max}")]
    TooLong { length: u32, max: u32 },
}

impl Header {
    fn resolve(&self, max_value_length: u32) -> Result<(VR, VrSource), Violation> {
        let resolved = match self.vr {
            HeaderVr::Known(vr) => (vr, VrSource::Explicit),
            HeaderVr::Implicit => (default_vr(self.tag), VrSource::Implicit),
            HeaderVr::Unknown(code) => {
                return Err(Violation::UnknownVr(
                    String::from_utf8_lossy(&code).into_owned(),
                ))
            }
        };
        match self.length {
            UNDEFINED_LENGTH => Err(Violation::UndefinedLength),
            length if length > max_value_length => Err(Violation::TooLong {
                length,
                max: max_value_length,
            }),
            length if length % 2 != 0 => Err(Violation::OddLength(length)),
            _ => Ok(resolved),
        }
    }
}

fn peek_header<R: Read>(
    source: &mut Source<R>,
    order: ByteOrder,
    encoding: &mut VrEncoding,
) -> io::Result<Peeked> {
    let available = source.fill(SHORT_HEADER_LEN)?;
    if available == 0 {
        return Ok(Peeked::End);
    }
    if available < SHORT_HEADER_LEN {
        return Ok(Peeked::Partial(available));
    }

    let bytes = source.peek();
    let tag = Tag(order.u16(bytes), order.u16(&bytes[2..]));
    let code = [bytes[4], bytes[5]];
    let short_length = u32::from(order.u16(&bytes[6..]));
    let implicit_length = order.u32(&bytes[4..]);

    if *encoding == VrEncoding::Auto {
        *encoding = sense_encoding(code);
        tracing::debug!("Sensed {:?} VR encoding from {}", encoding, format_tag(tag));
    }
    let explicit = *encoding == VrEncoding::Explicit;
    if !explicit {
        return Ok(Peeked::Header(Header {
            tag,
            vr: HeaderVr::Implicit,
            length: implicit_length,
            header_len: SHORT_HEADER_LEN,
        }));
    }

    let header = match VR::from_binary(code) {
        Some(vr) if has_long_length(vr) => {
            let available = source.fill(LONG_HEADER_LEN)?;
            if available < LONG_HEADER_LEN {
                return Ok(Peeked::Partial(available));
            }
            Header {
                tag,
                vr: HeaderVr::Known(vr),
                length: order.u32(&source.peek()[8..]),
                header_len: LONG_HEADER_LEN,
            }
        }
        Some(vr) => Header {
            tag,
            vr: HeaderVr::Known(vr),
            length: short_length,
            header_len: SHORT_HEADER_LEN,
        },
        None => Header {
            tag,
            vr: HeaderVr::Unknown(code),
            length: short_length,
            header_len: SHORT_HEADER_LEN,
        },
    };
    Ok(Peeked::Header(header))
}

fn sense_encoding(code: [u8; 2]) -> VrEncoding {
    if VR::from_binary(code).is_some() {
        VrEncoding::Explicit
    } else {
        VrEncoding::Implicit
    }
}

/// VRs whose explicit header has two reserved bytes and a 32-bit length
fn has_long_length(vr: VR) -> bool {
    matches!(
        vr,
        VR::OB
            | VR::OD
            | VR::OF
            | VR::OL
            | VR::OV
            | VR::OW
            | VR::SQ
            | VR::SV
            | VR::UC
            | VR::UN
            | VR::UR
            | VR::UT
            | VR::UV
    )
}

fn resync<R: Read>(
    source: &mut Source<R>,
    header: &Header,
    max_value_length: u32,
) -> io::Result<usize> {
    if header.length != UNDEFINED_LENGTH && header.length <= max_value_length {
        let extent = header.header_len + header.length as usize;
        if source.fill(extent)? == extent {
            source.consume(extent);
            return Ok(extent);
        }
    }
    source.consume(RESYNC_STEP);
    Ok(RESYNC_STEP)
}
