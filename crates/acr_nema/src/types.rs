//! Decoded message tree

use dicom_core::{Tag, VR};
use std::collections::HashMap;

use crate::byte_order::ByteOrder;
use crate::status::Status;

/// Where an element's VR came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VrSource {
    /// Carried in the record itself
    Explicit,
    /// Defaulted from the data dictionary
    Implicit,
}

/// Interpreted value of an element
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Empty,
    Text(String),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Tags(Vec<Tag>),
    Binary(Vec<u8>),
}

/// One decoded record
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: Tag,
    vr: VR,
    vr_source: VrSource,
    length: u32,
    data: Vec<u8>,
    byte_order: ByteOrder,
}

impl Element {
    pub fn new(
        tag: Tag,
        vr: VR,
        vr_source: VrSource,
        data: Vec<u8>,
        byte_order: ByteOrder,
    ) -> Self {
        Self {
            tag,
            vr,
            vr_source,
            length: data.len() as u32,
            data,
            byte_order,
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn vr(&self) -> VR {
        self.vr
    }

    pub fn vr_source(&self) -> VrSource {
        self.vr_source
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    /// Raw value bytes as read from the stream
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Interpret the raw bytes according to the VR.
    ///
    /// Never fails: bytes that do not fit the VR come back as [`Value::Binary`].
    pub fn value(&self) -> Value {
        if self.data.is_empty() {
            return Value::Empty;
        }
        let order = self.byte_order;
        let data = &self.data;
        let interpreted = match self.vr {
            VR::US => words(data, 2, |b| order.u16(b)).map(Value::U16),
            VR::SS => words(data, 2, |b| order.u16(b) as i16).map(Value::I16),
            VR::UL => words(data, 4, |b| order.u32(b)).map(Value::U32),
            VR::SL => words(data, 4, |b| order.u32(b) as i32).map(Value::I32),
            VR::FL => words(data, 4, |b| f32::from_bits(order.u32(b))).map(Value::F32),
            VR::FD => words(data, 8, |b| f64::from_bits(order.u64(b))).map(Value::F64),
            VR::AT => words(data, 4, |b| Tag(order.u16(b), order.u16(&b[2..]))).map(Value::Tags),
            VR::AE
            | VR::AS
            | VR::CS
            | VR::DA
            | VR::DS
            | VR::DT
            | VR::IS
            | VR::LO
            | VR::LT
            | VR::PN
            | VR::SH
            | VR::ST
            | VR::TM
            | VR::UC
            | VR::UI
            | VR::UR
            | VR::UT => text(data).map(Value::Text),
            _ => None,
        };
        interpreted.unwrap_or_else(|| Value::Binary(data.clone()))
    }
}

fn words<T>(data: &[u8], width: usize, read: impl Fn(&[u8]) -> T) -> Option<Vec<T>> {
    if data.len() % width != 0 {
        return None;
    }
    Some(data.chunks_exact(width).map(read).collect())
}

fn text(data: &[u8]) -> Option<String> {
    let end = data
        .iter()
        .rposition(|b| *b != 0 && *b != b' ')
        .map_or(0, |i| i + 1);
    let trimmed = &data[..end];
    if trimmed.iter().all(|b| (0x20..0x7f).contains(b)) {
        // Printable ASCII is valid UTF-8
        Some(trimmed.iter().map(|b| *b as char).collect())
    } else {
        None
    }
}

/// Elements sharing a group id, in decode order
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    id: u16,
    elements: Vec<Element>,
}

impl Group {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            elements: Vec::new(),
        }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, element_id: u16) -> Option<&Element> {
        self.elements.iter().find(|e| e.tag().element() == element_id)
    }
}

/// Root of the decoded tree: groups in order of first appearance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupList {
    groups: Vec<Group>,
    index: HashMap<u16, usize>,
}

impl GroupList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element to its group, creating the group on first sight
    pub fn push(&mut self, element: Element) {
        let id = element.tag().group();
        let slot = match self.index.get(&id) {
            Some(slot) => *slot,
            None => {
                self.groups.push(Group::new(id));
                self.index.insert(id, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].elements.push(element);
    }

    pub fn get(&self, group_id: u16) -> Option<&Group> {
        self.index.get(&group_id).map(|slot| &self.groups[*slot])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of elements across all groups
    pub fn element_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// All elements, group by group
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.groups.iter().flat_map(|g| g.elements.iter())
    }
}

impl<'a> IntoIterator for &'a GroupList {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Result of a decode pass: whatever was assembled, and how the pass ended
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    pub groups: GroupList,
    pub status: Status,
    /// Byte order the records were read with
    pub byte_order: ByteOrder,
    /// Bytes consumed from the source
    pub bytes_read: u64,
    /// Records skipped under the tolerant policy
    pub skipped: usize,
}
