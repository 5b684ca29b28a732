use acr_nema::ByteOrder;

/// Builds message streams record by record, remembering where each record ends
#[allow(dead_code)]
pub struct StreamBuilder {
    order: ByteOrder,
    bytes: Vec<u8>,
    boundaries: Vec<usize>,
}

#[allow(dead_code)]
impl StreamBuilder {
    pub fn new(order: ByteOrder) -> Self {
        Self {
            order,
            bytes: Vec::new(),
            boundaries: vec![0],
        }
    }

    pub fn little() -> Self {
        Self::new(ByteOrder::Little)
    }

    pub fn big() -> Self {
        Self::new(ByteOrder::Big)
    }

    /// Record without a VR: tag, 32-bit length, value
    pub fn implicit(mut self, group: u16, element: u16, value: &[u8]) -> Self {
        self.tag(group, element);
        self.u32(value.len() as u32);
        self.bytes.extend_from_slice(value);
        self.mark()
    }

    /// Record with a VR code; long-form VRs get reserved bytes and a 32-bit length
    pub fn explicit(mut self, group: u16, element: u16, vr: &str, value: &[u8]) -> Self {
        self.tag(group, element);
        self.bytes.extend_from_slice(vr.as_bytes());
        if matches!(vr, "OB" | "OW" | "OF" | "SQ" | "UN" | "UT") {
            self.bytes.extend_from_slice(&[0, 0]);
            self.u32(value.len() as u32);
        } else {
            self.u16(value.len() as u16);
        }
        self.bytes.extend_from_slice(value);
        self.mark()
    }

    /// Implicit record whose declared length differs from the value written
    pub fn implicit_with_length(mut self, group: u16, element: u16, length: u32, value: &[u8]) -> Self {
        self.tag(group, element);
        self.u32(length);
        self.bytes.extend_from_slice(value);
        self.mark()
    }

    /// Encode a u16 value in the builder's byte order
    pub fn us(&self, value: u16) -> Vec<u8> {
        match self.order {
            ByteOrder::Little => value.to_le_bytes().to_vec(),
            ByteOrder::Big => value.to_be_bytes().to_vec(),
        }
    }

    pub fn build(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Offsets where a record ends, starting with 0
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    fn tag(&mut self, group: u16, element: u16) {
        self.u16(group);
        self.u16(element);
    }

    fn u16(&mut self, v: u16) {
        let bytes = match self.order {
            ByteOrder::Little => v.to_le_bytes(),
            ByteOrder::Big => v.to_be_bytes(),
        };
        self.bytes.extend_from_slice(&bytes);
    }

    fn u32(&mut self, v: u32) {
        let bytes = match self.order {
            ByteOrder::Little => v.to_le_bytes(),
            ByteOrder::Big => v.to_be_bytes(),
        };
        self.bytes.extend_from_slice(&bytes);
    }

    fn mark(mut self) -> Self {
        self.boundaries.push(self.bytes.len());
        self
    }
}

/// A small identifying message spread over five groups
#[allow(dead_code)]
pub fn sample_message(order: ByteOrder) -> StreamBuilder {
    let b = StreamBuilder::new(order);
    let rows = b.us(512);
    let columns = b.us(256);
    b.implicit(0x0008, 0x0000, &[0u8; 4])
        .implicit(0x0008, 0x0010, b"ACRNEMA ")
        .implicit(0x0008, 0x0060, b"MR")
        .implicit(0x0010, 0x0010, b"DOE^JANE")
        .implicit(0x0010, 0x0020, b"ID4242")
        .implicit(0x0018, 0x0050, b"1.5 ")
        .implicit(0x0020, 0x0013, b"7 ")
        .implicit(0x0028, 0x0010, &rows)
        .implicit(0x0028, 0x0011, &columns)
}
