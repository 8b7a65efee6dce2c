//! Frame header
//!
//! The header is 6 bytes, one byte per field.

use super::{HEADER_SIZE, MAGIC, MessageKind};

/// Frame header
///
/// # Wire Format
///
/// ```text
/// +------+---------+-----+--------+-----------+---------+
/// | 0xFE | Pay Len | Seq | Sys ID | Comp ID   | Msg ID  |
/// +------+---------+-----+--------+-----------+---------+
///    0        1       2      3         4          5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    payload_len: u8,
    sequence: u8,
    system_id: u8,
    component_id: u8,
    kind: MessageKind,
}

impl FrameHeader {
    /// Create a header for `kind`; the payload length comes from the kind's layout
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(kind: MessageKind, sequence: u8, system_id: u8, component_id: u8) -> Self {
        Self {
            // every fixed payload is well below 256 bytes
            payload_len: kind.payload_len() as u8,
            sequence,
            system_id,
            component_id,
            kind,
        }
    }

    /// Get payload length
    #[must_use]
    pub const fn payload_len(&self) -> u8 {
        self.payload_len
    }

    /// Get sequence number
    #[must_use]
    pub const fn sequence(&self) -> u8 {
        self.sequence
    }

    /// Get sender system id
    #[must_use]
    pub const fn system_id(&self) -> u8 {
        self.system_id
    }

    /// Get sender component id
    #[must_use]
    pub const fn component_id(&self) -> u8 {
        self.component_id
    }

    /// Get message kind
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Convert to bytes
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        [
            MAGIC,
            self.payload_len,
            self.sequence,
            self.system_id,
            self.component_id,
            self.kind.id(),
        ]
    }
}
