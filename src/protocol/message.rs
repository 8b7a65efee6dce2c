//! Encoded telemetry frame

use bytes::Bytes;

use super::{CHECKSUM_SIZE, FrameHeader, HEADER_SIZE, MessageKind};

/// A complete, transmittable frame
///
/// Produced by [`Encoder`](super::Encoder); self-contained and independent of
/// any other frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Header the frame was built with
    header: FrameHeader,
    /// Header + payload + checksum
    bytes: Bytes,
}

impl Message {
    pub(crate) fn from_parts(header: FrameHeader, bytes: Bytes) -> Self {
        debug_assert_eq!(bytes.len(), header.kind().frame_len());
        Self { header, bytes }
    }

    /// Get message kind
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.header.kind()
    }

    /// Sequence number stamped at encode time
    #[must_use]
    pub const fn sequence(&self) -> u8 {
        self.header.sequence()
    }

    /// Get header
    #[must_use]
    pub const fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Payload bytes
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..self.bytes.len() - CHECKSUM_SIZE]
    }

    /// Trailing checksum
    #[must_use]
    pub fn checksum(&self) -> u16 {
        let end = self.bytes.len();
        u16::from_le_bytes([self.bytes[end - 2], self.bytes[end - 1]])
    }

    /// Whole frame as a byte slice
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume into the underlying shared buffer
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Frame length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; a frame carries at least its header and checksum
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Message {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
