//! Encoder error types

use thiserror::Error;

use super::{FieldType, FieldValue, MessageKind};

/// Errors raised while building or checking a telemetry frame
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A field required by the kind's layout was not supplied
    #[error("{kind}: missing field `{field}`")]
    MissingField {
        /// Message kind being encoded
        kind: MessageKind,
        /// Layout field name
        field: &'static str,
    },

    /// A supplied field is not part of the kind's layout
    #[error("{kind}: unknown field `{field}`")]
    UnknownField {
        /// Message kind being encoded
        kind: MessageKind,
        /// Name supplied by the caller
        field: String,
    },

    /// Value cannot be represented in the field's slot
    #[error("{kind}: value {value} for `{field}` does not fit {ty}")]
    FieldOutOfRange {
        /// Message kind being encoded
        kind: MessageKind,
        /// Layout field name
        field: &'static str,
        /// Slot encoding
        ty: FieldType,
        /// Rejected value
        value: FieldValue,
    },

    /// Value has the wrong numeric class for the slot (float into an integer slot)
    #[error("{kind}: `{field}` expects {ty}, got {value}")]
    FieldTypeMismatch {
        /// Message kind being encoded
        kind: MessageKind,
        /// Layout field name
        field: &'static str,
        /// Slot encoding
        ty: FieldType,
        /// Rejected value
        value: FieldValue,
    },

    /// Invalid frame start marker
    #[error("invalid frame marker: expected 0xfe, got {found:#04x}")]
    InvalidMagic {
        /// Found marker byte
        found: u8,
    },

    /// Unknown message kind identifier
    #[error("unknown message kind: {id}")]
    UnknownMessageKind {
        /// Identifier byte
        id: u8,
    },

    /// Payload length byte disagrees with the kind's fixed layout
    #[error("{kind}: payload length {found} (expected {expected})")]
    LengthMismatch {
        /// Message kind in the header
        kind: MessageKind,
        /// Fixed payload length for the kind
        expected: usize,
        /// Length found in the header or buffer
        found: usize,
    },

    /// Checksum mismatch
    #[error("checksum mismatch: expected {expected:#06x}, got {found:#06x}")]
    ChecksumMismatch {
        /// Recomputed checksum
        expected: u16,
        /// Stored checksum
        found: u16,
    },

    /// Buffer too small
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },
}

impl Error {
    /// Whether the error was raised by a caller-supplied field value
    #[must_use]
    pub const fn is_field_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::UnknownField { .. }
                | Self::FieldOutOfRange { .. }
                | Self::FieldTypeMismatch { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
