//! Telemetry frame encoder
//!
//! This module provides the wire format, message kinds, payload layouts and
//! the stateful encoder that stamps every frame with the shared sequence
//! counter.

mod codec;
mod encoder;
mod error;
mod fields;
mod header;
mod layout;
mod message;
mod telemetry;
mod types;

pub use codec::{checksum, encode_frame, encode_payload, verify};
pub use encoder::{Encoder, SharedEncoder};
pub use error::{Error, Result};
pub use fields::{FieldValue, Fields};
pub use header::FrameHeader;
pub use layout::{FieldSpec, FieldType};
pub use message::Message;
pub use telemetry::{Attitude, Heartbeat, PositionFix, SystemStatus, Telemetry, VfrHud};
pub use types::MessageKind;

/// Frame start marker (MAVLink v1 STX)
pub const MAGIC: u8 = 0xFE;

/// Header size in bytes
pub const HEADER_SIZE: usize = 6;

/// Checksum trailer size in bytes
pub const CHECKSUM_SIZE: usize = 2;

/// Framing overhead (header + checksum)
pub const FRAME_OVERHEAD: usize = HEADER_SIZE + CHECKSUM_SIZE;
