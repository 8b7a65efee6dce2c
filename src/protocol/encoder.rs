//! Stateful frame encoder
//!
//! The encoder owns the sequence counter shared by every message kind.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::{Fields, FrameHeader, Message, MessageKind, Result, Telemetry, encode_frame, encode_payload};

/// Builds frames and stamps them with a wrapping sequence number
///
/// The counter advances only when a frame is produced; a call rejected for a
/// bad field leaves it untouched, so emitted frames never skip a number.
#[derive(Debug, Clone)]
pub struct Encoder {
    sequence: u8,
    system_id: u8,
    component_id: u8,
}

impl Encoder {
    /// Create an encoder starting at sequence 0
    #[must_use]
    pub const fn new(system_id: u8, component_id: u8) -> Self {
        Self {
            sequence: 0,
            system_id,
            component_id,
        }
    }

    /// Start from an explicit sequence number
    #[must_use]
    pub const fn with_sequence(mut self, sequence: u8) -> Self {
        self.sequence = sequence;
        self
    }

    /// Sequence number the next frame will carry
    #[must_use]
    pub const fn sequence(&self) -> u8 {
        self.sequence
    }

    /// Sender system id
    #[must_use]
    pub const fn system_id(&self) -> u8 {
        self.system_id
    }

    /// Sender component id
    #[must_use]
    pub const fn component_id(&self) -> u8 {
        self.component_id
    }

    /// Encode `kind` from named field values
    pub fn encode(&mut self, kind: MessageKind, fields: &Fields) -> Result<Message> {
        let payload = encode_payload(kind, fields).inspect_err(|err| {
            debug!(%kind, seq = self.sequence, error = %err, "encode rejected");
        })?;

        let header = FrameHeader::new(kind, self.sequence, self.system_id, self.component_id);
        let message = encode_frame(header, &payload);
        self.sequence = self.sequence.wrapping_add(1);
        Ok(message)
    }

    /// Encode a typed telemetry record
    pub fn encode_telemetry(&mut self, telemetry: &Telemetry) -> Result<Message> {
        self.encode(telemetry.kind(), &telemetry.to_fields())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Encoder handle that can be shared across threads
///
/// Reading the counter, building the header and advancing the counter happen
/// under a single lock, so concurrent callers never emit duplicate or skipped
/// sequence numbers.
#[derive(Debug, Clone)]
pub struct SharedEncoder {
    inner: Arc<Mutex<Encoder>>,
}

impl SharedEncoder {
    /// Wrap an encoder
    #[must_use]
    pub fn new(encoder: Encoder) -> Self {
        Self {
            inner: Arc::new(Mutex::new(encoder)),
        }
    }

    /// Encode `kind` from named field values
    pub fn encode(&self, kind: MessageKind, fields: &Fields) -> Result<Message> {
        self.lock().encode(kind, fields)
    }

    /// Encode a typed telemetry record
    pub fn encode_telemetry(&self, telemetry: &Telemetry) -> Result<Message> {
        self.lock().encode_telemetry(telemetry)
    }

    /// Sequence number the next frame will carry
    #[must_use]
    pub fn sequence(&self) -> u8 {
        self.lock().sequence()
    }

    // The guarded state is a plain counter, always consistent between calls.
    fn lock(&self) -> std::sync::MutexGuard<'_, Encoder> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Encoder> for SharedEncoder {
    fn from(encoder: Encoder) -> Self {
        Self::new(encoder)
    }
}
