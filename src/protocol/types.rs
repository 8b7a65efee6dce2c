//! Telemetry message kinds

use std::fmt;

use super::layout::{self, FieldSpec};
use super::Error;

/// Message kinds emitted by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessageKind {
    /// Status beacon (HEARTBEAT)
    Heartbeat = 0,
    /// System health report (SYS_STATUS)
    SystemStatus = 1,
    /// Raw GNSS position fix (GPS_RAW_INT)
    PositionFix = 24,
    /// Vehicle orientation (ATTITUDE)
    Orientation = 30,
    /// Flight summary for HUD displays (VFR_HUD)
    FlightSummary = 74,
}

impl MessageKind {
    /// Every kind, in broadcast cycle order
    pub const ALL: [Self; 5] = [
        Self::Heartbeat,
        Self::SystemStatus,
        Self::PositionFix,
        Self::Orientation,
        Self::FlightSummary,
    ];

    /// Convert from identifier byte
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Heartbeat),
            1 => Some(Self::SystemStatus),
            24 => Some(Self::PositionFix),
            30 => Some(Self::Orientation),
            74 => Some(Self::FlightSummary),
            _ => None,
        }
    }

    /// Identifier byte carried in the header
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Fixed payload length in bytes
    #[must_use]
    pub const fn payload_len(self) -> usize {
        match self {
            Self::Heartbeat => 9,
            Self::SystemStatus => 31,
            Self::PositionFix => 30,
            Self::Orientation => 28,
            Self::FlightSummary => 18,
        }
    }

    /// Total frame length (header + payload + checksum)
    #[must_use]
    pub const fn frame_len(self) -> usize {
        super::FRAME_OVERHEAD + self.payload_len()
    }

    /// Additive seed folded into the checksum
    #[must_use]
    pub const fn checksum_seed(self) -> u16 {
        match self {
            Self::Heartbeat => 50,
            Self::SystemStatus => 124,
            Self::PositionFix => 24,
            Self::Orientation => 39,
            Self::FlightSummary => 20,
        }
    }

    /// Payload layout table
    #[must_use]
    pub const fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Heartbeat => layout::HEARTBEAT,
            Self::SystemStatus => layout::SYS_STATUS,
            Self::PositionFix => layout::GPS_RAW_INT,
            Self::Orientation => layout::ATTITUDE,
            Self::FlightSummary => layout::VFR_HUD,
        }
    }

    /// Look up a layout field by name
    #[must_use]
    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.name == name)
    }

    /// Wire protocol message name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heartbeat => "HEARTBEAT",
            Self::SystemStatus => "SYS_STATUS",
            Self::PositionFix => "GPS_RAW_INT",
            Self::Orientation => "ATTITUDE",
            Self::FlightSummary => "VFR_HUD",
        }
    }
}

impl TryFrom<u8> for MessageKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(Error::UnknownMessageKind { id: value })
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
