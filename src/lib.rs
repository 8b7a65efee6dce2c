//! mavsim - synthetic autopilot telemetry generator
//!
//! This library builds byte-exact MAVLink v1 style frames for a small fixed
//! set of autopilot status messages and streams them over UDP, so ground
//! control software and parsers can be exercised without a live vehicle.
//!
//! # Quick Start
//!
//! ```rust
//! use mavsim::{Encoder, Heartbeat, MessageKind};
//!
//! let mut encoder = Encoder::new(1, 1);
//!
//! let heartbeat = Heartbeat {
//!     custom_mode: 2,
//!     vehicle_type: 2,
//!     autopilot: 3,
//!     base_mode: 81,
//!     system_status: 4,
//!     mavlink_version: 3,
//! };
//!
//! let message = encoder.encode_telemetry(&heartbeat.into())?;
//! assert_eq!(message.kind(), MessageKind::Heartbeat);
//! assert_eq!(message.len(), 17);
//! assert_eq!(encoder.sequence(), 1);
//! # Ok::<(), mavsim::Error>(())
//! ```
//!
//! # Wire format
//!
//! ```text
//! [0xFE] [LEN] [SEQ] [SYS] [COMP] [MSG ID] [PAYLOAD (LEN bytes)] [CHECKSUM (u16 LE)]
//! ```
//!
//! The checksum is an additive sum of a per-kind seed and every byte from
//! `LEN` through the end of the payload. It deliberately is not the X.25 CRC
//! used by real autopilots.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;
pub mod simulator;
pub mod transport;

pub use protocol::{
    Encoder, Error, FieldValue, Fields, Heartbeat, Message, MessageKind, Result, SharedEncoder,
    Telemetry,
};
pub use simulator::{Simulator, SimulatorConfig};
pub use transport::{DatagramSink, SocketBinding};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default ground station port
pub const DEFAULT_PORT: u16 = 14550;
