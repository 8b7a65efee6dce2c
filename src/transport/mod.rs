//! Datagram transport for outbound telemetry
//!
//! Delivery is best-effort and unacknowledged. A failed send affects only
//! that datagram.

#[cfg(feature = "debug-tools")]
mod debug;
mod socket;

use std::net::SocketAddr;

#[cfg(feature = "debug-tools")]
pub use debug::PcapRecorder;
pub use socket::{SocketBinding, SocketError};

/// Connectionless send primitive used by the simulator
pub trait DatagramSink {
    /// Send one datagram to `dest`, returning the number of bytes written
    fn send_datagram(&self, bytes: &[u8], dest: SocketAddr) -> Result<usize, SocketError>;
}

impl<T: DatagramSink + ?Sized> DatagramSink for &T {
    fn send_datagram(&self, bytes: &[u8], dest: SocketAddr) -> Result<usize, SocketError> {
        (**self).send_datagram(bytes, dest)
    }
}

impl<T: DatagramSink + ?Sized> DatagramSink for std::sync::Arc<T> {
    fn send_datagram(&self, bytes: &[u8], dest: SocketAddr) -> Result<usize, SocketError> {
        (**self).send_datagram(bytes, dest)
    }
}
