//! Minimal UDP socket wrapper for telemetry output.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;

use thiserror::Error;
use tracing::{instrument, trace};

use super::DatagramSink;

/// Error type for socket operations.
#[derive(Error, Debug)]
pub enum SocketError {
    /// Underlying I/O error
    #[error("socket I/O error: {0}")]
    Io(#[from] io::Error),

    /// Datagram was only partially written
    #[error("short send: wrote {written} of {len} bytes")]
    ShortSend {
        /// Bytes written
        written: usize,
        /// Datagram length
        len: usize,
    },
}

/// Binding for a UDP socket.
#[derive(Debug, Clone)]
pub struct SocketBinding {
    socket: Arc<UdpSocket>,
}

impl SocketBinding {
    /// Bind to the provided local address (`0.0.0.0:0` for an ephemeral port).
    pub fn bind(addr: SocketAddr) -> Result<Self, SocketError> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_nonblocking(false)?;
        Ok(Self {
            socket: Arc::new(socket),
        })
    }

    /// Send bytes to a remote address.
    pub fn send_to(&self, buf: &[u8], addr: SocketAddr) -> Result<usize, SocketError> {
        Ok(self.socket.send_to(buf, addr)?)
    }

    /// Access the local address for this binding.
    pub fn local_addr(&self) -> Result<SocketAddr, SocketError> {
        Ok(self.socket.local_addr()?)
    }
}

impl DatagramSink for SocketBinding {
    #[instrument(level = "trace", skip(self, bytes), fields(len = bytes.len()))]
    fn send_datagram(&self, bytes: &[u8], dest: SocketAddr) -> Result<usize, SocketError> {
        let written = self.send_to(bytes, dest)?;
        if written != bytes.len() {
            return Err(SocketError::ShortSend {
                written,
                len: bytes.len(),
            });
        }
        trace!(%dest, written, "datagram sent");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_loopback_send() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let dest = receiver.local_addr().unwrap();

        let sender = SocketBinding::bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let written = sender.send_datagram(&[0xFE, 0x00], dest).unwrap();
        assert_eq!(written, 2);

        let mut buf = [0u8; 16];
        let (len, from) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..len], &[0xFE, 0x00]);
        assert_eq!(from, sender.local_addr().unwrap());
    }
}
