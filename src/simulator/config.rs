//! Simulator configuration.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
#[cfg(feature = "debug-tools")]
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::DEFAULT_PORT;

/// Rejected configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// System id 0 is reserved for broadcast.
    #[error("system id must be non-zero")]
    ZeroSystemId,
    /// A run limit of zero cycles would send nothing.
    #[error("max_cycles must be at least 1 when set")]
    ZeroCycles,
}

/// Driver configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Where datagrams are sent.
    pub destination: SocketAddr,
    /// Local address to bind the sending socket to.
    pub bind: SocketAddr,
    /// Sender system id stamped in every header.
    pub system_id: u8,
    /// Sender component id stamped in every header.
    pub component_id: u8,
    /// Pause after each message.
    pub message_interval: Duration,
    /// Pause after each full cycle.
    pub cycle_interval: Duration,
    /// Stop after this many cycles; `None` runs until interrupted.
    pub max_cycles: Option<u64>,
    /// Optional PCAP capture path for outbound datagrams (debug builds only).
    #[cfg(feature = "debug-tools")]
    pub pcap_path: Option<PathBuf>,
}

impl SimulatorConfig {
    /// Check the values that the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.system_id == 0 {
            return Err(ConfigError::ZeroSystemId);
        }
        if self.max_cycles == Some(0) {
            return Err(ConfigError::ZeroCycles);
        }
        Ok(())
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            destination: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            bind: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0)),
            system_id: 1,
            component_id: 1,
            message_interval: Duration::from_millis(100),
            cycle_interval: Duration::from_secs(2),
            max_cycles: None,
            #[cfg(feature = "debug-tools")]
            pcap_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_ground_station() {
        let config = SimulatorConfig::default();
        assert_eq!(config.destination.to_string(), "127.0.0.1:14550");
        assert_eq!(config.message_interval, Duration::from_millis(100));
        assert_eq!(config.cycle_interval, Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_values() {
        let config = SimulatorConfig {
            system_id: 0,
            ..SimulatorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSystemId));

        let config = SimulatorConfig {
            max_cycles: Some(0),
            ..SimulatorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCycles));
    }
}
