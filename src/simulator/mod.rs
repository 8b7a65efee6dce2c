//! Telemetry broadcast driver
//!
//! Cycles through HEARTBEAT, SYS_STATUS, GPS_RAW_INT, ATTITUDE and VFR_HUD,
//! with a short pause between messages and a longer one between cycles.

mod config;
mod driver;
mod metrics;
mod scenario;

pub use config::{ConfigError, SimulatorConfig};
pub use driver::{CycleReport, Delivery, RunSummary, Simulator};
pub use metrics::{Metrics, MetricsSnapshot};
pub use scenario::{FlightMode, Scenario};
