//! Fixed telemetry broadcast by the simulator.
//!
//! The vehicle is a quadrotor holding altitude over Zurich. Only the
//! timestamps change between cycles.

use std::fmt;
use std::time::Duration;

use crate::protocol::{Attitude, Heartbeat, PositionFix, SystemStatus, Telemetry, VfrHud};

/// ArduCopter flight modes carried in the heartbeat's custom mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FlightMode {
    /// Manual, self-levelling
    Stabilize = 0,
    /// Altitude hold
    AltHold = 2,
    /// Mission
    Auto = 3,
    /// Externally guided
    Guided = 4,
    /// Position hold
    Loiter = 5,
    /// Return to launch
    Rtl = 6,
    /// Orbit
    Circle = 7,
    /// Land in place
    Land = 9,
    /// Position mode
    Position = 16,
}

impl FlightMode {
    /// Convert from the heartbeat's custom mode.
    #[must_use]
    pub const fn from_custom_mode(mode: u32) -> Option<Self> {
        match mode {
            0 => Some(Self::Stabilize),
            2 => Some(Self::AltHold),
            3 => Some(Self::Auto),
            4 => Some(Self::Guided),
            5 => Some(Self::Loiter),
            6 => Some(Self::Rtl),
            7 => Some(Self::Circle),
            9 => Some(Self::Land),
            16 => Some(Self::Position),
            _ => None,
        }
    }

    /// Heartbeat custom mode value.
    #[must_use]
    pub const fn custom_mode(self) -> u32 {
        self as u32
    }

    /// Ground station display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stabilize => "STABILIZE",
            Self::AltHold => "ALT_HOLD",
            Self::Auto => "AUTO",
            Self::Guided => "GUIDED",
            Self::Loiter => "LOITER",
            Self::Rtl => "RTL",
            Self::Circle => "CIRCLE",
            Self::Land => "LAND",
            Self::Position => "POSITION",
        }
    }
}

impl fmt::Display for FlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

const MAV_TYPE_QUADROTOR: u8 = 2;
const MAV_AUTOPILOT_ARDUPILOTMEGA: u8 = 3;
const MAV_STATE_ACTIVE: u8 = 4;
const MAVLINK_VERSION: u8 = 3;
/// Custom mode enabled, stabilize enabled, manual input enabled.
const BASE_MODE: u8 = 81;
const GPS_FIX_3D: u8 = 3;

/// The values broadcast every cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Active flight mode
    pub mode: FlightMode,
    /// Battery report
    pub battery: SystemStatus,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// GNSS altitude in millimeters
    pub altitude_mm: i32,
    /// Ground speed in m/s
    pub groundspeed: f32,
    /// Satellites in view
    pub satellites_visible: u8,
    /// Roll, pitch, yaw in radians
    pub attitude: (f32, f32, f32),
    /// HUD altitude in meters
    pub hud_altitude: f32,
    /// Throttle setting (0..=1000)
    pub throttle: u16,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            mode: FlightMode::AltHold,
            battery: SystemStatus {
                voltage_battery: 12_800,
                current_battery: -600,
                battery_remaining: 80,
            },
            latitude: 47.3769,
            longitude: 8.5417,
            altitude_mm: 50_000,
            groundspeed: 5.0,
            satellites_visible: 12,
            attitude: (0.1, -0.05, 1.57),
            hud_altitude: 100.0,
            throttle: 1000,
        }
    }
}

impl Scenario {
    /// One cycle of telemetry, in broadcast order.
    ///
    /// `unix_time` feeds the position fix timestamp and `uptime` the
    /// attitude timestamp; both are masked to their slot widths.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn snapshot(&self, unix_time: Duration, uptime: Duration) -> [Telemetry; 5] {
        let time_usec = (unix_time.as_micros() & u128::from(u64::MAX)) as u64;
        let time_boot_ms = (uptime.as_millis() & u128::from(u32::MAX)) as u32;
        let (roll, pitch, yaw) = self.attitude;

        [
            Heartbeat {
                custom_mode: self.mode.custom_mode(),
                vehicle_type: MAV_TYPE_QUADROTOR,
                autopilot: MAV_AUTOPILOT_ARDUPILOTMEGA,
                base_mode: BASE_MODE,
                system_status: MAV_STATE_ACTIVE,
                mavlink_version: MAVLINK_VERSION,
            }
            .into(),
            self.battery.into(),
            PositionFix {
                time_usec,
                fix_type: GPS_FIX_3D,
                latitude: self.latitude,
                longitude: self.longitude,
                altitude_mm: self.altitude_mm,
                eph: 100,
                epv: 100,
                // m/s to cm/s, saturating at the slot's range
                velocity: (self.groundspeed * 100.0).round().clamp(0.0, f32::from(u16::MAX)) as u16,
                course: 0,
                satellites_visible: self.satellites_visible,
            }
            .into(),
            Attitude {
                time_boot_ms,
                roll,
                pitch,
                yaw,
                rollspeed: 0.0,
                pitchspeed: 0.0,
                yawspeed: 0.0,
            }
            .into(),
            VfrHud {
                airspeed: 0.0,
                groundspeed: self.groundspeed,
                heading: 0.0,
                altitude: self.hud_altitude,
                throttle: self.throttle,
            }
            .into(),
        ]
    }

    /// Short log line for a record of this scenario.
    #[must_use]
    pub fn describe(&self, telemetry: &Telemetry) -> String {
        match telemetry {
            Telemetry::Heartbeat(hb) => match FlightMode::from_custom_mode(hb.custom_mode) {
                Some(mode) => format!("HEARTBEAT - {mode}"),
                None => format!("HEARTBEAT - MODE_{}", hb.custom_mode),
            },
            Telemetry::SystemStatus(status) => format!(
                "SYS_STATUS - {:.1}V, {:.1}A, {}%",
                f64::from(status.voltage_battery) / 1000.0,
                f64::from(status.current_battery.unsigned_abs()) / 100.0,
                status.battery_remaining
            ),
            Telemetry::PositionFix(fix) => format!(
                "GPS - {:.4}, {:.4}, {} sats",
                fix.latitude, fix.longitude, fix.satellites_visible
            ),
            Telemetry::Orientation(att) => format!(
                "ATTITUDE - Roll: {:.1}°, Pitch: {:.1}°, Yaw: {:.1}°",
                att.roll.to_degrees(),
                att.pitch.to_degrees(),
                att.yaw.to_degrees()
            ),
            Telemetry::FlightSummary(hud) => {
                format!("VFR_HUD - Speed: {:.1} m/s", hud.groundspeed)
            }
        }
    }
}
