//! Typed telemetry records
//!
//! Each record mirrors one layout table. Conversion to [`Fields`] is the only
//! path into the encoder, so typed and hand-built field maps share the same
//! range checks.

use super::{Fields, MessageKind};

/// Status beacon (HEARTBEAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heartbeat {
    /// Autopilot-specific flight mode
    pub custom_mode: u32,
    /// Vehicle type code (MAV_TYPE)
    pub vehicle_type: u8,
    /// Autopilot type code (MAV_AUTOPILOT)
    pub autopilot: u8,
    /// Base mode bitmask
    pub base_mode: u8,
    /// System state code (MAV_STATE)
    pub system_status: u8,
    /// Protocol version
    pub mavlink_version: u8,
}

/// System health report (SYS_STATUS), battery fields only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemStatus {
    /// Battery voltage in millivolts
    pub voltage_battery: u16,
    /// Battery current in centiamperes (negative while discharging)
    pub current_battery: i16,
    /// Remaining battery in percent, -1 if unknown
    pub battery_remaining: i8,
}

/// Raw GNSS fix (GPS_RAW_INT)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionFix {
    /// Time since the Unix epoch in microseconds
    pub time_usec: u64,
    /// Fix quality code
    pub fix_type: u8,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Altitude in millimeters
    pub altitude_mm: i32,
    /// Horizontal dilution
    pub eph: u16,
    /// Vertical dilution
    pub epv: u16,
    /// Ground speed in cm/s
    pub velocity: u16,
    /// Course over ground in centidegrees
    pub course: u16,
    /// Number of satellites in view
    pub satellites_visible: u8,
}

/// Vehicle orientation (ATTITUDE)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attitude {
    /// Time since boot in milliseconds
    pub time_boot_ms: u32,
    /// Roll in radians
    pub roll: f32,
    /// Pitch in radians
    pub pitch: f32,
    /// Yaw in radians
    pub yaw: f32,
    /// Roll rate in rad/s
    pub rollspeed: f32,
    /// Pitch rate in rad/s
    pub pitchspeed: f32,
    /// Yaw rate in rad/s
    pub yawspeed: f32,
}

/// Flight summary for HUD displays (VFR_HUD)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VfrHud {
    /// Indicated airspeed in m/s
    pub airspeed: f32,
    /// Ground speed in m/s
    pub groundspeed: f32,
    /// Heading in degrees
    pub heading: f32,
    /// Altitude in meters
    pub altitude: f32,
    /// Throttle setting (0..=1000)
    pub throttle: u16,
}

/// Any telemetry record the encoder understands
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Telemetry {
    /// HEARTBEAT
    Heartbeat(Heartbeat),
    /// SYS_STATUS
    SystemStatus(SystemStatus),
    /// GPS_RAW_INT
    PositionFix(PositionFix),
    /// ATTITUDE
    Orientation(Attitude),
    /// VFR_HUD
    FlightSummary(VfrHud),
}

impl Telemetry {
    /// Message kind this record encodes as
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Heartbeat(_) => MessageKind::Heartbeat,
            Self::SystemStatus(_) => MessageKind::SystemStatus,
            Self::PositionFix(_) => MessageKind::PositionFix,
            Self::Orientation(_) => MessageKind::Orientation,
            Self::FlightSummary(_) => MessageKind::FlightSummary,
        }
    }

    /// Named field values keyed by layout field name
    #[must_use]
    pub fn to_fields(&self) -> Fields {
        match self {
            Self::Heartbeat(hb) => Fields::new()
                .with("custom_mode", hb.custom_mode)
                .with("type", hb.vehicle_type)
                .with("autopilot", hb.autopilot)
                .with("base_mode", hb.base_mode)
                .with("system_status", hb.system_status)
                .with("mavlink_version", hb.mavlink_version),
            Self::SystemStatus(status) => Fields::new()
                .with("voltage_battery", status.voltage_battery)
                .with("current_battery", status.current_battery)
                .with("battery_remaining", status.battery_remaining),
            Self::PositionFix(fix) => Fields::new()
                .with("time_usec", fix.time_usec)
                .with("fix_type", fix.fix_type)
                .with("lat", fix.latitude)
                .with("lon", fix.longitude)
                .with("alt", fix.altitude_mm)
                .with("eph", fix.eph)
                .with("epv", fix.epv)
                .with("vel", fix.velocity)
                .with("cog", fix.course)
                .with("satellites_visible", fix.satellites_visible),
            Self::Orientation(att) => Fields::new()
                .with("time_boot_ms", att.time_boot_ms)
                .with("roll", att.roll)
                .with("pitch", att.pitch)
                .with("yaw", att.yaw)
                .with("rollspeed", att.rollspeed)
                .with("pitchspeed", att.pitchspeed)
                .with("yawspeed", att.yawspeed),
            Self::FlightSummary(hud) => Fields::new()
                .with("airspeed", hud.airspeed)
                .with("groundspeed", hud.groundspeed)
                .with("heading", hud.heading)
                .with("alt", hud.altitude)
                .with("throttle", hud.throttle),
        }
    }
}

impl From<Heartbeat> for Telemetry {
    fn from(value: Heartbeat) -> Self {
        Self::Heartbeat(value)
    }
}

impl From<SystemStatus> for Telemetry {
    fn from(value: SystemStatus) -> Self {
        Self::SystemStatus(value)
    }
}

impl From<PositionFix> for Telemetry {
    fn from(value: PositionFix) -> Self {
        Self::PositionFix(value)
    }
}

impl From<Attitude> for Telemetry {
    fn from(value: Attitude) -> Self {
        Self::Orientation(value)
    }
}

impl From<VfrHud> for Telemetry {
    fn from(value: VfrHud) -> Self {
        Self::FlightSummary(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_match_layout_names() {
        let records: [Telemetry; 5] = [
            Heartbeat {
                custom_mode: 0,
                vehicle_type: 0,
                autopilot: 0,
                base_mode: 0,
                system_status: 0,
                mavlink_version: 0,
            }
            .into(),
            SystemStatus {
                voltage_battery: 0,
                current_battery: 0,
                battery_remaining: 0,
            }
            .into(),
            PositionFix {
                time_usec: 0,
                fix_type: 0,
                latitude: 0.0,
                longitude: 0.0,
                altitude_mm: 0,
                eph: 0,
                epv: 0,
                velocity: 0,
                course: 0,
                satellites_visible: 0,
            }
            .into(),
            Attitude {
                time_boot_ms: 0,
                roll: 0.0,
                pitch: 0.0,
                yaw: 0.0,
                rollspeed: 0.0,
                pitchspeed: 0.0,
                yawspeed: 0.0,
            }
            .into(),
            VfrHud {
                airspeed: 0.0,
                groundspeed: 0.0,
                heading: 0.0,
                altitude: 0.0,
                throttle: 0,
            }
            .into(),
        ];

        #[cfg(feature = "serde")]
        for record in &records {
            let json = serde_json::to_string(record).unwrap();
            let back: Telemetry = serde_json::from_str(&json).unwrap();
            assert_eq!(&back, record);
        }

        for record in records {
            let kind = record.kind();
            let fields = record.to_fields();
            assert_eq!(fields.len(), kind.fields().len(), "{kind}");
            for spec in kind.fields() {
                assert!(fields.get(spec.name).is_some(), "{kind}.{}", spec.name);
            }
        }
    }
}
