use chrono::{DateTime, Local};
use std::fmt;

use crate::config::{FEET_PER_METER, KNOTS_PER_MPS};

/// Identity of a tracked vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(pub u32);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Latest telemetry fields the instrument panel consumes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VehicleTelemetry {
    // Attitude, degrees
    pub roll: f64,
    pub pitch: f64,
    pub heading: f64,
    // Ground velocity, m/s
    pub vx: f64,
    pub vy: f64,
    // Altitude above home, meters
    pub rel_alt: f64,
    // Link and power
    pub battery_remaining: i16,
    pub radio_percent: u8,
    pub radio_missing: u8,
    pub satellites_visible: u8,
}

impl VehicleTelemetry {
    /// Horizontal ground speed in knots
    pub fn airspeed_knots(&self) -> f64 {
        self.vx.hypot(self.vy) * KNOTS_PER_MPS
    }

    /// Relative altitude in feet
    pub fn altitude_feet(&self) -> f64 {
        self.rel_alt * FEET_PER_METER
    }

    pub fn battery_text(&self) -> String {
        format!("{}%", self.battery_remaining)
    }

    pub fn radio_text(&self) -> String {
        format!("{}%, {}%", self.radio_percent, self.radio_missing)
    }

    pub fn gps_text(&self) -> String {
        self.satellites_visible.to_string()
    }
}

/// A vehicle as owned by the fleet manager. Read, never mutated, by the panel layer.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub id: VehicleId,
    pub telemetry: VehicleTelemetry,
    pub active_view: bool,
    pub last_update: DateTime<Local>,
}

impl Vehicle {
    pub fn new(id: VehicleId) -> Self {
        Self {
            id,
            telemetry: VehicleTelemetry::default(),
            active_view: false,
            last_update: Local::now(),
        }
    }

    pub fn with_telemetry(mut self, telemetry: VehicleTelemetry) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn with_active_view(mut self, active: bool) -> Self {
        self.active_view = active;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_units() {
        let t = VehicleTelemetry {
            vx: 3.0,
            vy: 4.0,
            rel_alt: 10.0,
            ..Default::default()
        };
        assert!((t.airspeed_knots() - 9.7192).abs() < 1e-3);
        assert!((t.altitude_feet() - 32.8084).abs() < 1e-3);
    }

    #[test]
    fn readout_text_formats() {
        let t = VehicleTelemetry {
            battery_remaining: 87,
            radio_percent: 95,
            radio_missing: 3,
            satellites_visible: 11,
            ..Default::default()
        };
        assert_eq!(t.battery_text(), "87%");
        assert_eq!(t.radio_text(), "95%, 3%");
        assert_eq!(t.gps_text(), "11");
    }
}
