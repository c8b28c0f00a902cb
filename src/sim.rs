//! Stand-in telemetry feed for the demo window.

use bevy::prelude::*;
use chrono::Local;

use crate::fleet::Fleet;
use crate::telemetry::{Vehicle, VehicleId, VehicleTelemetry};

/// Battery drains from full over this many seconds, then wraps
const BATTERY_PERIOD_SECS: f64 = 600.0;

/// A fleet of `count` idle vehicles with ids starting at 1
pub fn demo_fleet(count: u32) -> Fleet {
    (1..=count)
        .map(|i| Vehicle::new(VehicleId(i)).with_telemetry(simulated_telemetry(0.0, i as f64)))
        .collect()
}

/// Telemetry for elapsed time `t`. `phase` separates vehicles.
pub fn simulated_telemetry(t: f64, phase: f64) -> VehicleTelemetry {
    let t = t + phase * 7.0;
    let course = (t * 6.0).rem_euclid(360.0);
    let speed = 18.0 + 4.0 * (t * 0.2).sin();
    let climb = (t / 120.0).fract();

    VehicleTelemetry {
        roll: 20.0 * (t * 0.5).sin(),
        pitch: 8.0 * (t * 0.3).cos(),
        heading: course,
        vx: speed * course.to_radians().cos(),
        vy: speed * course.to_radians().sin(),
        rel_alt: 30.0 + 120.0 * climb,
        battery_remaining: (100.0 * (1.0 - (t / BATTERY_PERIOD_SECS).fract())).round() as i16,
        radio_percent: (90.0 + 9.0 * (t * 0.7).sin()).round() as u8,
        radio_missing: (2.0 + 2.0 * (t * 1.3).cos()).round() as u8,
        satellites_visible: (11.0 + 3.0 * (t * 0.05).sin()).round() as u8,
    }
}

/// Advances every vehicle's telemetry from the app clock
pub fn simulate_fleet_system(time: Res<Time>, mut fleet: ResMut<Fleet>) {
    let t = time.elapsed_secs_f64();
    let now = Local::now();
    for vehicle in fleet.vehicles_mut() {
        vehicle.telemetry = simulated_telemetry(t, vehicle.id.0 as f64);
        vehicle.last_update = now;
    }
}
