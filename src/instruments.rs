//! Instrument rendering capability.
//!
//! `InstrumentBackend` constructs analog widgets bound to a target node;
//! `Instrument` is the setter surface the panel layer drives. `GaugeBackend`
//! is the back end used by the egui renderer: its widgets only hold state,
//! the painting happens in `ui::gauges`.

use std::fmt;

// Dial limits of the flight-indicator faces
pub const PITCH_BOUND: f64 = 30.0;
pub const VARIO_BOUND: f64 = 1.95;
pub const AIRSPEED_BOUND_LOW: f64 = 0.0;
pub const AIRSPEED_BOUND_HIGH: f64 = 160.0;
pub const PRESSURE_BOUND_LOW: f64 = 980.0;
pub const PRESSURE_BOUND_HIGH: f64 = 1040.0;
pub const STANDARD_PRESSURE: f64 = 1013.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    Attitude,
    Altimeter,
    Heading,
    Variometer,
    Airspeed,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 5] = [
        InstrumentKind::Attitude,
        InstrumentKind::Altimeter,
        InstrumentKind::Heading,
        InstrumentKind::Variometer,
        InstrumentKind::Airspeed,
    ];

    /// Name used for node ids and by the rendering library
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::Attitude => "attitude",
            InstrumentKind::Altimeter => "altimeter",
            InstrumentKind::Heading => "heading",
            InstrumentKind::Variometer => "variometer",
            InstrumentKind::Airspeed => "airspeed",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction options understood by every back end
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentOptions {
    pub size: u32,
    pub show_box: bool,
    pub image_directory: String,
    pub heading: Option<f64>,
    pub vario: Option<f64>,
}

pub trait Instrument {
    fn kind(&self) -> InstrumentKind;
    fn size(&self) -> u32;

    fn set_roll(&mut self, roll: f64);
    fn set_pitch(&mut self, pitch: f64);
    fn set_heading(&mut self, heading: f64);
    fn set_air_speed(&mut self, speed: f64);
    fn set_altitude(&mut self, altitude: f64);
    fn set_vario(&mut self, vario: f64);
    fn set_pressure(&mut self, pressure: f64);
    fn resize(&mut self, size: u32);
    fn show_box(&mut self);
    fn hide_box(&mut self);
}

pub trait InstrumentBackend {
    type Widget: Instrument;

    fn construct_instrument(
        &mut self,
        target: &str,
        kind: InstrumentKind,
        options: &InstrumentOptions,
    ) -> Self::Widget;
}

/// Widget state painted by the egui renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub target: String,
    pub kind: InstrumentKind,
    pub size: u32,
    pub box_visible: bool,
    pub image_directory: String,
    pub roll: f64,
    pub pitch: f64,
    pub heading: f64,
    pub air_speed: f64,
    pub altitude: f64,
    pub vario: f64,
    pub pressure: f64,
}

impl Gauge {
    pub fn display_pitch(&self) -> f64 {
        self.pitch.clamp(-PITCH_BOUND, PITCH_BOUND)
    }

    pub fn display_air_speed(&self) -> f64 {
        self.air_speed.clamp(AIRSPEED_BOUND_LOW, AIRSPEED_BOUND_HIGH)
    }

    /// Climb rate, in thousands of ft/min, bounded to the dial
    pub fn display_vario(&self) -> f64 {
        self.vario.clamp(-VARIO_BOUND, VARIO_BOUND)
    }

    pub fn display_pressure(&self) -> f64 {
        self.pressure.clamp(PRESSURE_BOUND_LOW, PRESSURE_BOUND_HIGH)
    }
}

impl Instrument for Gauge {
    fn kind(&self) -> InstrumentKind {
        self.kind
    }

    fn size(&self) -> u32 {
        self.size
    }

    fn set_roll(&mut self, roll: f64) {
        self.roll = roll;
    }

    fn set_pitch(&mut self, pitch: f64) {
        self.pitch = pitch;
    }

    fn set_heading(&mut self, heading: f64) {
        self.heading = heading;
    }

    fn set_air_speed(&mut self, speed: f64) {
        self.air_speed = speed;
    }

    fn set_altitude(&mut self, altitude: f64) {
        self.altitude = altitude;
    }

    fn set_vario(&mut self, vario: f64) {
        self.vario = vario;
    }

    fn set_pressure(&mut self, pressure: f64) {
        self.pressure = pressure;
    }

    fn resize(&mut self, size: u32) {
        self.size = size;
    }

    fn show_box(&mut self) {
        self.box_visible = true;
    }

    fn hide_box(&mut self) {
        self.box_visible = false;
    }
}

/// Back end producing [`Gauge`] widgets. Counts constructions so rebuilds are observable.
#[derive(Debug, Default)]
pub struct GaugeBackend {
    constructed: usize,
}

impl GaugeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constructed(&self) -> usize {
        self.constructed
    }
}

impl InstrumentBackend for GaugeBackend {
    type Widget = Gauge;

    fn construct_instrument(
        &mut self,
        target: &str,
        kind: InstrumentKind,
        options: &InstrumentOptions,
    ) -> Gauge {
        self.constructed += 1;
        Gauge {
            target: target.trim_start_matches('#').to_string(),
            kind,
            size: options.size,
            box_visible: options.show_box,
            image_directory: options.image_directory.clone(),
            roll: 0.0,
            pitch: 0.0,
            heading: options.heading.unwrap_or(0.0),
            air_speed: 0.0,
            altitude: 0.0,
            vario: options.vario.unwrap_or(0.0),
            pressure: STANDARD_PRESSURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> InstrumentOptions {
        InstrumentOptions {
            size: 89,
            show_box: true,
            image_directory: "img/".to_string(),
            heading: Some(0.0),
            vario: Some(-5.0),
        }
    }

    #[test]
    fn construct_applies_options() {
        let mut backend = GaugeBackend::new();
        let gauge =
            backend.construct_instrument("#variometer_7", InstrumentKind::Variometer, &options());
        assert_eq!(gauge.target, "variometer_7");
        assert_eq!(gauge.size(), 89);
        assert_eq!(gauge.vario, -5.0);
        assert_eq!(backend.constructed(), 1);
    }

    #[test]
    fn display_values_are_bounded_to_the_dial() {
        let mut backend = GaugeBackend::new();
        let mut gauge =
            backend.construct_instrument("attitude_1", InstrumentKind::Attitude, &options());
        gauge.set_pitch(45.0);
        gauge.set_air_speed(500.0);
        gauge.set_vario(-4.0);
        gauge.set_pressure(900.0);
        assert_eq!(gauge.display_pitch(), PITCH_BOUND);
        assert_eq!(gauge.display_air_speed(), AIRSPEED_BOUND_HIGH);
        assert_eq!(gauge.display_vario(), -VARIO_BOUND);
        assert_eq!(gauge.display_pressure(), PRESSURE_BOUND_LOW);
        // Raw values are kept as written
        assert_eq!(gauge.pitch, 45.0);
    }

    #[test]
    fn box_toggles() {
        let mut backend = GaugeBackend::new();
        let mut gauge =
            backend.construct_instrument("heading_1", InstrumentKind::Heading, &options());
        gauge.hide_box();
        assert!(!gauge.box_visible);
        gauge.show_box();
        assert!(gauge.box_visible);
    }
}
