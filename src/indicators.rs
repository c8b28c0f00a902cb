use crate::config::{INITIAL_HEADING, INITIAL_VARIO, IndicatorConfig};
use crate::instruments::{Instrument, InstrumentBackend, InstrumentKind, InstrumentOptions};
use crate::nodes::NodeHandle;
use crate::telemetry::VehicleId;

/// Placeholder slots created inside every panel, in display order
pub const PLACEHOLDERS: [&str; 5] = ["attitude", "altimeter", "heading", "airspeed", "gps_status"];
pub const GPS_STATUS: &str = "gps_status";

pub fn panel_id(id: VehicleId) -> String {
    format!("indicators_{id}")
}

pub fn instrument_node_id(instrument: &str, id: VehicleId) -> String {
    format!("{instrument}_{id}")
}

pub fn readout_text_id(readout: ReadoutKind, id: VehicleId) -> String {
    format!("{}_text_{id}", readout.as_str())
}

pub fn readout_icon_id(readout: ReadoutKind, id: VehicleId) -> String {
    format!("{}_icon_{id}", readout.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadoutKind {
    Gps,
    Battery,
    Radio,
}

impl ReadoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadoutKind::Gps => "gps",
            ReadoutKind::Battery => "battery",
            ReadoutKind::Radio => "radio",
        }
    }

    pub fn icon_file(&self) -> &'static str {
        match self {
            ReadoutKind::Gps => "gps.svg",
            ReadoutKind::Battery => "battery.svg",
            ReadoutKind::Radio => "media-signal-tower-svgrepo-com.svg",
        }
    }
}

/// The five analog widgets of one panel. Replaced as a whole on resize.
#[derive(Debug, Clone)]
pub struct AnalogWidgets<W> {
    pub attitude: W,
    pub altimeter: W,
    pub heading: W,
    pub variometer: W,
    pub airspeed: W,
}

impl<W: Instrument> AnalogWidgets<W> {
    pub fn build<B>(backend: &mut B, id: VehicleId, size: u32, config: &IndicatorConfig) -> Self
    where
        B: InstrumentBackend<Widget = W>,
    {
        let mut construct = |kind: InstrumentKind| {
            let options = InstrumentOptions {
                size,
                show_box: config.show_box,
                image_directory: config.image_directory.clone(),
                heading: (kind == InstrumentKind::Heading).then_some(INITIAL_HEADING),
                vario: (kind == InstrumentKind::Variometer).then_some(INITIAL_VARIO),
            };
            let target = format!("#{}", instrument_node_id(kind.as_str(), id));
            backend.construct_instrument(&target, kind, &options)
        };

        Self {
            attitude: construct(InstrumentKind::Attitude),
            altimeter: construct(InstrumentKind::Altimeter),
            heading: construct(InstrumentKind::Heading),
            variometer: construct(InstrumentKind::Variometer),
            airspeed: construct(InstrumentKind::Airspeed),
        }
    }

    pub fn get(&self, kind: InstrumentKind) -> &W {
        match kind {
            InstrumentKind::Attitude => &self.attitude,
            InstrumentKind::Altimeter => &self.altimeter,
            InstrumentKind::Heading => &self.heading,
            InstrumentKind::Variometer => &self.variometer,
            InstrumentKind::Airspeed => &self.airspeed,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &W> {
        InstrumentKind::ALL.into_iter().map(|kind| self.get(kind))
    }
}

/// Node handles behind one text readout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitalReadout {
    pub kind: ReadoutKind,
    pub icon_container: NodeHandle,
    pub icon: NodeHandle,
    pub text: NodeHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitalReadouts {
    pub gps: DigitalReadout,
    pub battery: DigitalReadout,
    pub radio: DigitalReadout,
}

impl DigitalReadouts {
    pub fn get(&self, kind: ReadoutKind) -> &DigitalReadout {
        match kind {
            ReadoutKind::Gps => &self.gps,
            ReadoutKind::Battery => &self.battery,
            ReadoutKind::Radio => &self.radio,
        }
    }
}

/// Everything one vehicle's panel is made of
#[derive(Debug, Clone)]
pub struct IndicatorSet<W> {
    pub id: VehicleId,
    pub show: bool,
    pub container: NodeHandle,
    pub analog: AnalogWidgets<W>,
    pub readouts: DigitalReadouts,
}
