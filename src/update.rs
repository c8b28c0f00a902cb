use tracing::debug;

use crate::fleet::FleetManager;
use crate::indicators::{ReadoutKind, readout_text_id};
use crate::instruments::{Instrument, InstrumentBackend};
use crate::nodes::NodeFactory;
use crate::registry::PanelContext;
use crate::telemetry::Vehicle;
use crate::visibility;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Vehicle is not the active view, nothing written
    Inactive,
    /// Vehicle is active but has no panel yet
    MissingPanel,
    /// Widgets updated; `skipped` lists readouts whose text node was absent
    Pushed { skipped: Vec<ReadoutKind> },
}

/// Writes the vehicle's latest telemetry into its panel.
///
/// Only the active vehicle is pushed. A hidden panel triggers a visibility
/// refresh first; the decision of what is shown stays with `visibility`.
pub fn push_telemetry<N, B, F>(
    ctx: &mut PanelContext<N, B>,
    fleet: &F,
    vehicle: &Vehicle,
) -> PushOutcome
where
    N: NodeFactory,
    B: InstrumentBackend,
    F: FleetManager + ?Sized,
{
    if !vehicle.active_view {
        return PushOutcome::Inactive;
    }

    let shown = match ctx.registry.get(vehicle.id) {
        Some(set) => set.show,
        None => return PushOutcome::MissingPanel,
    };
    if !shown {
        visibility::refresh(ctx, fleet);
    }

    let telemetry = &vehicle.telemetry;
    let Some(set) = ctx.registry.get_mut(vehicle.id) else {
        return PushOutcome::MissingPanel;
    };
    set.analog.attitude.set_roll(telemetry.roll);
    set.analog.attitude.set_pitch(telemetry.pitch);
    set.analog.heading.set_heading(telemetry.heading);
    set.analog.airspeed.set_air_speed(telemetry.airspeed_knots());
    set.analog.altimeter.set_altitude(telemetry.altitude_feet());

    let mut skipped = Vec::new();
    for kind in [ReadoutKind::Battery, ReadoutKind::Radio, ReadoutKind::Gps] {
        let text = match kind {
            ReadoutKind::Battery => telemetry.battery_text(),
            ReadoutKind::Radio => telemetry.radio_text(),
            ReadoutKind::Gps => telemetry.gps_text(),
        };
        if let Err(e) = ctx
            .nodes
            .set_text_by_id(&readout_text_id(kind, vehicle.id), &text)
        {
            debug!(vehicle = %vehicle.id, readout = kind.as_str(), error = %e, "readout skipped");
            skipped.push(kind);
        }
    }

    PushOutcome::Pushed { skipped }
}
