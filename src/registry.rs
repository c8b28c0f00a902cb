//! Panel ownership and lazy panel creation.
//!
//! `PanelRegistry` is the side table from vehicle id to `IndicatorSet`.
//! `PanelContext` bundles it with the node factory, the instrument back end
//! and the current viewport width; every panel operation takes it explicitly.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::config::{
    GPS_CLASS, HIDE_CLASS, INITIAL_READOUT_TEXT, IndicatorConfig, PANEL_CLASS, READOUT_ICON_CLASS,
};
use crate::error::PanelError;
use crate::fleet::FleetManager;
use crate::indicators::{
    AnalogWidgets, DigitalReadout, DigitalReadouts, GPS_STATUS, IndicatorSet, PLACEHOLDERS,
    ReadoutKind, instrument_node_id, panel_id, readout_icon_id, readout_text_id,
};
use crate::instruments::{Instrument, InstrumentBackend};
use crate::nodes::{NodeFactory, NodeHandle};
use crate::resize::{self, instrument_size};
use crate::teardown::{self, TeardownOutcome};
use crate::telemetry::{Vehicle, VehicleId};
use crate::update::{self, PushOutcome};
use crate::visibility::{self, RefreshOutcome};

#[derive(Debug)]
pub struct PanelRegistry<W> {
    sets: BTreeMap<VehicleId, IndicatorSet<W>>,
}

impl<W> Default for PanelRegistry<W> {
    fn default() -> Self {
        Self {
            sets: BTreeMap::new(),
        }
    }
}

impl<W> PanelRegistry<W> {
    pub fn get(&self, id: VehicleId) -> Option<&IndicatorSet<W>> {
        self.sets.get(&id)
    }

    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut IndicatorSet<W>> {
        self.sets.get_mut(&id)
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.sets.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Sets in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &IndicatorSet<W>> {
        self.sets.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut IndicatorSet<W>> {
        self.sets.values_mut()
    }

    /// The panel currently marked shown, if any
    pub fn shown(&self) -> Option<&IndicatorSet<W>> {
        self.sets.values().find(|set| set.show)
    }

    pub fn shown_count(&self) -> usize {
        self.sets.values().filter(|set| set.show).count()
    }

    pub(crate) fn insert(&mut self, set: IndicatorSet<W>) {
        self.sets.insert(set.id, set);
    }

    pub(crate) fn clear(&mut self) {
        self.sets.clear();
    }
}

/// Session-scoped state shared by all panel operations
pub struct PanelContext<N, B: InstrumentBackend> {
    pub registry: PanelRegistry<B::Widget>,
    pub nodes: N,
    pub backend: B,
    pub viewport_width: f32,
    pub config: IndicatorConfig,
    /// Contenders named by the last contested-view warning
    pub(crate) reported_contenders: Vec<VehicleId>,
}

impl<N, B> PanelContext<N, B>
where
    N: NodeFactory,
    B: InstrumentBackend,
{
    pub fn new(nodes: N, backend: B, viewport_width: f32, config: IndicatorConfig) -> Self {
        Self {
            registry: PanelRegistry::default(),
            nodes,
            backend,
            viewport_width,
            config,
            reported_contenders: Vec::new(),
        }
    }

    /// Analog widget size for the current viewport
    pub fn instrument_size(&self) -> u32 {
        instrument_size(self.viewport_width, self.config.size_divisor)
    }

    pub fn ensure_indicators_for_vehicle<F>(&mut self, fleet: &F, id: VehicleId) -> EnsureOutcome
    where
        F: FleetManager + ?Sized,
    {
        ensure_indicators_for_vehicle(self, fleet, id)
    }

    pub fn refresh<F>(&mut self, fleet: &F) -> RefreshOutcome
    where
        F: FleetManager + ?Sized,
    {
        visibility::refresh(self, fleet)
    }

    pub fn push_telemetry<F>(&mut self, fleet: &F, vehicle: &Vehicle) -> PushOutcome
    where
        F: FleetManager + ?Sized,
    {
        update::push_telemetry(self, fleet, vehicle)
    }

    pub fn on_viewport_resize(&mut self, viewport_width: f32) -> usize {
        resize::on_viewport_resize(self, viewport_width)
    }

    pub fn remove_all_panels(&mut self) -> TeardownOutcome {
        teardown::remove_all_panels(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created,
    /// A panel container for the id is already in the view tree
    AlreadyPresent,
    UnknownVehicle,
    Failed(PanelError),
}

/// Creates the panel for `id` unless its container already exists.
///
/// Map icon clicks, menu buttons and panel-open actions can all land here for
/// the same vehicle; the container lookup is what keeps a second panel from
/// ever being built. After a creation the visibility policy is re-applied.
pub fn ensure_indicators_for_vehicle<N, B, F>(
    ctx: &mut PanelContext<N, B>,
    fleet: &F,
    id: VehicleId,
) -> EnsureOutcome
where
    N: NodeFactory,
    B: InstrumentBackend,
    F: FleetManager + ?Sized,
{
    if ctx.nodes.find_by_id(&panel_id(id)).is_some() {
        return EnsureOutcome::AlreadyPresent;
    }

    if fleet.vehicle_by_id(id).is_none() {
        warn!(vehicle = %id, "indicator panel requested for unknown vehicle");
        return EnsureOutcome::UnknownVehicle;
    }

    let set = match build_panel(ctx, id) {
        Ok(set) => set,
        Err(e) => {
            warn!(vehicle = %id, error = %e, "failed to build indicator panel");
            if let Some(container) = ctx.nodes.find_by_id(&panel_id(id)) {
                ctx.nodes.remove_node(container);
            }
            return EnsureOutcome::Failed(e);
        }
    };

    info!(vehicle = %id, size = set.analog.attitude.size(), "created indicator panel");
    ctx.registry.insert(set);
    visibility::refresh(ctx, fleet);
    EnsureOutcome::Created
}

fn build_panel<N, B>(
    ctx: &mut PanelContext<N, B>,
    id: VehicleId,
) -> Result<IndicatorSet<B::Widget>, PanelError>
where
    N: NodeFactory,
    B: InstrumentBackend,
{
    let container = ctx
        .nodes
        .add_container(&panel_id(id), &[PANEL_CLASS, HIDE_CLASS]);
    ctx.nodes.attach_to_root(container)?;

    for item in PLACEHOLDERS {
        let classes: &[&str] = if item == GPS_STATUS { &[GPS_CLASS] } else { &[] };
        let slot = ctx.nodes.add_container(&instrument_node_id(item, id), classes);
        ctx.nodes.append_child(container, slot)?;
    }

    let size = ctx.instrument_size();
    let analog = AnalogWidgets::build(&mut ctx.backend, id, size, &ctx.config);

    let gps_status_id = instrument_node_id(GPS_STATUS, id);
    let gps_status = ctx
        .nodes
        .find_by_id(&gps_status_id)
        .ok_or(PanelError::MissingNode(gps_status_id))?;

    let readouts = DigitalReadouts {
        gps: add_readout(&mut ctx.nodes, &ctx.config, gps_status, ReadoutKind::Gps, id)?,
        battery: add_readout(&mut ctx.nodes, &ctx.config, gps_status, ReadoutKind::Battery, id)?,
        radio: add_readout(&mut ctx.nodes, &ctx.config, gps_status, ReadoutKind::Radio, id)?,
    };

    Ok(IndicatorSet {
        id,
        show: false,
        container,
        analog,
        readouts,
    })
}

fn add_readout<N: NodeFactory>(
    nodes: &mut N,
    config: &IndicatorConfig,
    slot: NodeHandle,
    kind: ReadoutKind,
    id: VehicleId,
) -> Result<DigitalReadout, PanelError> {
    let icon_container = nodes.add_container(&readout_icon_id(kind, id), &[READOUT_ICON_CLASS]);
    let image_path = format!(
        "{}/{}",
        config.readout_icon_directory.trim_end_matches('/'),
        kind.icon_file()
    );
    let icon = nodes.add_image_node(
        &instrument_node_id(kind.as_str(), id),
        &config.readout_color_hint,
        &image_path,
    );
    let text = nodes.add_text_node(&readout_text_id(kind, id));
    nodes.set_text(text, INITIAL_READOUT_TEXT)?;

    nodes.append_child(icon_container, icon)?;
    nodes.append_child(icon_container, text)?;
    nodes.append_child(slot, icon_container)?;

    Ok(DigitalReadout {
        kind,
        icon_container,
        icon,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SHOW_CLASS;
    use crate::fleet::Fleet;
    use crate::instruments::{GaugeBackend, Instrument};
    use crate::nodes::ViewTree;
    use crate::telemetry::Vehicle;

    fn context(width: f32) -> PanelContext<ViewTree, GaugeBackend> {
        PanelContext::new(
            ViewTree::new(),
            GaugeBackend::new(),
            width,
            IndicatorConfig::default(),
        )
    }

    fn fleet(ids: &[u32]) -> Fleet {
        ids.iter().map(|i| Vehicle::new(VehicleId(*i))).collect()
    }

    #[test]
    fn ensure_is_idempotent() {
        let mut ctx = context(1280.0);
        let mut fleet = fleet(&[4]);

        assert_eq!(
            ctx.ensure_indicators_for_vehicle(&fleet, VehicleId(4)),
            EnsureOutcome::Created
        );
        let nodes_after_first = ctx.nodes.len();
        let constructed_after_first = ctx.backend.constructed();

        // A refresh now would show the panel; the second call must not run one
        fleet.select_active_view(VehicleId(4));
        assert_eq!(
            ctx.ensure_indicators_for_vehicle(&fleet, VehicleId(4)),
            EnsureOutcome::AlreadyPresent
        );
        assert_eq!(ctx.registry.len(), 1);
        assert_eq!(ctx.nodes.find_by_class(PANEL_CLASS).len(), 1);
        assert_eq!(ctx.nodes.len(), nodes_after_first);
        assert_eq!(ctx.backend.constructed(), constructed_after_first);

        let set = ctx.registry.get(VehicleId(4)).unwrap();
        assert!(!set.show);
        let panel = ctx.nodes.node(set.container).unwrap();
        assert!(panel.has_class(HIDE_CLASS));
        assert!(!panel.has_class(SHOW_CLASS));
    }

    #[test]
    fn failed_outcome_carries_the_node_error() {
        let outcome = EnsureOutcome::Failed(PanelError::MissingNode("gps_status_1".into()));
        let copy = outcome.clone();
        assert_eq!(copy, outcome);
        assert_ne!(copy, EnsureOutcome::Created);
    }

    #[test]
    fn panel_follows_naming_convention() {
        let mut ctx = context(1280.0);
        let fleet = fleet(&[12]);
        ctx.ensure_indicators_for_vehicle(&fleet, VehicleId(12));

        for id in [
            "indicators_12",
            "attitude_12",
            "altimeter_12",
            "heading_12",
            "airspeed_12",
            "gps_status_12",
            "gps_12",
            "battery_12",
            "radio_12",
        ] {
            assert!(ctx.nodes.find_by_id(id).is_some(), "missing node {id}");
        }
        for id in ["gps_text_12", "battery_text_12", "radio_text_12"] {
            assert_eq!(ctx.nodes.text_of(id), Some(INITIAL_READOUT_TEXT));
        }
    }

    #[test]
    fn new_panel_starts_hidden_with_viewport_sized_widgets() {
        let mut ctx = context(1280.0);
        let fleet = fleet(&[1]);
        ctx.ensure_indicators_for_vehicle(&fleet, VehicleId(1));

        let set = ctx.registry.get(VehicleId(1)).unwrap();
        assert!(!set.show);
        let panel = ctx.nodes.node(set.container).unwrap();
        assert!(panel.has_class(HIDE_CLASS));
        // floor(1280 / 14.3) = 89
        assert!(set.analog.iter().all(|w| w.size() == 89));
        assert_eq!(set.analog.heading.heading, 0.0);
        assert_eq!(set.analog.variometer.vario, -5.0);
    }

    #[test]
    fn creating_the_active_vehicles_panel_shows_it() {
        let mut ctx = context(1280.0);
        let mut fleet = fleet(&[1, 2]);
        fleet.select_active_view(VehicleId(2));

        ctx.ensure_indicators_for_vehicle(&fleet, VehicleId(2));
        assert!(ctx.registry.get(VehicleId(2)).unwrap().show);
    }

    #[test]
    fn unknown_vehicle_gets_no_panel() {
        let mut ctx = context(1280.0);
        let fleet = fleet(&[1]);
        assert_eq!(
            ctx.ensure_indicators_for_vehicle(&fleet, VehicleId(99)),
            EnsureOutcome::UnknownVehicle
        );
        assert!(ctx.registry.is_empty());
        assert!(ctx.nodes.is_empty());
    }
}
