use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use std::path::PathBuf;
use tracing::warn;

use crate::config::{DEFAULT_VIEWPORT_WIDTH, IndicatorConfig};
use crate::fleet::{Fleet, FleetManager};
use crate::instruments::GaugeBackend;
use crate::nodes::ViewTree;
use crate::registry::{EnsureOutcome, PanelContext};
use crate::telemetry::VehicleId;

pub type Panels = PanelContext<ViewTree, GaugeBackend>;

/// The session's panel state as a bevy resource
#[derive(Resource, Deref, DerefMut)]
pub struct IndicatorPanels(pub Panels);

/// UI path that asked for a vehicle's panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    MapIcon,
    Menu,
    PanelOpen,
}

/// Make `id` the active view and make sure it has a panel
#[derive(Event, Debug, Clone, Copy)]
pub struct SelectVehicle {
    pub id: VehicleId,
    pub source: SelectionSource,
}

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RemoveAllPanels;

/// Systems that mutate panel state, run in this order every frame
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndicatorSystems;

#[derive(Default)]
pub struct IndicatorPanelsPlugin {
    config: IndicatorConfig,
    config_path: Option<PathBuf>,
}

impl IndicatorPanelsPlugin {
    pub fn new(config: IndicatorConfig) -> Self {
        Self {
            config,
            config_path: None,
        }
    }

    /// Reads the config when the plugin is built, so the load is logged
    pub fn from_config_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config: IndicatorConfig::default(),
            config_path: Some(path.into()),
        }
    }
}

impl Plugin for IndicatorPanelsPlugin {
    fn build(&self, app: &mut App) {
        let config = match &self.config_path {
            Some(path) => IndicatorConfig::load_or_default(path),
            None => self.config.clone(),
        };
        let panels = PanelContext::new(
            ViewTree::new(),
            GaugeBackend::new(),
            DEFAULT_VIEWPORT_WIDTH,
            config,
        );

        app.init_resource::<Fleet>()
            .insert_resource(IndicatorPanels(panels))
            .add_event::<SelectVehicle>()
            .add_event::<RemoveAllPanels>()
            .add_event::<WindowResized>()
            .add_systems(Startup, init_viewport_width)
            .add_systems(
                Update,
                (
                    handle_vehicle_selection,
                    handle_panel_teardown,
                    handle_viewport_resize,
                    push_fleet_telemetry,
                )
                    .chain()
                    .in_set(IndicatorSystems),
            );
    }
}

fn init_viewport_width(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut panels: ResMut<IndicatorPanels>,
) {
    if let Ok(window) = windows.get_single() {
        panels.viewport_width = window.width();
    }
}

/// Map icon clicks, menu buttons and panel-open actions all end up here
pub fn handle_vehicle_selection(
    mut events: EventReader<SelectVehicle>,
    mut fleet: ResMut<Fleet>,
    mut panels: ResMut<IndicatorPanels>,
) {
    for event in events.read() {
        if !fleet.select_active_view(event.id) {
            warn!(
                vehicle = %event.id,
                source = ?event.source,
                "selected vehicle is not in the fleet"
            );
            continue;
        }

        let fleet: &Fleet = &fleet;
        let outcome = panels.ensure_indicators_for_vehicle(fleet, event.id);
        if outcome == EnsureOutcome::AlreadyPresent {
            panels.refresh(fleet);
        }
    }
}

pub fn handle_panel_teardown(
    mut events: EventReader<RemoveAllPanels>,
    mut panels: ResMut<IndicatorPanels>,
) {
    for _ in events.read() {
        panels.remove_all_panels();
    }
}

/// Every resize event is a full rebuild; there is no debounce
pub fn handle_viewport_resize(
    mut events: EventReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut panels: ResMut<IndicatorPanels>,
) {
    let primary = primary.get_single().ok();
    for event in events.read() {
        if primary.is_some_and(|window| window != event.window) {
            continue;
        }
        panels.on_viewport_resize(event.width);
    }
}

pub fn push_fleet_telemetry(fleet: Res<Fleet>, mut panels: ResMut<IndicatorPanels>) {
    let fleet: &Fleet = &fleet;
    for vehicle in fleet.vehicle_list() {
        panels.push_telemetry(fleet, vehicle);
    }
}
