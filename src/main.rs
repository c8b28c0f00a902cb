use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use fleet_indicators::config::DEFAULT_CONFIG_PATH;
use fleet_indicators::fleet::{Fleet, FleetManager};
use fleet_indicators::plugin::{
    IndicatorPanelsPlugin, IndicatorSystems, SelectVehicle, SelectionSource,
};
use fleet_indicators::sim;
use fleet_indicators::ui::IndicatorUiPlugin;

const DEMO_VEHICLES: u32 = 3;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Fleet Indicators".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,fleet_indicators=debug".into(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin)
        .insert_resource(sim::demo_fleet(DEMO_VEHICLES))
        .add_plugins((
            IndicatorPanelsPlugin::from_config_file(DEFAULT_CONFIG_PATH),
            IndicatorUiPlugin,
        ))
        .add_systems(Startup, open_first_panel)
        .add_systems(Update, sim::simulate_fleet_system.before(IndicatorSystems))
        .run();
}

/// Start with the first vehicle's panel open
fn open_first_panel(fleet: Res<Fleet>, mut selections: EventWriter<SelectVehicle>) {
    if let Some(vehicle) = fleet.vehicle_list().first() {
        selections.send(SelectVehicle {
            id: vehicle.id,
            source: SelectionSource::PanelOpen,
        });
    }
}
