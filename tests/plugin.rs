use bevy::prelude::*;
use bevy::window::WindowResized;

use fleet_indicators::config::{HIDE_CLASS, PANEL_CLASS, SHOW_CLASS};
use fleet_indicators::instruments::Instrument;
use fleet_indicators::nodes::NodeFactory;
use fleet_indicators::{
    Fleet, FleetManager, IndicatorPanels, IndicatorPanelsPlugin, RemoveAllPanels, SelectVehicle,
    SelectionSource, Vehicle, VehicleId, VehicleTelemetry,
};

fn app_with_fleet(ids: &[u32]) -> App {
    let fleet: Fleet = ids.iter().map(|i| Vehicle::new(VehicleId(*i))).collect();
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(fleet)
        .add_plugins(IndicatorPanelsPlugin::default());
    app.update();
    app
}

fn select(app: &mut App, id: u32, source: SelectionSource) {
    app.world_mut().send_event(SelectVehicle {
        id: VehicleId(id),
        source,
    });
    app.update();
}

fn panels(app: &App) -> &IndicatorPanels {
    app.world().resource::<IndicatorPanels>()
}

fn shown_id(app: &App) -> Option<VehicleId> {
    panels(app).registry.shown().map(|set| set.id)
}

#[test]
fn plugin_starts_without_panels() {
    let app = app_with_fleet(&[1, 2]);
    assert!(panels(&app).registry.is_empty());
    assert!(panels(&app).nodes.is_empty());
    assert_eq!(panels(&app).viewport_width, 1280.0);
}

#[test]
fn selecting_a_vehicle_creates_and_shows_its_panel() {
    let mut app = app_with_fleet(&[1, 2]);
    select(&mut app, 2, SelectionSource::MapIcon);

    assert_eq!(panels(&app).registry.len(), 1);
    assert_eq!(shown_id(&app), Some(VehicleId(2)));
    let fleet = app.world().resource::<Fleet>();
    assert_eq!(fleet.active_vehicle().map(|v| v.id), Some(VehicleId(2)));
}

#[test]
fn every_selection_path_shares_one_panel_per_vehicle() {
    let mut app = app_with_fleet(&[1, 2]);
    select(&mut app, 1, SelectionSource::MapIcon);
    select(&mut app, 2, SelectionSource::Menu);
    select(&mut app, 1, SelectionSource::PanelOpen);

    let state = panels(&app);
    assert_eq!(state.registry.len(), 2);
    assert_eq!(state.nodes.find_by_class(PANEL_CLASS).len(), 2);
    assert_eq!(state.nodes.find_by_class(SHOW_CLASS).len(), 1);
    assert_eq!(state.nodes.find_by_class(HIDE_CLASS).len(), 1);
    assert_eq!(shown_id(&app), Some(VehicleId(1)));
}

#[test]
fn unknown_vehicle_selection_is_ignored() {
    let mut app = app_with_fleet(&[1]);
    select(&mut app, 9, SelectionSource::Menu);

    assert!(panels(&app).registry.is_empty());
    assert!(app.world().resource::<Fleet>().active_vehicle().is_none());
}

#[test]
fn active_vehicle_telemetry_reaches_its_panel() {
    let mut app = app_with_fleet(&[1, 2]);
    select(&mut app, 1, SelectionSource::Menu);

    let telemetry = VehicleTelemetry {
        roll: 5.0,
        heading: 90.0,
        vx: 10.0,
        rel_alt: 100.0,
        battery_remaining: 64,
        radio_percent: 95,
        radio_missing: 1,
        satellites_visible: 9,
        ..Default::default()
    };
    {
        let mut fleet = app.world_mut().resource_mut::<Fleet>();
        fleet.update_telemetry(VehicleId(1), telemetry.clone());
        fleet.update_telemetry(VehicleId(2), telemetry);
    }
    app.update();

    let state = panels(&app);
    let set = state.registry.get(VehicleId(1)).unwrap();
    assert_eq!(set.analog.attitude.roll, 5.0);
    assert_eq!(set.analog.heading.heading, 90.0);
    assert!((set.analog.airspeed.air_speed - 19.4384).abs() < 1e-3);
    assert!((set.analog.altimeter.altitude - 328.084).abs() < 1e-3);
    assert_eq!(state.nodes.text_of("battery_text_1"), Some("64%"));
    assert_eq!(state.nodes.text_of("radio_text_1"), Some("95%, 1%"));
    assert_eq!(state.nodes.text_of("gps_text_1"), Some("9"));
    // Vehicle 2 never had a panel
    assert!(state.registry.get(VehicleId(2)).is_none());
}

#[test]
fn window_resize_rebuilds_every_panel() {
    let mut app = app_with_fleet(&[1, 2]);
    select(&mut app, 1, SelectionSource::Menu);
    select(&mut app, 2, SelectionSource::Menu);

    app.world_mut().send_event(WindowResized {
        window: Entity::PLACEHOLDER,
        width: 1920.0,
        height: 1080.0,
    });
    app.update();

    let state = panels(&app);
    assert_eq!(state.viewport_width, 1920.0);
    for set in state.registry.iter() {
        assert!(set.analog.iter().all(|w| w.size() == 134));
    }
    assert_eq!(shown_id(&app), Some(VehicleId(2)));
}

#[test]
fn remove_all_panels_clears_the_session() {
    let mut app = app_with_fleet(&[1, 2]);
    select(&mut app, 1, SelectionSource::Menu);
    select(&mut app, 2, SelectionSource::Menu);

    app.world_mut().send_event(RemoveAllPanels);
    app.update();
    assert!(panels(&app).registry.is_empty());
    assert!(panels(&app).nodes.is_empty());

    // A second teardown finds nothing and changes nothing
    app.world_mut().send_event(RemoveAllPanels);
    app.update();
    assert!(panels(&app).registry.is_empty());

    select(&mut app, 1, SelectionSource::PanelOpen);
    assert_eq!(shown_id(&app), Some(VehicleId(1)));
    assert_eq!(panels(&app).registry.len(), 1);
}

#[test]
fn teardown_in_the_same_tick_runs_after_selection() {
    let mut app = app_with_fleet(&[1]);
    app.world_mut().send_event(SelectVehicle {
        id: VehicleId(1),
        source: SelectionSource::Menu,
    });
    app.world_mut().send_event(RemoveAllPanels);
    app.update();

    assert!(panels(&app).registry.is_empty());
    let fleet = app.world().resource::<Fleet>();
    assert!(fleet.vehicle_by_id(VehicleId(1)).unwrap().active_view);
}
