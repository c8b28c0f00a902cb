use bevy::prelude::EventWriter;
use bevy_egui::egui;

use crate::fleet::{Fleet, FleetManager};
use crate::plugin::{IndicatorPanels, RemoveAllPanels, SelectVehicle, SelectionSource};

/// Renders the top bar with one menu entry per vehicle and the teardown button
pub fn render_vehicle_menu(
    ui: &mut egui::Ui,
    fleet: &Fleet,
    state: &IndicatorPanels,
    selections: &mut EventWriter<SelectVehicle>,
    teardown: &mut EventWriter<RemoveAllPanels>,
) {
    ui.horizontal_wrapped(|ui| {
        ui.heading("Fleet Indicators");
        ui.separator();

        ui.menu_button("Vehicles", |ui| {
            if fleet.is_empty() {
                ui.label("No vehicles tracked");
            }
            for vehicle in fleet.vehicle_list() {
                if ui
                    .selectable_label(vehicle.active_view, format!("Vehicle {}", vehicle.id))
                    .clicked()
                {
                    selections.send(SelectVehicle {
                        id: vehicle.id,
                        source: SelectionSource::Menu,
                    });
                    ui.close_menu();
                }
            }
        });

        ui.separator();
        ui.label(format!("Panels: {}", state.registry.len()));
        ui.label(format!("Instrument size: {}px", state.instrument_size()));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let remove = ui.add_enabled(
                !state.registry.is_empty(),
                egui::Button::new("Remove all panels"),
            );
            if remove.clicked() {
                teardown.send(RemoveAllPanels);
            }
        });
    });
}
