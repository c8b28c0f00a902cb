use bevy::prelude::EventWriter;
use bevy_egui::egui::{self, Color32};

use crate::fleet::{Fleet, FleetManager};
use crate::plugin::{SelectVehicle, SelectionSource};
use crate::telemetry::Vehicle;

const ACTIVE_ICON: Color32 = Color32::from_rgb(255, 200, 60);
const IDLE_ICON: Color32 = Color32::from_rgb(140, 140, 140);

/// Renders the vehicle list standing in for the map icons
pub fn render_fleet_list(
    ui: &mut egui::Ui,
    fleet: &Fleet,
    selections: &mut EventWriter<SelectVehicle>,
) {
    ui.heading("Fleet");
    ui.separator();

    if fleet.is_empty() {
        ui.label("No vehicles tracked");
        return;
    }

    for vehicle in fleet.vehicle_list() {
        render_vehicle_entry(ui, vehicle, selections);
        ui.add_space(4.0);
    }
}

fn render_vehicle_entry(
    ui: &mut egui::Ui,
    vehicle: &Vehicle,
    selections: &mut EventWriter<SelectVehicle>,
) {
    ui.horizontal(|ui| {
        let color = if vehicle.active_view {
            ACTIVE_ICON
        } else {
            IDLE_ICON
        };
        let icon = ui.add(
            egui::Label::new(egui::RichText::new("✈").size(18.0).color(color))
                .sense(egui::Sense::click()),
        );
        if icon.on_hover_text("Show on map").clicked() {
            selections.send(SelectVehicle {
                id: vehicle.id,
                source: SelectionSource::MapIcon,
            });
        }

        ui.vertical(|ui| {
            ui.label(egui::RichText::new(format!("Vehicle {}", vehicle.id)).strong());
            ui.label(
                egui::RichText::new(format!(
                    "{:.0} ft  {:.0} kt",
                    vehicle.telemetry.altitude_feet(),
                    vehicle.telemetry.airspeed_knots()
                ))
                .monospace()
                .small(),
            );
        });

        if ui.small_button("Open panel").clicked() {
            selections.send(SelectVehicle {
                id: vehicle.id,
                source: SelectionSource::PanelOpen,
            });
        }
    });
}
