pub mod gauges;
pub mod panels;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::fleet::{Fleet, FleetManager};
use crate::plugin::{IndicatorPanels, IndicatorSystems, RemoveAllPanels, SelectVehicle};

/// Draws the vehicle menu, the fleet list and the shown indicator panel
pub struct IndicatorUiPlugin;

impl Plugin for IndicatorUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, ui_system.after(IndicatorSystems));
    }
}

/// Main UI system that renders all the egui panels
pub fn ui_system(
    mut contexts: EguiContexts,
    fleet: Res<Fleet>,
    panels: Res<IndicatorPanels>,
    mut selections: EventWriter<SelectVehicle>,
    mut teardown: EventWriter<RemoveAllPanels>,
) {
    let ctx = contexts.ctx_mut();
    // Telemetry changes every tick even without input
    ctx.request_repaint();

    render_top_panel(ctx, &fleet, &panels, &mut selections, &mut teardown);
    render_fleet_panel(ctx, &fleet, &mut selections);
    render_central_panel(ctx, &fleet, &panels);
}

fn frame(ctx: &egui::Context) -> egui::Frame {
    egui::Frame {
        inner_margin: egui::Margin::same(8.0),
        fill: ctx.style().visuals.window_fill(),
        ..Default::default()
    }
}

fn render_top_panel(
    ctx: &egui::Context,
    fleet: &Fleet,
    panels: &IndicatorPanels,
    selections: &mut EventWriter<SelectVehicle>,
    teardown: &mut EventWriter<RemoveAllPanels>,
) {
    egui::TopBottomPanel::top("top_panel")
        .frame(frame(ctx))
        .show(ctx, |ui| {
            panels::render_vehicle_menu(ui, fleet, panels, selections, teardown);
        });
}

fn render_fleet_panel(
    ctx: &egui::Context,
    fleet: &Fleet,
    selections: &mut EventWriter<SelectVehicle>,
) {
    egui::SidePanel::left("fleet_panel")
        .resizable(false)
        .frame(frame(ctx))
        .show(ctx, |ui| {
            panels::render_fleet_list(ui, fleet, selections);
        });
}

fn render_central_panel(ctx: &egui::Context, fleet: &Fleet, panels: &IndicatorPanels) {
    egui::CentralPanel::default()
        .frame(frame(ctx))
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match panels.registry.shown() {
                    Some(set) => {
                        let vehicle = fleet.vehicle_by_id(set.id);
                        panels::render_indicator_panel(ui, &panels.nodes, set, vehicle);
                    }
                    None => {
                        ui.centered_and_justified(|ui| {
                            ui.label("Select a vehicle to show its indicators");
                        });
                    }
                });
        });
}
