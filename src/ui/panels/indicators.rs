use bevy_egui::egui::{self, Color32};

use crate::config::{GPS_CLASS, READOUT_ICON_CLASS};
use crate::indicators::IndicatorSet;
use crate::instruments::Gauge;
use crate::nodes::{Node, NodeHandle, NodeKind, ViewTree};
use crate::telemetry::Vehicle;
use crate::ui::gauges;

/// Renders the shown panel by walking its container in the view tree
pub fn render_indicator_panel(
    ui: &mut egui::Ui,
    tree: &ViewTree,
    set: &IndicatorSet<Gauge>,
    vehicle: Option<&Vehicle>,
) {
    ui.horizontal(|ui| {
        ui.heading(format!("Vehicle {}", set.id));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            match vehicle {
                Some(vehicle) => ui.label(
                    egui::RichText::new(format!(
                        "Last update {}",
                        vehicle.last_update.format("%H:%M:%S%.3f")
                    ))
                    .monospace(),
                ),
                None => {
                    ui.colored_label(Color32::from_rgb(255, 100, 100), "Vehicle left the fleet")
                }
            };
        });
    });
    ui.separator();

    let Some(container) = tree.node(set.container) else {
        ui.label("Panel container is gone");
        return;
    };

    ui.horizontal_wrapped(|ui| {
        for child in &container.children {
            let Some(slot) = tree.node(*child) else {
                continue;
            };
            if let Some(gauge) = set.analog.iter().find(|g| g.target == slot.id) {
                gauges::draw_gauge(ui, gauge);
            } else if slot.has_class(GPS_CLASS) {
                render_readouts(ui, tree, &slot.children);
            }
        }
    });
}

fn render_readouts(ui: &mut egui::Ui, tree: &ViewTree, icons: &[NodeHandle]) {
    ui.vertical(|ui| {
        for handle in icons {
            if let Some(icon) = tree.node(*handle)
                && icon.has_class(READOUT_ICON_CLASS)
            {
                render_readout(ui, tree, icon);
                ui.add_space(3.0);
            }
        }
    });
}

fn render_readout(ui: &mut egui::Ui, tree: &ViewTree, icon: &Node) {
    let mut color = Color32::GRAY;
    let mut tooltip = String::new();
    let mut text = "";
    for node in icon.children.iter().filter_map(|h| tree.node(*h)) {
        match &node.kind {
            NodeKind::Image {
                color_hint,
                image_path,
            } => {
                color = hint_color(color_hint);
                tooltip = image_path.clone();
            }
            NodeKind::Text { text: value } => text = value.as_str(),
            NodeKind::Container => {}
        }
    }
    let label = icon.id.split("_icon_").next().unwrap_or_default();

    egui::Frame::none()
        .inner_margin(egui::Margin::symmetric(6.0, 4.0))
        .fill(Color32::from_rgb(30, 30, 30))
        .rounding(egui::Rounding::same(4.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("●").color(color))
                    .on_hover_text(tooltip);
                ui.label(egui::RichText::new(format!("{label}: {text}")).monospace());
            });
        });
}

/// Color hints are CSS color names
fn hint_color(hint: &str) -> Color32 {
    match hint {
        "red" => Color32::from_rgb(255, 100, 100),
        "green" => Color32::from_rgb(100, 255, 100),
        "blue" => Color32::from_rgb(100, 100, 255),
        "yellow" => Color32::YELLOW,
        "white" => Color32::WHITE,
        _ => Color32::GRAY,
    }
}
