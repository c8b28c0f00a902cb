//! egui painters for the five flight instruments.
//!
//! Angles are in degrees, clockwise from twelve o'clock.

use bevy_egui::egui::{self, Align2, Color32, FontId, Pos2, Shape, Stroke, Vec2, vec2};

use crate::instruments::{Gauge, InstrumentKind, PITCH_BOUND};

/// Below this a gauge is unreadable, so it is drawn at this size instead
const MIN_GAUGE_SIZE: f32 = 32.0;

const BOX_FILL: Color32 = Color32::from_rgb(35, 35, 35);
const FACE: Color32 = Color32::from_rgb(20, 20, 20);
const SKY: Color32 = Color32::from_rgb(60, 130, 200);
const GROUND: Color32 = Color32::from_rgb(140, 90, 40);
const MARKING: Color32 = Color32::from_rgb(230, 230, 230);
const SYMBOL: Color32 = Color32::from_rgb(255, 200, 60);

/// Allocates a square of the gauge's size and paints the instrument into it
pub fn draw_gauge(ui: &mut egui::Ui, gauge: &Gauge) {
    let side = gauge_side(gauge);
    let (response, painter) = ui.allocate_painter(vec2(side, side), egui::Sense::hover());
    let rect = response.rect;
    let painter = painter.with_clip_rect(rect);

    let background = if gauge.box_visible {
        painter.rect_filled(rect, 4.0, BOX_FILL);
        BOX_FILL
    } else {
        ui.visuals().panel_fill
    };

    let dial = Dial {
        center: rect.center(),
        radius: side * 0.42,
    };
    match gauge.kind {
        InstrumentKind::Attitude => draw_attitude(&painter, &dial, gauge, background),
        InstrumentKind::Heading => draw_heading(&painter, &dial, gauge),
        InstrumentKind::Airspeed => draw_airspeed(&painter, &dial, gauge),
        InstrumentKind::Altimeter => draw_altimeter(&painter, &dial, gauge),
        InstrumentKind::Variometer => draw_variometer(&painter, &dial, gauge),
    }

    response.on_hover_text(gauge.kind.as_str());
}

struct Dial {
    center: Pos2,
    radius: f32,
}

impl Dial {
    fn point(&self, angle: f32, fraction: f32) -> Pos2 {
        self.center + direction(angle) * self.radius * fraction
    }

    fn font(&self, fraction: f32) -> FontId {
        FontId::proportional((self.radius * fraction).max(6.0))
    }

    fn face(&self, painter: &egui::Painter) {
        painter.circle_filled(self.center, self.radius, FACE);
        painter.circle_stroke(self.center, self.radius, Stroke::new(2.0, MARKING));
    }

    fn ticks(&self, painter: &egui::Painter, from: f32, to: f32, count: usize) {
        for i in 0..=count {
            let angle = from + (to - from) * i as f32 / count as f32;
            painter.line_segment(
                [self.point(angle, 0.82), self.point(angle, 0.95)],
                Stroke::new(1.5, MARKING),
            );
        }
    }

    fn needle(&self, painter: &egui::Painter, angle: f32, length: f32, width: f32) {
        painter.line_segment(
            [self.center, self.point(angle, length)],
            Stroke::new(width, MARKING),
        );
        painter.circle_filled(self.center, width * 1.5, MARKING);
    }

    fn caption(&self, painter: &egui::Painter, offset: f32, text: impl ToString) {
        painter.text(
            self.center + vec2(0.0, self.radius * offset),
            Align2::CENTER_CENTER,
            text,
            self.font(0.18),
            MARKING,
        );
    }
}

fn direction(angle: f32) -> Vec2 {
    let radians = angle.to_radians();
    vec2(radians.sin(), -radians.cos())
}

pub fn airspeed_angle(knots: f64) -> f32 {
    (knots * 2.0) as f32
}

/// Long needle for hundreds of feet, short needle for thousands
pub fn altimeter_angles(feet: f64) -> (f32, f32) {
    let hundreds = feet.rem_euclid(1000.0) * 0.36;
    let thousands = feet.rem_euclid(10_000.0) * 0.036;
    (hundreds as f32, thousands as f32)
}

/// Zero climb points at nine o'clock, full scale sweeps a quarter turn
pub fn vario_angle(vario: f64) -> f32 {
    (-90.0 + vario * 90.0) as f32
}

fn draw_attitude(painter: &egui::Painter, dial: &Dial, gauge: &Gauge, background: Color32) {
    let r = dial.radius;
    painter.circle_filled(dial.center, r, SKY);

    let roll = -(gauge.roll as f32);
    let along = direction(roll + 90.0);
    let down = direction(roll + 180.0);
    let horizon = dial.center + down * (gauge.display_pitch() / PITCH_BOUND) as f32 * r * 0.5;
    let reach = r * 2.0;
    painter.add(Shape::convex_polygon(
        vec![
            horizon - along * reach,
            horizon + along * reach,
            horizon + along * reach + down * reach,
            horizon - along * reach + down * reach,
        ],
        GROUND,
        Stroke::NONE,
    ));
    painter.line_segment(
        [horizon - along * reach, horizon + along * reach],
        Stroke::new(2.0, MARKING),
    );

    // Mask the ground polygon outside the dial
    painter.circle_stroke(dial.center, r * 1.25, Stroke::new(r * 0.5, background));
    painter.circle_stroke(dial.center, r, Stroke::new(2.0, MARKING));

    let wing = Stroke::new(3.0, SYMBOL);
    painter.line_segment(
        [dial.center - vec2(r * 0.55, 0.0), dial.center - vec2(r * 0.15, 0.0)],
        wing,
    );
    painter.line_segment(
        [dial.center + vec2(r * 0.15, 0.0), dial.center + vec2(r * 0.55, 0.0)],
        wing,
    );
    painter.circle_filled(dial.center, 3.0, SYMBOL);
}

fn draw_heading(painter: &egui::Painter, dial: &Dial, gauge: &Gauge) {
    dial.face(painter);
    let heading = gauge.heading.rem_euclid(360.0) as f32;

    for bearing in (0..360).step_by(30) {
        let angle = bearing as f32 - heading;
        painter.line_segment(
            [dial.point(angle, 0.85), dial.point(angle, 0.95)],
            Stroke::new(1.5, MARKING),
        );
        let label = match bearing {
            0 => "N".to_string(),
            90 => "E".to_string(),
            180 => "S".to_string(),
            270 => "W".to_string(),
            b => (b / 10).to_string(),
        };
        painter.text(
            dial.point(angle, 0.68),
            Align2::CENTER_CENTER,
            label,
            dial.font(0.18),
            MARKING,
        );
    }

    // Lubber line
    let apex = dial.point(0.0, 0.75);
    let base = dial.point(0.0, 0.95);
    painter.add(Shape::convex_polygon(
        vec![apex, base + vec2(6.0, 0.0), base - vec2(6.0, 0.0)],
        SYMBOL,
        Stroke::NONE,
    ));
    dial.caption(painter, 0.0, format!("{heading:03.0}°"));
}

fn draw_airspeed(painter: &egui::Painter, dial: &Dial, gauge: &Gauge) {
    dial.face(painter);
    let max = airspeed_angle(160.0);
    dial.ticks(painter, 0.0, max, 16);
    dial.needle(painter, airspeed_angle(gauge.display_air_speed()), 0.8, 2.5);
    dial.caption(painter, 0.45, format!("{:.0} kt", gauge.air_speed));
}

fn draw_altimeter(painter: &egui::Painter, dial: &Dial, gauge: &Gauge) {
    dial.face(painter);
    dial.ticks(painter, 0.0, 324.0, 9);
    let (hundreds, thousands) = altimeter_angles(gauge.altitude);
    dial.needle(painter, thousands, 0.5, 4.0);
    dial.needle(painter, hundreds, 0.85, 2.0);
    dial.caption(painter, 0.4, format!("{:.0} ft", gauge.altitude));
    dial.caption(painter, -0.4, format!("{:.0} hPa", gauge.display_pressure()));
}

fn draw_variometer(painter: &egui::Painter, dial: &Dial, gauge: &Gauge) {
    dial.face(painter);
    dial.ticks(painter, vario_angle(-2.0), vario_angle(2.0), 8);
    dial.needle(painter, vario_angle(gauge.display_vario()), 0.8, 2.5);
    dial.caption(painter, 0.45, format!("{:+.1}", gauge.display_vario()));
}

/// Edge length the gauge is painted at
pub fn gauge_side(gauge: &Gauge) -> f32 {
    (gauge.size as f32).max(MIN_GAUGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airspeed_needle_sweeps_two_degrees_per_knot() {
        assert_eq!(airspeed_angle(0.0), 0.0);
        assert_eq!(airspeed_angle(90.0), 180.0);
    }

    #[test]
    fn altimeter_needles_wrap() {
        let (hundreds, thousands) = altimeter_angles(2500.0);
        assert!((hundreds - 180.0).abs() < 1e-3);
        assert!((thousands - 90.0).abs() < 1e-3);
        assert_eq!(altimeter_angles(0.0), (0.0, 0.0));
    }

    #[test]
    fn level_vario_points_left() {
        assert_eq!(vario_angle(0.0), -90.0);
        assert_eq!(vario_angle(1.0), 0.0);
    }

    #[test]
    fn tiny_gauges_keep_a_readable_size() {
        let mut gauge = Gauge {
            target: "airspeed_1".into(),
            kind: InstrumentKind::Airspeed,
            size: 0,
            box_visible: true,
            image_directory: String::new(),
            roll: 0.0,
            pitch: 0.0,
            heading: 0.0,
            air_speed: 0.0,
            altitude: 0.0,
            vario: 0.0,
            pressure: 1013.25,
        };
        assert_eq!(gauge_side(&gauge), MIN_GAUGE_SIZE);
        gauge.size = 89;
        assert_eq!(gauge_side(&gauge), 89.0);
    }
}
