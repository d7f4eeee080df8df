use eframe::egui::{self, Align2, Color32, FontId, Pos2, Stroke, Vec2};

use lottery_core::ball::{ball_label, BallColor, BALL_STROKE_WIDTH};

const BALL_SPACING: f32 = 12.0;
const MAX_BALL_DIAMETER: f32 = 96.0;

pub fn ball_fill(number: u32) -> Color32 {
    let [r, g, b] = BallColor::for_number(number).rgb();
    Color32::from_rgb(r, g, b)
}

/// Paint one ball: filled disc, black outline, centered two-digit label.
pub fn draw_ball(painter: &egui::Painter, center: Pos2, diameter: f32, number: u32) {
    // The stroke straddles the outline, so pull the radius in by half its width.
    let radius = (diameter - BALL_STROKE_WIDTH) * 0.5;
    painter.circle(
        center,
        radius,
        ball_fill(number),
        Stroke::new(BALL_STROKE_WIDTH, Color32::BLACK),
    );
    // Label box is the square inscribed in the disc.
    let label_height = radius * std::f32::consts::FRAC_1_SQRT_2 * 2.0;
    painter.text(
        center,
        Align2::CENTER_CENTER,
        ball_label(number),
        FontId::proportional((label_height * 0.6).max(8.0)),
        Color32::BLACK,
    );
}

/// Lay the balls out in a single centered row sized to the available width.
pub fn render_ball_row(ui: &mut egui::Ui, numbers: &[u32]) {
    if numbers.is_empty() {
        return;
    }
    let count = numbers.len() as f32;
    let available = ui.available_width();
    let diameter = ((available - BALL_SPACING * (count - 1.0)) / count)
        .clamp(16.0, MAX_BALL_DIAMETER);
    let row_width = diameter * count + BALL_SPACING * (count - 1.0);

    ui.add_space(8.0);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(available, diameter), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let left = rect.center().x - row_width * 0.5;
    for (idx, &number) in numbers.iter().enumerate() {
        let x = left + diameter * 0.5 + idx as f32 * (diameter + BALL_SPACING);
        draw_ball(&painter, Pos2::new(x, rect.center().y), diameter, number);
    }
}
