//! Slider, button and the error dialog.

use eframe::egui::{self, Align2, Vec2};

use lottery_core::draw::{BALL_COUNT, MAX_BALL_NUMBER};

use crate::app::LotteryApp;

/// Render the top bar: upper-bound slider, its value, the draw button and activity.
pub fn render_control_panel(ui: &mut egui::Ui, app: &mut LotteryApp) {
    ui.horizontal(|ui| {
        ui.label("Max number");
        ui.add(
            egui::Slider::new(&mut app.max_number, BALL_COUNT as u32..=MAX_BALL_NUMBER)
                .show_value(false),
        );
        ui.label(app.max_number.to_string());

        ui.separator();

        let can_draw = !app.presenter.is_pending();
        if ui
            .add_enabled(can_draw, egui::Button::new("New numbers"))
            .clicked()
        {
            app.request_new_numbers();
        }
        if app.presenter.activity_visible() {
            ui.spinner();
        }
    });
    ui.horizontal(|ui| {
        ui.small(format!("Source: {}", app.dispatcher.service_name()));
        if let Some(notice) = app.source_notice.as_ref() {
            ui.colored_label(egui::Color32::from_rgb(220, 180, 80), notice.as_str());
        }
    });
}

/// Modal error dialog with a single OK action.
pub fn render_alert(ctx: &egui::Context, app: &mut LotteryApp) {
    let Some(alert) = app.presenter.alert().cloned() else {
        return;
    };
    egui::Window::new(alert.title)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(alert.message.as_str());
            ui.add_space(6.0);
            if ui.button("OK").clicked() {
                app.presenter.dismiss_alert();
            }
        });
}
