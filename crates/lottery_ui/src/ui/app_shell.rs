use eframe::egui;

use crate::app::LotteryApp;
use crate::ui::controls::{render_alert, render_control_panel};
use crate::ui::rendering::render_ball_row;

pub fn run() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 260.0])
            .with_min_inner_size([360.0, 180.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Random Lottery",
        options,
        Box::new(|cc| Ok(Box::new(LotteryApp::new(&cc.egui_ctx)))),
    )
}

impl eframe::App for LotteryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_draws();

        let modal_open = self.presenter.alert().is_some();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| {
                render_control_panel(ui, self);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            render_ball_row(ui, self.presenter.numbers());
        });

        render_alert(ctx, self);
    }
}
