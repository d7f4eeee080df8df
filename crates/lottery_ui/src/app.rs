//! Application state for the lottery window.

use std::sync::Arc;

use eframe::egui;

use lottery_core::config::LotteryConfig;
use lottery_core::dispatch::{DispatchOutcome, DrawDispatcher};
use lottery_core::draw::{DrawRequest, BALL_COUNT, DEFAULT_MAX_NUMBER};
use lottery_core::local::LocalDrawSource;
use lottery_core::presenter::DrawPresenter;
use lottery_core::service::RandomService;

pub struct LotteryApp {
    pub presenter: DrawPresenter,
    pub dispatcher: DrawDispatcher,
    /// Inclusive upper bound chosen with the slider.
    pub max_number: u32,
    /// Shown next to the source name when the remote service is unavailable.
    pub source_notice: Option<String>,
}

impl LotteryApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (service, max_number, source_notice) = select_service();
        let mut app = Self::with_service(ctx, service, max_number);
        app.source_notice = source_notice;
        app
    }

    pub fn with_service(ctx: &egui::Context, service: Arc<dyn RandomService>, max_number: u32) -> Self {
        let repaint = ctx.clone();
        let dispatcher =
            DrawDispatcher::new(service).with_waker(move || repaint.request_repaint());

        Self {
            presenter: initial_presenter(max_number),
            dispatcher,
            max_number,
            source_notice: None,
        }
    }

    /// Button handler: start a draw over `[1, max_number]`.
    pub fn request_new_numbers(&mut self) {
        let request = match DrawRequest::lottery(self.max_number) {
            Ok(request) => request,
            Err(err) => {
                eprintln!("warning: ignoring draw request: {err}");
                return;
            }
        };
        if let DispatchOutcome::AlreadyInFlight = self.dispatcher.request(&mut self.presenter, request) {
            eprintln!("warning: a draw is already in progress");
        }
    }

    /// Apply finished draws; called once per frame on the UI thread.
    pub fn poll_draws(&mut self) {
        self.dispatcher.drain(&mut self.presenter);
    }
}

/// The first balls come from the local generator so the window never opens empty.
fn initial_presenter(max_number: u32) -> DrawPresenter {
    let initial = DrawRequest::lottery(max_number)
        .ok()
        .and_then(|request| LocalDrawSource::from_entropy().draw(&request).ok());
    match initial {
        Some(result) => DrawPresenter::with_numbers(result),
        None => DrawPresenter::new(BALL_COUNT),
    }
}

fn select_service() -> (Arc<dyn RandomService>, u32, Option<String>) {
    let config = match LotteryConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("warning: {err}; numbers will be drawn locally");
            return (
                Arc::new(LocalDrawSource::from_entropy()),
                DEFAULT_MAX_NUMBER,
                Some(err.to_string()),
            );
        }
    };
    remote_service(&config, config.default_max)
}

#[cfg(feature = "https")]
fn remote_service(
    config: &LotteryConfig,
    max_number: u32,
) -> (Arc<dyn RandomService>, u32, Option<String>) {
    use lottery_core::service::RandomOrgService;

    match RandomOrgService::from_config(config) {
        Ok(service) => (Arc::new(service), max_number, None),
        Err(err) => {
            eprintln!("warning: {err}; numbers will be drawn locally");
            (
                Arc::new(LocalDrawSource::from_entropy()),
                max_number,
                Some(err.to_string()),
            )
        }
    }
}

#[cfg(not(feature = "https"))]
fn remote_service(
    _config: &LotteryConfig,
    max_number: u32,
) -> (Arc<dyn RandomService>, u32, Option<String>) {
    let notice = "built without https support".to_string();
    eprintln!("warning: {notice}; numbers will be drawn locally");
    (Arc::new(LocalDrawSource::from_entropy()), max_number, Some(notice))
}
