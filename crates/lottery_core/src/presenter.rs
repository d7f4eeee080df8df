//! Display state for the ball row and the draw cycle that drives it.
//!
//! One cycle is `Idle -> Pending -> (Success | Failure) -> Idle`. The
//! presenter only holds state; views read it every frame.

use crate::draw::{DrawResult, BALL_COUNT};
use crate::error::DrawError;

/// Number shown on a ball that has no value yet.
pub const PLACEHOLDER_NUMBER: u32 = 0;

pub const ALERT_TITLE: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPhase {
    Idle,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Success,
    Failure,
}

/// A modal, dismissible error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawAlert {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DrawPresenter {
    numbers: Vec<u32>,
    phase: DrawPhase,
    activity_visible: bool,
    alert: Option<DrawAlert>,
    last_outcome: Option<DrawOutcome>,
    ball_count: usize,
}

impl Default for DrawPresenter {
    fn default() -> Self {
        Self::new(BALL_COUNT)
    }
}

impl DrawPresenter {
    pub fn new(ball_count: usize) -> Self {
        Self {
            numbers: vec![PLACEHOLDER_NUMBER; ball_count],
            phase: DrawPhase::Idle,
            activity_visible: false,
            alert: None,
            last_outcome: None,
            ball_count,
        }
    }

    /// Presenter already showing `initial`, e.g. a local draw at startup.
    pub fn with_numbers(initial: DrawResult) -> Self {
        let mut presenter = Self::new(initial.len());
        presenter.numbers = initial.sorted().into_numbers();
        presenter
    }

    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == DrawPhase::Pending
    }

    pub fn activity_visible(&self) -> bool {
        self.activity_visible
    }

    pub fn alert(&self) -> Option<&DrawAlert> {
        self.alert.as_ref()
    }

    pub fn last_outcome(&self) -> Option<DrawOutcome> {
        self.last_outcome
    }

    /// Enter Pending: clear the balls to placeholders and show activity.
    ///
    /// Returns `false` and changes nothing if a draw is already pending.
    pub fn on_start(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        self.phase = DrawPhase::Pending;
        self.numbers = vec![PLACEHOLDER_NUMBER; self.ball_count];
        self.activity_visible = true;
        self.alert = None;
        true
    }

    /// Show `result` sorted ascending. Ignored unless a draw is pending.
    pub fn on_success(&mut self, result: DrawResult) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.numbers = result.sorted().into_numbers();
        self.ball_count = self.numbers.len();
        self.finish(DrawOutcome::Success);
        true
    }

    /// Raise an alert for `error`. The balls stay cleared from `on_start`.
    pub fn on_failure(&mut self, error: &DrawError) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.alert = Some(DrawAlert {
            title: ALERT_TITLE.to_string(),
            message: error.to_string(),
        });
        self.finish(DrawOutcome::Failure);
        true
    }

    pub fn apply(&mut self, result: Result<DrawResult, DrawError>) -> bool {
        match result {
            Ok(result) => self.on_success(result),
            Err(error) => self.on_failure(&error),
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn finish(&mut self, outcome: DrawOutcome) {
        self.phase = DrawPhase::Idle;
        self.activity_visible = false;
        self.last_outcome = Some(outcome);
    }
}
