//! Runs draws off the owning thread and hands completions back to it.
//!
//! Each draw runs on its own worker thread and reports over an `mpsc`
//! channel. Nothing touches the presenter until the owner calls
//! [`DrawDispatcher::drain`] or [`DrawDispatcher::wait`], so the owning
//! thread is the only place display state changes. At most one draw is in
//! flight; requests made meanwhile are ignored.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use crate::draw::{DrawRequest, DrawResult};
use crate::error::DrawError;
use crate::presenter::DrawPresenter;
use crate::service::RandomService;

/// Called from the worker after a completion is queued (e.g. to wake a UI).
pub type Waker = Arc<dyn Fn() + Send + Sync>;

pub struct DrawCompletion {
    pub ticket: u64,
    pub result: Result<DrawResult, DrawError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Started(u64),
    AlreadyInFlight,
}

pub struct DrawDispatcher {
    service: Arc<dyn RandomService>,
    sender: Sender<DrawCompletion>,
    receiver: Receiver<DrawCompletion>,
    inflight: Option<u64>,
    next_ticket: u64,
    waker: Option<Waker>,
}

impl DrawDispatcher {
    pub fn new(service: Arc<dyn RandomService>) -> Self {
        let (sender, receiver) = std::sync::mpsc::channel();
        Self {
            service,
            sender,
            receiver,
            inflight: None,
            next_ticket: 1,
            waker: None,
        }
    }

    pub fn with_waker<F>(mut self, waker: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.waker = Some(Arc::new(waker));
        self
    }

    pub fn service_name(&self) -> &str {
        self.service.describe()
    }

    pub fn is_in_flight(&self) -> bool {
        self.inflight.is_some()
    }

    /// Start a draw unless one is already running.
    pub fn request(&mut self, presenter: &mut DrawPresenter, request: DrawRequest) -> DispatchOutcome {
        if self.inflight.is_some() || !presenter.on_start() {
            return DispatchOutcome::AlreadyInFlight;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.inflight = Some(ticket);

        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();
        let waker = self.waker.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("draw-{ticket}"))
            .spawn(move || {
                // A panicking service still has to complete the ticket, or the
                // presenter would stay pending for good.
                let result = panic::catch_unwind(AssertUnwindSafe(|| service.request_draw(&request)))
                    .unwrap_or_else(|payload| Err(DrawError::Aborted(panic_message(payload.as_ref()))));
                let _ = sender.send(DrawCompletion { ticket, result });
                if let Some(waker) = waker {
                    waker();
                }
            });

        if let Err(err) = spawned {
            let _ = self.sender.send(DrawCompletion {
                ticket,
                result: Err(DrawError::Aborted(format!("failed to start draw worker: {err}"))),
            });
        }

        DispatchOutcome::Started(ticket)
    }

    /// Apply every completion that has arrived. Returns how many were applied.
    pub fn drain(&mut self, presenter: &mut DrawPresenter) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.receiver.try_recv() {
            if self.apply(presenter, completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Block up to `timeout` for the in-flight draw and apply it.
    ///
    /// Returns `false` if nothing was in flight or the wait timed out; the
    /// draw stays pending in the latter case.
    pub fn wait(&mut self, presenter: &mut DrawPresenter, timeout: Duration) -> bool {
        while self.inflight.is_some() {
            match self.receiver.recv_timeout(timeout) {
                Ok(completion) => {
                    if self.apply(presenter, completion) {
                        return true;
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return false
                }
            }
        }
        false
    }

    fn apply(&mut self, presenter: &mut DrawPresenter, completion: DrawCompletion) -> bool {
        if self.inflight != Some(completion.ticket) {
            return false;
        }
        self.inflight = None;
        presenter.apply(completion.result)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("draw worker panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("draw worker panicked: {message}")
    } else {
        "draw worker panicked".to_string()
    }
}
