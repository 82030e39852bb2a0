// src/dashboard/controller.rs
//! The dashboard controller: owns state, runs effects, talks to the backend

use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::core::AnalysisBackend;
use crate::error::DashboardError;
use crate::types::{AnalysisRequest, ResumeFile};

use super::animation::{AnimationPhase, ScoreTicker};
use super::state::{DashboardState, DragKind, Effect, Event, View};
use super::theme::{ThemeContext, ThemePreference};

/// Network calls and timer ticks run as tasks and come back as `Event`s
/// through one channel, so all state changes happen on the caller's task.
pub struct Dashboard<B: AnalysisBackend> {
    state: DashboardState,
    theme: ThemeContext,
    backend: Arc<B>,
    ticker: ScoreTicker,
    events_tx: UnboundedSender<Event>,
    events_rx: UnboundedReceiver<Event>,
    in_flight: usize,
    history_requests: u64,
}

impl<B: AnalysisBackend> Dashboard<B> {
    pub fn new(backend: Arc<B>, theme: ThemeContext) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: DashboardState::default(),
            theme,
            backend,
            ticker: ScoreTicker::new(),
            events_tx,
            events_rx,
            in_flight: 0,
            history_requests: 0,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn theme(&self) -> &ThemeContext {
        &self.theme
    }

    pub fn select_view(&mut self, view: View) {
        self.dispatch(Event::SelectView(view));
    }

    pub fn toggle_theme(&mut self) -> ThemePreference {
        self.theme.toggle()
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.dispatch(Event::SetJobDescription(text.into()));
    }

    /// Browse-dialog choice. The extension filter only warns.
    pub fn select_file(&mut self, file: ResumeFile) {
        if !file.has_accepted_extension() {
            warn!("Selected resume {} is not a .pdf or .docx", file.file_name);
        }
        self.dispatch(Event::SelectFile(file));
    }

    pub fn drop_file(&mut self, file: ResumeFile) {
        if !file.has_accepted_extension() {
            warn!("Dropped resume {} is not a .pdf or .docx", file.file_name);
        }
        self.dispatch(Event::DropFile(file));
    }

    pub fn handle_drag(&mut self, kind: DragKind) {
        self.dispatch(Event::Drag(kind));
    }

    pub fn dismiss_alert(&mut self) {
        self.dispatch(Event::DismissAlert);
    }

    /// Validate the inputs and send them to the backend.
    ///
    /// Returns once the request is on its way; the outcome arrives later as
    /// an event. Rejected while a previous submission is still loading.
    pub fn submit(&mut self) -> Result<(), DashboardError> {
        if self.state.loading {
            warn!("Submission ignored: an analysis is already running");
            return Err(DashboardError::SubmissionInFlight);
        }

        let request =
            match AnalysisRequest::new(&self.state.job_description, self.state.resume.as_ref()) {
                Ok(request) => request,
                Err(err) => {
                    warn!("Submission rejected: {:?}", err);
                    self.dispatch(Event::ValidationFailed(err.clone()));
                    return Err(err);
                }
            };

        self.dispatch(Event::SubmitStart);
        info!(
            "Submitting {} with a {} character job description",
            request.resume.file_name,
            request.job_description.chars().count()
        );

        let backend = Arc::clone(&self.backend);
        let events = self.events_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let event = match backend.analyze(&request).await {
                Ok(result) => Event::SubmitSuccess(result),
                Err(e) => Event::SubmitFailure(format!("{:#}", e)),
            };
            let _ = events.send(event);
        });

        Ok(())
    }

    /// Re-read the saved reports. Failures are logged, never alerted.
    pub fn refresh_history(&mut self) {
        let backend = Arc::clone(&self.backend);
        let events = self.events_tx.clone();
        self.in_flight += 1;
        self.history_requests += 1;
        let request = self.history_requests;
        tokio::spawn(async move {
            let event = match backend.history().await {
                Ok(records) => Event::HistoryLoaded { request, records },
                Err(e) => Event::HistoryFailed(format!("{:#}", e)),
            };
            let _ = events.send(event);
        });
    }

    /// Next event from a background task. Never `None` while `self` is alive.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }

    pub fn handle(&mut self, event: Event) {
        match &event {
            Event::SubmitSuccess(result) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                info!("Analysis received: {}% match", result.match_percentage);
            }
            Event::SubmitFailure(reason) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                error!("Analysis failed: {}", reason);
            }
            Event::HistoryLoaded { request, records } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                debug!("History fetch {} loaded: {} records", request, records.len());
            }
            Event::HistoryFailed(reason) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                error!("History fetch failed: {}", reason);
            }
            _ => {}
        }

        self.dispatch(event);
    }

    /// No request pending and the score has settled
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0 && self.state.score.phase() == AnimationPhase::Settled
    }

    /// The last submission has an outcome on screen: an alert, or a result
    /// whose score has finished counting. Background history fetches may
    /// still be pending.
    pub fn submission_settled(&self) -> bool {
        if self.state.loading {
            return false;
        }
        self.state.alert.is_some()
            || (self.state.result.is_some()
                && self.state.score.phase() == AnimationPhase::Settled)
    }

    /// Process events until nothing is pending
    pub async fn run_until_idle(&mut self) {
        while !self.is_idle() {
            match self.events_rx.recv().await {
                Some(event) => self.handle(event),
                None => break,
            }
        }
    }

    fn dispatch(&mut self, event: Event) {
        for effect in self.state.apply(event) {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::StartAnimation { generation, target } => {
                self.ticker.start(generation, target, self.events_tx.clone());
            }
            Effect::CancelAnimation => self.ticker.cancel(),
            Effect::RefreshHistory => self.refresh_history(),
        }
    }
}
