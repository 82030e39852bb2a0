// src/dashboard/state.rs
//! Dashboard state and its transition function

use crate::error::DashboardError;
use crate::types::{AnalysisResult, HistoryRecord, ResumeFile};

use super::animation::ScoreAnimation;

pub const DEFAULT_FILE_LABEL: &str = "Drag & Drop or Click to Upload";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    History,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "New Analysis",
            View::History => "Historical Reports",
        }
    }

    pub fn menu_label(&self) -> &'static str {
        match self {
            View::Dashboard => "📊 Dashboard",
            View::History => "🗂️ Saved Reports",
        }
    }

    pub fn other(&self) -> View {
        match self {
            View::Dashboard => View::History,
            View::History => View::Dashboard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Enter,
    Over,
    Leave,
}

/// Blocking message shown over the dashboard until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

impl From<&DashboardError> for Alert {
    fn from(err: &DashboardError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    SelectView(View),
    SetJobDescription(String),
    SelectFile(ResumeFile),
    Drag(DragKind),
    DropFile(ResumeFile),
    ValidationFailed(DashboardError),
    SubmitStart,
    SubmitSuccess(AnalysisResult),
    SubmitFailure(String),
    /// `request` numbers fetches in the order they were started
    HistoryLoaded {
        request: u64,
        records: Vec<HistoryRecord>,
    },
    HistoryFailed(String),
    ScoreTick { generation: u64, value: u8 },
    DismissAlert,
}

/// Work the controller performs after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartAnimation { generation: u64, target: u8 },
    CancelAnimation,
    RefreshHistory,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub view: View,
    pub job_description: String,
    pub resume: Option<ResumeFile>,
    pub file_label: String,
    pub drag_active: bool,
    pub loading: bool,
    pub result: Option<AnalysisResult>,
    pub score: ScoreAnimation,
    pub history: Vec<HistoryRecord>,
    /// Request number of the fetch `history` came from
    pub history_request: u64,
    pub alert: Option<Alert>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            view: View::default(),
            job_description: String::new(),
            resume: None,
            file_label: DEFAULT_FILE_LABEL.to_string(),
            drag_active: false,
            loading: false,
            result: None,
            score: ScoreAnimation::default(),
            history: Vec::new(),
            history_request: 0,
            alert: None,
        }
    }
}

impl DashboardState {
    /// Apply one event. Pure apart from `self`; side effects are returned.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SelectView(view) => {
                self.view = view;
                vec![]
            }
            Event::SetJobDescription(text) => {
                self.job_description = text;
                vec![]
            }
            Event::SelectFile(file) => {
                self.select_file(file);
                vec![]
            }
            Event::Drag(kind) => {
                self.drag_active = matches!(kind, DragKind::Enter | DragKind::Over);
                vec![]
            }
            Event::DropFile(file) => {
                self.drag_active = false;
                self.select_file(file);
                vec![]
            }
            Event::ValidationFailed(err) => {
                self.alert = Some(Alert::from(&err));
                vec![]
            }
            Event::SubmitStart => {
                self.result = None;
                self.score.reset();
                self.loading = true;
                vec![Effect::CancelAnimation]
            }
            Event::SubmitSuccess(result) => {
                let target = result.match_percentage;
                let generation = self.score.restart(target);
                self.result = Some(result);
                self.loading = false;
                vec![
                    Effect::StartAnimation { generation, target },
                    Effect::RefreshHistory,
                ]
            }
            Event::SubmitFailure(reason) => {
                let err = DashboardError::AnalysisFailed { reason };
                self.alert = Some(Alert::from(&err));
                self.loading = false;
                vec![]
            }
            Event::HistoryLoaded { request, records } => {
                // A fetch started earlier than the one on screen is stale
                if request >= self.history_request {
                    self.history_request = request;
                    self.history = records;
                }
                vec![]
            }
            // Logged by the controller; the previous list stays on screen
            Event::HistoryFailed(_) => vec![],
            Event::ScoreTick { generation, value } => {
                self.score.apply_tick(generation, value);
                vec![]
            }
            Event::DismissAlert => {
                self.alert = None;
                vec![]
            }
        }
    }

    fn select_file(&mut self, file: ResumeFile) {
        self.file_label = file.file_name.clone();
        self.resume = Some(file);
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Analyzing..."
        } else {
            "Run Analysis"
        }
    }
}
