// src/error.rs
use thiserror::Error;

/// Failures the dashboard surfaces to the user. `Display` is the alert text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("Please upload a resume and JD.")]
    MissingInput { job_description: bool, resume: bool },

    #[error("An analysis is already running.")]
    SubmissionInFlight,

    #[error("Analysis failed.")]
    AnalysisFailed { reason: String },
}

impl DashboardError {
    /// Whether this failure blocks the UI with an alert
    pub fn is_alert(&self) -> bool {
        !matches!(self, DashboardError::SubmissionInFlight)
    }
}
