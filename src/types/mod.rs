// src/types/mod.rs
//! Wire and domain types shared by the dashboard and the service client

pub mod analysis;
pub mod history;
pub mod response;
pub mod score;

pub use analysis::{AnalysisRequest, AnalysisResult, ResumeFile};
pub use history::HistoryRecord;
pub use response::{AnalyzeResponse, ErrorResponse};
