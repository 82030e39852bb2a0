// src/types/response.rs
use serde::{Deserialize, Serialize};

use crate::types::analysis::AnalysisResult;

// ===== Service Response Types =====

/// Envelope returned by `POST /analyze`
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub message: Option<String>,
    pub data: AnalysisResult,
    pub url: Option<String>,
}

/// Body sent by the backend alongside 4xx/5xx statuses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// Extract the backend message from an error body, falling back to the raw text
    pub fn message_from(body: &str) -> String {
        serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| body.trim().to_string())
    }
}
