// src/types/analysis.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::DashboardError;
use crate::utils;

/// Extensions offered by the browse dialog. Advisory only.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const FALLBACK_MIME: &str = "application/octet-stream";

/// A resume picked through the browse prompt or dropped onto the drop zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: &'static str,
}

impl ResumeFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Path has no file name: {}", path.display()))?;

        Ok(Self {
            mime_type: mime_type_for(&file_name),
            path,
            file_name,
        })
    }

    pub fn has_accepted_extension(&self) -> bool {
        utils::has_extension(&self.file_name, ACCEPTED_EXTENSIONS)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn mime_type_for(file_name: &str) -> &'static str {
    match utils::file_extension(file_name).as_deref() {
        Some("pdf") => PDF_MIME,
        Some("docx") => DOCX_MIME,
        _ => FALLBACK_MIME,
    }
}

/// Both inputs of a submission, validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub job_description: String,
    pub resume: ResumeFile,
}

impl AnalysisRequest {
    pub fn new(
        job_description: &str,
        resume: Option<&ResumeFile>,
    ) -> std::result::Result<Self, DashboardError> {
        match resume {
            Some(resume) if !job_description.is_empty() => Ok(Self {
                job_description: job_description.to_string(),
                resume: resume.clone(),
            }),
            _ => Err(DashboardError::MissingInput {
                job_description: job_description.is_empty(),
                resume: resume.is_none(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "crate::types::score::deserialize")]
    pub match_percentage: u8,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
}
