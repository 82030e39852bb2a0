// src/dashboard/report.rs
//! Presentation models shared by the terminal UI and the one-shot CLI

use chrono::Local;

use crate::types::{AnalysisResult, HistoryRecord};
use crate::utils;

use super::POSITIVE_SCORE;

const EXCERPT_CHARS: usize = 48;
pub const REPORT_LINK_LABEL: &str = "View PDF ↗";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Positive,
    Negative,
}

impl Badge {
    pub fn for_score(score: u8) -> Self {
        if score >= POSITIVE_SCORE {
            Badge::Positive
        } else {
            Badge::Negative
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Badge::Positive => "green",
            Badge::Negative => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub date: String,
    pub score: String,
    pub badge: Badge,
    pub excerpt: String,
    pub report_url: Option<String>,
}

/// One row per record, in the order received
pub fn history_rows(records: &[HistoryRecord]) -> Vec<HistoryRow> {
    records
        .iter()
        .map(|record| HistoryRow {
            date: record
                .date
                .with_timezone(&Local)
                .format("%Y-%m-%d")
                .to_string(),
            score: format!("{}%", record.score),
            badge: Badge::for_score(record.score),
            excerpt: utils::truncate(&record.job_description_excerpt, EXCERPT_CHARS),
            report_url: record.report_url.clone(),
        })
        .collect()
}

/// Plain-text history table for the CLI
pub fn format_history_table(records: &[HistoryRecord]) -> String {
    if records.is_empty() {
        return "No saved reports.".to_string();
    }

    let mut out = format!(
        "{:<12} {:<7} {:<50} {}\n{}\n",
        "Date",
        "Score",
        "Job Description",
        "Resume",
        "-".repeat(90)
    );
    for row in history_rows(records) {
        let marker = match row.badge {
            Badge::Positive => "✔",
            Badge::Negative => "✘",
        };
        out.push_str(&format!(
            "{:<12} {:<7} {:<50} {}\n",
            row.date,
            format!("{} {}", marker, row.score),
            row.excerpt,
            row.report_url.as_deref().unwrap_or("-")
        ));
    }
    out
}

/// Plain-text result card for the CLI
pub fn format_result(result: &AnalysisResult) -> String {
    let verdict = match Badge::for_score(result.match_percentage) {
        Badge::Positive => "strong",
        Badge::Negative => "weak",
    };

    let mut out = format!(
        "Match: {}% ({})\n\n📝 Summary\n{}\n\n⚠️ Missing Skills\n",
        result.match_percentage, verdict, result.summary
    );
    if result.missing_keywords.is_empty() {
        out.push_str("(none)\n");
    } else {
        out.push_str(
            &result
                .missing_keywords
                .iter()
                .map(|k| format!("[{}]", k))
                .collect::<Vec<_>>()
                .join(" "),
        );
        out.push('\n');
    }
    out
}
