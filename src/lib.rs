//! Resume match dashboard client for the AI Resume Insight service

pub mod cli;
pub mod core;
pub mod dashboard;
pub mod error;
pub mod tui;
pub mod types;
pub mod utils;

pub use crate::core::{AnalysisBackend, ConfigManager, ServiceClient};
pub use crate::dashboard::{Dashboard, ThemeContext};
pub use crate::error::DashboardError;
