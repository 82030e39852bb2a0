// src/dashboard/mod.rs
//! Dashboard client: view state, theme, submission flow and result presentation

pub mod animation;
pub mod controller;
pub mod report;
pub mod state;
pub mod theme;

pub use animation::{AnimationPhase, ScoreAnimation, ScoreTicker};
pub use controller::Dashboard;
pub use report::{history_rows, Badge, HistoryRow};
pub use state::{Alert, DashboardState, DragKind, Event, View};
pub use theme::{Palette, ThemeContext, ThemePreference};

/// Scores at or above this are shown as a good match
pub const POSITIVE_SCORE: u8 = 80;
