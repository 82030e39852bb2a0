// src/dashboard/theme.rs
//! Theme preference and the context handed to the render root

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// The `data-theme` attribute: set to "dark", absent for light
    pub fn data_theme(&self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some("dark"),
        }
    }

    /// Label of the button that switches away from this theme
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Self::Light => "🌙 Dark Mode",
            Self::Dark => "☀️ Light Mode",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Self::Light => Palette::LIGHT,
            Self::Dark => Palette::DARK,
        }
    }
}

/// Colours every widget draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: Color::Rgb(243, 244, 246),
        surface: Color::Rgb(255, 255, 255),
        text: Color::Rgb(17, 24, 39),
        muted: Color::Rgb(107, 114, 128),
        border: Color::Rgb(229, 231, 235),
        accent: Color::Rgb(79, 70, 229),
        positive: Color::Rgb(34, 197, 94),
        negative: Color::Rgb(239, 68, 68),
    };

    pub const DARK: Palette = Palette {
        background: Color::Rgb(15, 23, 42),
        surface: Color::Rgb(30, 41, 59),
        text: Color::Rgb(241, 245, 249),
        muted: Color::Rgb(148, 163, 184),
        border: Color::Rgb(51, 65, 85),
        accent: Color::Rgb(129, 140, 248),
        positive: Color::Rgb(34, 197, 94),
        negative: Color::Rgb(239, 68, 68),
    };

    pub fn base(&self) -> Style {
        Style::new().fg(self.text).bg(self.background)
    }

    pub fn card(&self) -> Style {
        Style::new().fg(self.text).bg(self.surface)
    }

    pub fn border(&self) -> Style {
        Style::new().fg(self.border)
    }

    pub fn muted(&self) -> Style {
        Style::new().fg(self.muted)
    }

    pub fn highlight(&self) -> Style {
        Style::new()
            .fg(self.surface)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn score(&self, score: u8) -> Style {
        if score >= crate::dashboard::POSITIVE_SCORE {
            Style::new().fg(self.positive)
        } else {
            Style::new().fg(self.negative)
        }
    }
}

/// Process-wide theme: read once from storage, written on every toggle
#[derive(Debug, Clone)]
pub struct ThemeContext {
    preference: ThemePreference,
    store: PreferenceStore,
}

impl ThemeContext {
    pub fn init(store: PreferenceStore) -> Self {
        let preference = store.load_theme().unwrap_or_default();
        info!("Theme initialised: {}", preference.as_str());
        Self { preference, store }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn data_theme(&self) -> Option<&'static str> {
        self.preference.data_theme()
    }

    pub fn palette(&self) -> Palette {
        self.preference.palette()
    }

    /// Flip the theme and persist it. Storage failures are logged, never raised.
    pub fn toggle(&mut self) -> ThemePreference {
        self.preference = self.preference.toggled();

        if let Err(e) = self.store.save_theme(self.preference) {
            warn!("Failed to persist theme preference: {:#}", e);
        }

        self.preference
    }
}
