// src/tui/input.rs
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::core::AnalysisBackend;
use crate::dashboard::{DragKind, View};
use crate::error::DashboardError;
use crate::types::ResumeFile;
use crate::utils;

use super::{App, InputMode};

impl<B: AnalysisBackend> App<B> {
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Alerts block everything until acknowledged
        if self.dashboard.state().alert.is_some() {
            self.dashboard.dismiss_alert();
            return;
        }

        match std::mem::take(&mut self.input.mode) {
            InputMode::Normal => self.on_normal_key(key),
            InputMode::EditingJobDescription => self.on_editing_key(key),
            InputMode::Browsing { path } => self.on_browsing_key(key, path),
        }
    }

    fn on_normal_key(&mut self, key: KeyEvent) {
        self.input.status = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('1') | KeyCode::Char('d') => self.dashboard.select_view(View::Dashboard),
            KeyCode::Char('2') | KeyCode::Char('h') => self.dashboard.select_view(View::History),
            KeyCode::Tab => {
                let next = self.dashboard.state().view.other();
                self.dashboard.select_view(next);
            }
            KeyCode::Char('t') => {
                let theme = self.dashboard.toggle_theme();
                debug!("Theme toggled to {}", theme.as_str());
            }
            KeyCode::Char('e') => {
                self.dashboard.select_view(View::Dashboard);
                self.input.mode = InputMode::EditingJobDescription;
            }
            KeyCode::Char('o') => {
                self.dashboard.select_view(View::Dashboard);
                self.input.mode = InputMode::Browsing {
                    path: String::new(),
                };
            }
            KeyCode::Enter | KeyCode::Char('s') => {
                self.dashboard.select_view(View::Dashboard);
                if let Err(DashboardError::SubmissionInFlight) = self.dashboard.submit() {
                    self.input.status = Some(DashboardError::SubmissionInFlight.to_string());
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.dashboard.state().history.len().saturating_sub(1);
                self.input.report_cursor = (self.input.report_cursor + 1).min(last);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.input.report_cursor = self.input.report_cursor.saturating_sub(1);
            }
            KeyCode::Char('r') => {
                self.dashboard.refresh_history();
                self.input.status = Some("Refreshing saved reports...".to_string());
            }
            _ => {}
        }
    }

    fn on_editing_key(&mut self, key: KeyEvent) {
        let mut text = self.dashboard.state().job_description.clone();

        match key.code {
            KeyCode::Esc => return,
            KeyCode::Enter => text.push('\n'),
            KeyCode::Tab => text.push('\t'),
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(c) => text.push(c),
            _ => {}
        }

        self.dashboard.set_job_description(text);
        self.input.mode = InputMode::EditingJobDescription;
    }

    fn on_browsing_key(&mut self, key: KeyEvent, mut path: String) {
        match key.code {
            KeyCode::Esc => return,
            KeyCode::Enter => {
                if self.choose_file(&path) {
                    return;
                }
            }
            KeyCode::Backspace => {
                path.pop();
            }
            KeyCode::Char(c) => path.push(c),
            _ => {}
        }

        self.input.mode = InputMode::Browsing { path };
    }

    /// Browse-prompt confirmation. Returns false to keep the prompt open.
    fn choose_file(&mut self, typed: &str) -> bool {
        let Some(file) = existing_resume(typed) else {
            self.input.status = Some(format!("No such file: {}", typed.trim()));
            return false;
        };

        self.input.status = (!file.has_accepted_extension())
            .then(|| format!("{} is not a .pdf or .docx; sending it anyway", file.file_name));
        self.dashboard.select_file(file);
        true
    }

    /// Terminals paste the path of a file dropped on them
    pub fn on_paste(&mut self, text: &str) {
        match &mut self.input.mode {
            InputMode::EditingJobDescription => {
                let mut jd = self.dashboard.state().job_description.clone();
                jd.push_str(text);
                self.dashboard.set_job_description(jd);
            }
            InputMode::Browsing { path } => path.push_str(text.trim()),
            InputMode::Normal => {
                self.dashboard.handle_drag(DragKind::Enter);
                match existing_resume(text) {
                    Some(file) => {
                        self.input.status = None;
                        self.dashboard.select_view(View::Dashboard);
                        self.dashboard.drop_file(file);
                    }
                    None => {
                        self.dashboard.handle_drag(DragKind::Leave);
                        self.input.status = Some("Dropped text is not a file".to_string());
                    }
                }
            }
        }
    }
}

fn existing_resume(text: &str) -> Option<ResumeFile> {
    let path = utils::parse_dropped_path(text)?;
    if !path.is_file() {
        return None;
    }
    ResumeFile::from_path(path).ok()
}
