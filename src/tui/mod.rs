// src/tui/mod.rs
//! Interactive terminal dashboard

mod input;
pub mod render;

use anyhow::{Context, Result};
use ratatui::crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event as TermEvent};
use ratatui::crossterm::execute;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{error, info};

use crate::core::AnalysisBackend;
use crate::dashboard::{Dashboard, Event};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    EditingJobDescription,
    Browsing { path: String },
}

/// Terminal-only state that the dashboard itself does not track
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub mode: InputMode,
    pub status: Option<String>,
    /// Highlighted row of the saved-reports table
    pub report_cursor: usize,
}

pub struct App<B: AnalysisBackend> {
    pub dashboard: Dashboard<B>,
    pub input: InputState,
    pub should_quit: bool,
}

enum Step {
    Terminal(Option<TermEvent>),
    Dashboard(Option<Event>),
}

impl<B: AnalysisBackend> App<B> {
    pub fn new(dashboard: Dashboard<B>) -> Self {
        Self {
            dashboard,
            input: InputState::default(),
            should_quit: false,
        }
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut terminal_events = spawn_input_reader();

        while !self.should_quit {
            terminal
                .draw(|frame| {
                    render::draw(
                        frame,
                        self.dashboard.state(),
                        self.dashboard.theme(),
                        &self.input,
                    )
                })
                .context("Failed to draw dashboard")?;

            let step = tokio::select! {
                event = terminal_events.recv() => Step::Terminal(event),
                event = self.dashboard.next_event() => Step::Dashboard(event),
            };

            match step {
                Step::Terminal(Some(event)) => self.on_terminal_event(event),
                Step::Terminal(None) => {
                    anyhow::bail!("Terminal input closed unexpectedly");
                }
                Step::Dashboard(Some(event)) => self.dashboard.handle(event),
                Step::Dashboard(None) => self.should_quit = true,
            }
        }

        Ok(())
    }

    fn on_terminal_event(&mut self, event: TermEvent) {
        match event {
            TermEvent::Key(key) => self.on_key(key),
            TermEvent::Paste(text) => self.on_paste(&text),
            _ => {}
        }
    }
}

/// Blocking crossterm reads on a dedicated thread, forwarded to the async loop
fn spawn_input_reader() -> UnboundedReceiver<TermEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(event) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Err(e) => {
                error!("Terminal input failed: {}", e);
                break;
            }
        }
    });
    rx
}

/// Take over the terminal until the user quits
pub async fn run<B: AnalysisBackend>(dashboard: Dashboard<B>) -> Result<()> {
    let mut terminal = ratatui::init();
    if let Err(e) = execute!(std::io::stdout(), EnableBracketedPaste) {
        error!("Bracketed paste unavailable, file drops will arrive as keystrokes: {}", e);
    }

    let mut app = App::new(dashboard);
    app.dashboard.refresh_history();
    info!("Dashboard opened");

    let result = app.event_loop(&mut terminal).await;

    let _ = execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();
    info!("Dashboard closed");
    result
}
