// src/tui/render.rs
//! Drawing. Every colour comes from the theme context's palette.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, BorderType, Cell, Clear, Gauge, Paragraph, Row, Table, TableState, Wrap,
};
use ratatui::Frame;

use crate::dashboard::report::REPORT_LINK_LABEL;
use crate::dashboard::{
    history_rows, Alert, Badge, DashboardState, Palette, ThemeContext, View,
};

use super::{InputMode, InputState};

const SIDEBAR_WIDTH: u16 = 26;
const JD_PLACEHOLDER: &str = "Paste job description here...";
const KEY_HINTS: &str =
    "1/2 views · e edit JD · o browse · drop a file to upload · Enter analyze · j/k select report · r refresh · t theme · q quit";

pub fn draw(frame: &mut Frame, state: &DashboardState, theme: &ThemeContext, input: &InputState) {
    let palette = theme.palette();
    let area = frame.area();
    frame.render_widget(Block::new().style(palette.base()), area);

    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)]).areas(area);
    draw_sidebar(frame, sidebar, state.view, &palette);

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(1),
    ])
    .areas(main);
    draw_header(frame, header, state.view, theme);

    match state.view {
        View::Dashboard => draw_dashboard(frame, body, state, input, &palette),
        View::History => draw_history(frame, body, state, input, &palette),
    }

    let footer_text = input.status.as_deref().unwrap_or(KEY_HINTS);
    frame.render_widget(
        Paragraph::new(footer_text).style(palette.muted()),
        footer,
    );

    if let Some(alert) = &state.alert {
        draw_alert(frame, area, alert, &palette);
    }
}

fn card<'a>(palette: &Palette) -> Block<'a> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(palette.border())
        .style(palette.card())
}

fn draw_sidebar(frame: &mut Frame, area: Rect, active: View, palette: &Palette) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("AI Resume", Style::new().add_modifier(Modifier::BOLD)),
            Span::styled(
                " Insight",
                Style::new().fg(palette.accent).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
    ];

    for view in [View::Dashboard, View::History] {
        let label = format!(" {} ", view.menu_label());
        lines.push(if view == active {
            Line::styled(label, palette.highlight())
        } else {
            Line::raw(label)
        });
        lines.push(Line::default());
    }

    frame.render_widget(Paragraph::new(lines).block(card(palette)), area);
}

fn draw_header(frame: &mut Frame, area: Rect, view: View, theme: &ThemeContext) {
    let palette = theme.palette();
    let label = theme.preference().toggle_label();

    let [title, button] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(20)]).areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            view.title(),
            Style::new().add_modifier(Modifier::BOLD),
        ))
        .block(Block::bordered().border_style(palette.border())),
        title,
    );
    frame.render_widget(
        Paragraph::new(format!("[t] {}", label))
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(palette.border())),
        button,
    );
}

fn draw_dashboard(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    input: &InputState,
    palette: &Palette,
) {
    let [inputs, result] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    draw_inputs(frame, inputs, state, input, palette);
    draw_result(frame, result, state, palette);
}

fn draw_inputs(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    input: &InputState,
    palette: &Palette,
) {
    let outer = card(palette).title(" Inputs ");
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [jd_label, jd_box, file_label, drop_zone, button] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(4),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(inner);

    let editing = input.mode == InputMode::EditingJobDescription;
    frame.render_widget(Paragraph::new("Job Description"), jd_label);

    let jd_text = if state.job_description.is_empty() && !editing {
        Text::styled(JD_PLACEHOLDER, palette.muted())
    } else if editing {
        Text::raw(format!("{}▏", state.job_description))
    } else {
        Text::raw(state.job_description.as_str())
    };
    // Keep the end of long descriptions in view
    let visible = jd_box.height.saturating_sub(2);
    let overflow = (jd_text.height() as u16).saturating_sub(visible);
    let jd_border = if editing {
        Style::new().fg(palette.accent)
    } else {
        palette.border()
    };
    frame.render_widget(
        Paragraph::new(jd_text)
            .wrap(Wrap { trim: false })
            .scroll((overflow, 0))
            .block(
                Block::bordered()
                    .border_style(jd_border)
                    .title(if editing { " editing · Esc to finish " } else { " e to edit " }),
            ),
        jd_box,
    );

    frame.render_widget(Paragraph::new("Candidate Resume"), file_label);

    let drop_text = match &input.mode {
        InputMode::Browsing { path } => format!("Path: {}▏", path),
        _ => format!("📂 {}", state.file_label),
    };
    let (drop_border, drop_type) = if state.drag_active {
        (Style::new().fg(palette.accent), BorderType::Double)
    } else {
        (palette.border(), BorderType::Plain)
    };
    frame.render_widget(
        Paragraph::new(drop_text).alignment(Alignment::Center).block(
            Block::bordered()
                .border_type(drop_type)
                .border_style(drop_border)
                .title(" o to browse (.pdf, .docx) "),
        ),
        drop_zone,
    );

    let button_style = if state.loading {
        palette.muted()
    } else {
        palette.highlight()
    };
    frame.render_widget(
        Paragraph::new(state.submit_label())
            .alignment(Alignment::Center)
            .style(button_style)
            .block(Block::bordered().border_style(palette.border())),
        button,
    );
}

fn draw_result(frame: &mut Frame, area: Rect, state: &DashboardState, palette: &Palette) {
    let outer = card(palette).title(" Result ");
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let Some(result) = &state.result else {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);
        frame.render_widget(
            Paragraph::new("Ready to analyze.")
                .alignment(Alignment::Center)
                .style(palette.muted()),
            middle,
        );
        return;
    };

    let [gauge, _, summary_title, summary, skills_title, skills] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(2),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(inner);

    let displayed = state.score.displayed();
    frame.render_widget(
        Gauge::default()
            .block(Block::bordered().border_style(palette.border()))
            .gauge_style(palette.score(displayed))
            .percent(displayed as u16)
            .label(format!("{}% Match", displayed)),
        gauge,
    );

    let heading = Style::new().add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(Span::styled("📝 Summary", heading)), summary_title);
    frame.render_widget(
        Paragraph::new(result.summary.as_str()).wrap(Wrap { trim: true }),
        summary,
    );

    frame.render_widget(
        Paragraph::new(Span::styled("⚠️ Missing Skills", heading)),
        skills_title,
    );
    let tag_style = Style::new().fg(palette.surface).bg(palette.negative);
    let tags: Vec<Span> = result
        .missing_keywords
        .iter()
        .flat_map(|skill| [Span::styled(format!(" {} ", skill), tag_style), Span::raw(" ")])
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(tags)).wrap(Wrap { trim: true }),
        skills,
    );
}

/// Row the report cursor points at, clamped to the loaded history
pub fn selected_report(state: &DashboardState, input: &InputState) -> Option<usize> {
    let last = state.history.len().checked_sub(1)?;
    Some(input.report_cursor.min(last))
}

fn draw_history(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    input: &InputState,
    palette: &Palette,
) {
    let [table_area, detail_area] =
        Layout::vertical([Constraint::Min(5), Constraint::Length(4)]).areas(area);

    let bold = Style::new().add_modifier(Modifier::BOLD);
    let header = Row::new(["Date", "Score", "Job Description", "Resume"]).style(bold);

    let rows = history_rows(&state.history).into_iter().map(|row| {
        let badge_color = match row.badge {
            Badge::Positive => palette.positive,
            Badge::Negative => palette.negative,
        };
        let link = if row.report_url.is_some() {
            REPORT_LINK_LABEL
        } else {
            "-"
        };
        Row::new([
            Cell::from(row.date),
            Cell::from(row.score).style(Style::new().fg(badge_color).add_modifier(Modifier::BOLD)),
            Cell::from(row.excerpt),
            Cell::from(link).style(Style::new().fg(palette.accent)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(7),
            Constraint::Min(20),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .row_highlight_style(palette.highlight())
    .highlight_symbol("▶ ")
    .block(card(palette).title(format!(" Saved Reports ({}) ", state.history.len())));

    let selected = selected_report(state, input);
    let mut table_state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, table_area, &mut table_state);

    // Full link of the highlighted row; most terminals make it clickable
    let detail = match selected.map(|i| state.history[i].report_url.as_deref()) {
        Some(Some(url)) => Line::from(vec![
            Span::styled(format!("{} ", REPORT_LINK_LABEL), bold),
            Span::styled(url, Style::new().fg(palette.accent)),
        ]),
        Some(None) => Line::styled("No resume stored for this report.", palette.muted()),
        None => Line::styled("No saved reports.", palette.muted()),
    };
    frame.render_widget(
        Paragraph::new(detail)
            .wrap(Wrap { trim: false })
            .block(card(palette).title(" Selected Report ")),
        detail_area,
    );
}

fn draw_alert(frame: &mut Frame, area: Rect, alert: &Alert, palette: &Palette) {
    let width = (alert.message.chars().count() as u16 + 8).max(36);
    let popup = centered(area, width, 5);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(vec![
            Line::raw(alert.message.as_str()),
            Line::default(),
            Line::styled("Press any key", palette.muted()),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .border_type(BorderType::Thick)
                .border_style(Style::new().fg(palette.negative))
                .title(" Alert ")
                .style(palette.card()),
        ),
        popup,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PreferenceStore;
    use crate::dashboard::state::Event;
    use crate::error::DashboardError;
    use crate::types::{AnalysisResult, HistoryRecord};
    use chrono::TimeZone;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(state: &DashboardState, theme: &ThemeContext, input: &InputState) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(140, 36)).unwrap();
        terminal
            .draw(|frame| draw(frame, state, theme, input))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|line| line.contains(needle))
    }

    fn theme(dir: &tempfile::TempDir) -> ThemeContext {
        ThemeContext::init(PreferenceStore::new(dir.path().join("preferences.toml")))
    }

    fn record(score: u8, jd: &str) -> HistoryRecord {
        HistoryRecord {
            date: chrono::Utc.with_ymd_and_hms(2025, 10, 18, 12, 0, 0).unwrap(),
            score,
            job_description_excerpt: jd.to_string(),
            report_url: Some(format!("https://bucket.s3.amazonaws.com/report_{}.pdf", score)),
        }
    }

    #[test]
    fn test_empty_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let lines = screen(&DashboardState::default(), &theme(&dir), &InputState::default());

        assert!(contains(&lines, "New Analysis"));
        assert!(contains(&lines, "Ready to analyze."));
        assert!(contains(&lines, "Run Analysis"));
        assert!(contains(&lines, "Drag & Drop or Click to Upload"));
        assert!(contains(&lines, "Dark Mode"));
    }

    #[test]
    fn test_result_card() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = DashboardState::default();
        state.apply(Event::SubmitStart);
        state.apply(Event::SubmitSuccess(AnalysisResult {
            match_percentage: 82,
            summary: "Strong match".to_string(),
            missing_keywords: vec!["Docker".to_string()],
        }));
        let generation = state.score.generation();
        for value in 1..=82 {
            state.apply(Event::ScoreTick { generation, value });
        }

        let lines = screen(&state, &theme(&dir), &InputState::default());

        assert!(contains(&lines, "82% Match"));
        assert!(contains(&lines, "Strong match"));
        assert!(contains(&lines, "Docker"));
    }

    #[test]
    fn test_loading_label() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = DashboardState::default();
        state.apply(Event::SubmitStart);

        let lines = screen(&state, &theme(&dir), &InputState::default());
        assert!(contains(&lines, "Analyzing..."));
    }

    #[test]
    fn test_history_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = DashboardState::default();
        state.apply(Event::SelectView(View::History));
        state.apply(Event::HistoryLoaded {
            request: 1,
            records: vec![
                record(91, "Platform engineer"),
                record(45, "Marketing lead"),
            ],
        });

        let lines = screen(&state, &theme(&dir), &InputState::default());

        assert!(contains(&lines, "Historical Reports"));
        assert!(contains(&lines, "Saved Reports (2)"));
        let platform = lines.iter().position(|l| l.contains("Platform engineer"));
        let marketing = lines.iter().position(|l| l.contains("Marketing lead"));
        assert!(platform.unwrap() < marketing.unwrap());
        assert!(contains(&lines, "91%"));
        assert!(contains(&lines, "45%"));
        assert!(contains(&lines, REPORT_LINK_LABEL));
        assert!(contains(&lines, "https://bucket.s3.amazonaws.com/report_91.pdf"));
        assert!(!contains(&lines, "report_45.pdf"));

        let second = InputState {
            report_cursor: 1,
            ..InputState::default()
        };
        let lines = screen(&state, &theme(&dir), &second);
        assert!(contains(&lines, "https://bucket.s3.amazonaws.com/report_45.pdf"));
        assert!(!contains(&lines, "report_91.pdf"));
    }

    #[test]
    fn test_selected_report_is_clamped() {
        let mut state = DashboardState::default();
        let far = InputState {
            report_cursor: 9,
            ..InputState::default()
        };
        assert_eq!(selected_report(&state, &far), None);

        state.apply(Event::HistoryLoaded {
            request: 1,
            records: vec![record(80, "a"), record(20, "b")],
        });
        assert_eq!(selected_report(&state, &far), Some(1));
        assert_eq!(selected_report(&state, &InputState::default()), Some(0));
    }

    #[test]
    fn test_empty_history_detail() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = DashboardState::default();
        state.apply(Event::SelectView(View::History));

        let lines = screen(&state, &theme(&dir), &InputState::default());
        assert!(contains(&lines, "Saved Reports (0)"));
        assert!(contains(&lines, "No saved reports."));
    }

    #[test]
    fn test_alert_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = DashboardState::default();
        state.apply(Event::ValidationFailed(DashboardError::MissingInput {
            job_description: true,
            resume: true,
        }));

        let lines = screen(&state, &theme(&dir), &InputState::default());
        assert!(contains(&lines, "Please upload a resume and JD."));
        assert!(contains(&lines, "Press any key"));
    }

    #[test]
    fn test_dark_theme_changes_background() {
        let dir = tempfile::tempdir().unwrap();
        let mut theme = theme(&dir);
        let state = DashboardState::default();

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| draw(frame, &state, &theme, &InputState::default()))
            .unwrap();
        let light_bg = terminal.backend().buffer().content[0].bg;

        theme.toggle();
        terminal
            .draw(|frame| draw(frame, &state, &theme, &InputState::default()))
            .unwrap();
        let dark_bg = terminal.backend().buffer().content[0].bg;

        assert_ne!(light_bg, dark_bg);
        assert!(contains(
            &screen(&state, &theme, &InputState::default()),
            "Light Mode"
        ));
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 4);
        assert_eq!(centered(area, 40, 10), area);
        assert_eq!(centered(Rect::new(0, 0, 100, 50), 40, 10), Rect::new(30, 20, 40, 10));
    }
}
