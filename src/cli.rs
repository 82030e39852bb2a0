// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::core::{AnalysisBackend, ConfigManager, ServiceClient};
use crate::dashboard::report::{format_history_table, format_result};
use crate::dashboard::{Dashboard, ThemeContext};
use crate::tui;
use crate::types::ResumeFile;

#[derive(Parser)]
#[command(name = "resume-insight")]
#[command(about = "Match resumes against job descriptions with the AI Resume Insight service")]
pub struct DashboardCli {
    #[command(subcommand)]
    pub command: Option<DashboardCommand>,

    /// Section of the config file to use
    #[arg(long, default_value = "local")]
    pub env: String,

    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum DashboardCommand {
    /// Open the interactive dashboard (default)
    Open,
    /// Run a single analysis and print the result
    Analyze {
        /// Job description text
        #[arg(long, conflicts_with = "jd_file")]
        jd: Option<String>,
        /// Read the job description from a file
        #[arg(long)]
        jd_file: Option<PathBuf>,
        /// Resume to analyze (.pdf or .docx)
        resume: PathBuf,
    },
    /// Print the saved reports
    History,
    /// Print the stored theme, optionally toggling it first
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

pub async fn handle_command(cli: DashboardCli, config: ConfigManager) -> Result<()> {
    let theme = ThemeContext::init(config.preference_store());
    let client = Arc::new(ServiceClient::new(
        &config.service.base_url,
        config.service.timeout_seconds,
    )?);

    match cli.command.unwrap_or(DashboardCommand::Open) {
        DashboardCommand::Open => tui::run(Dashboard::new(client, theme)).await,

        DashboardCommand::Analyze {
            jd,
            jd_file,
            resume,
        } => {
            let job_description = match (jd, jd_file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read file: {}", path.display()))?,
                (None, None) => String::new(),
            };
            analyze_once(Dashboard::new(client, theme), job_description, resume).await
        }

        DashboardCommand::History => {
            let records = client.history().await?;
            print!("{}", format_history_table(&records));
            if !records.is_empty() {
                println!();
            }
            Ok(())
        }

        DashboardCommand::Theme { toggle } => {
            let mut theme = theme;
            if toggle {
                theme.toggle();
            }
            println!("{}", theme.preference().as_str());
            Ok(())
        }
    }
}

/// Submit once, show the count-up on a single line, then the result card
pub async fn analyze_once<B: AnalysisBackend>(
    mut dashboard: Dashboard<B>,
    job_description: String,
    resume: PathBuf,
) -> Result<()> {
    if !resume.is_file() {
        anyhow::bail!("Resume not found: {}", resume.display());
    }
    let file = ResumeFile::from_path(&resume)?;
    if !file.has_accepted_extension() {
        eprintln!("Note: {} is not a .pdf or .docx; sending it anyway", file.file_name);
    }

    dashboard.set_job_description(job_description);
    dashboard.select_file(file);
    dashboard.submit()?;
    println!("{}", dashboard.state().submit_label());

    let mut stdout = std::io::stdout();
    let mut shown = None;
    // The history refresh that follows a result is not waited for
    while !dashboard.submission_settled() {
        let Some(event) = dashboard.next_event().await else {
            break;
        };
        dashboard.handle(event);

        let state = dashboard.state();
        let displayed = state.score.displayed();
        if state.result.is_some() && shown != Some(displayed) {
            print!("\rMatch: {:>3}%", displayed);
            stdout.flush().context("Failed to write to stdout")?;
            shown = Some(displayed);
        }
    }
    if shown.is_some() {
        println!();
    }

    let state = dashboard.state();
    if let Some(alert) = &state.alert {
        anyhow::bail!("{}", alert.message);
    }
    if let Some(result) = &state.result {
        info!("Analysis printed: {}% match", result.match_percentage);
        println!("\n{}", format_result(result));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnalysisRequest, AnalysisResult, HistoryRecord};
    use async_trait::async_trait;
    use clap::CommandFactory;
    use std::time::Duration;

    /// Answers `analyze` at once; `history` never completes
    struct StalledHistory {
        outcome: Result<AnalysisResult, String>,
    }

    #[async_trait]
    impl AnalysisBackend for StalledHistory {
        async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalysisResult> {
            self.outcome.clone().map_err(|reason| anyhow::anyhow!(reason))
        }

        async fn history(&self) -> Result<Vec<HistoryRecord>> {
            std::future::pending().await
        }
    }

    fn stalled_dashboard(
        outcome: Result<AnalysisResult, String>,
        dir: &tempfile::TempDir,
    ) -> Dashboard<StalledHistory> {
        let theme = ThemeContext::init(crate::core::PreferenceStore::new(
            dir.path().join("preferences.toml"),
        ));
        Dashboard::new(Arc::new(StalledHistory { outcome }), theme)
    }

    fn pdf_in(dir: &tempfile::TempDir) -> PathBuf {
        let resume = dir.path().join("resume.pdf");
        std::fs::write(&resume, b"%PDF").unwrap();
        resume
    }

    #[test]
    fn test_cli_definition() {
        DashboardCli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_open() {
        let cli = DashboardCli::parse_from(["resume-insight"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.env, "local");
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
    }

    #[test]
    fn test_analyze_arguments() {
        let cli = DashboardCli::parse_from([
            "resume-insight",
            "--env",
            "production",
            "analyze",
            "--jd",
            "Requires Python and SQL",
            "resume.pdf",
        ]);

        match cli.command {
            Some(DashboardCommand::Analyze {
                jd,
                jd_file,
                resume,
            }) => {
                assert_eq!(jd.as_deref(), Some("Requires Python and SQL"));
                assert!(jd_file.is_none());
                assert_eq!(resume, PathBuf::from("resume.pdf"));
            }
            _ => panic!("expected analyze"),
        }
        assert_eq!(cli.env, "production");
    }

    #[test]
    fn test_jd_and_jd_file_conflict() {
        let parsed = DashboardCli::try_parse_from([
            "resume-insight",
            "analyze",
            "--jd",
            "text",
            "--jd-file",
            "jd.txt",
            "resume.pdf",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_theme_toggle_flag() {
        let cli = DashboardCli::parse_from(["resume-insight", "theme", "--toggle"]);
        assert!(matches!(
            cli.command,
            Some(DashboardCommand::Theme { toggle: true })
        ));
    }

    #[tokio::test]
    async fn test_analyze_once_requires_existing_resume() {
        let dir = tempfile::tempdir().unwrap();
        let theme = ThemeContext::init(crate::core::PreferenceStore::new(
            dir.path().join("preferences.toml"),
        ));
        let client = Arc::new(ServiceClient::new("http://127.0.0.1:9", Some(1)).unwrap());

        let err = analyze_once(
            Dashboard::new(client, theme),
            "Requires Python and SQL".to_string(),
            dir.path().join("missing.pdf"),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().starts_with("Resume not found"));
    }

    #[tokio::test]
    async fn test_analyze_once_requires_job_description() {
        let dir = tempfile::tempdir().unwrap();
        let resume = dir.path().join("resume.pdf");
        std::fs::write(&resume, b"%PDF").unwrap();
        let theme = ThemeContext::init(crate::core::PreferenceStore::new(
            dir.path().join("preferences.toml"),
        ));
        let client = Arc::new(ServiceClient::new("http://127.0.0.1:9", Some(1)).unwrap());

        let err = analyze_once(Dashboard::new(client, theme), String::new(), resume)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please upload a resume and JD.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_once_does_not_wait_for_history() {
        let dir = tempfile::tempdir().unwrap();
        let dashboard = stalled_dashboard(
            Ok(AnalysisResult {
                match_percentage: 82,
                summary: "Strong match".to_string(),
                missing_keywords: vec!["Docker".to_string()],
            }),
            &dir,
        );

        let finished = tokio::time::timeout(
            Duration::from_secs(3600),
            analyze_once(dashboard, "Requires Python and SQL".to_string(), pdf_in(&dir)),
        )
        .await;

        assert!(matches!(finished, Ok(Ok(()))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_once_reports_backend_failure() {
        let dir = tempfile::tempdir().unwrap();
        let dashboard = stalled_dashboard(Err("model unavailable".to_string()), &dir);

        let finished = tokio::time::timeout(
            Duration::from_secs(3600),
            analyze_once(dashboard, "Requires Python and SQL".to_string(), pdf_in(&dir)),
        )
        .await
        .unwrap();

        assert_eq!(finished.unwrap_err().to_string(), "Analysis failed.");
    }
}
