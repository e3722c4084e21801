//! Scholaris CLI - generate, track and download student reports

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use scholaris_core::application::{
    cancel_channel, JobOrigin, PollConfig, ReportGenerator, ReportOutcome, SessionEnd,
    SimulatorConfig, StatusObserver,
};
use scholaris_core::domain::{JobStatus, ReportKind, ReportSummary};
use scholaris_core::port::id_provider::UuidProvider;
use scholaris_core::port::time_provider::SystemTimeProvider;
use scholaris_core::port::{MemoryTokenStore, ReportTransport};
use scholaris_infra_http::{HttpReportTransport, HttpTransportConfig};
use std::sync::Arc;
use std::time::Duration;
use tabled::{Table, Tabled};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Parser)]
#[command(name = "scholaris")]
#[command(about = "Student report generation client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Report service base URL
    #[arg(long, env = "SCHOLARIS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Bearer token for authenticated requests
    #[arg(long, env = "SCHOLARIS_API_TOKEN")]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a report and follow its progress until done
    Generate {
        /// Subject the report concerns ("current" for the logged-in user)
        #[arg(short, long, default_value = "current")]
        subject: String,

        /// Report kind (performance, endorsement, comprehensive, or any
        /// service-defined kind)
        #[arg(short, long, default_value = "comprehensive")]
        kind: String,

        /// Poll interval in milliseconds
        #[arg(long, default_value = "2000")]
        interval_ms: u64,

        /// Retry budget for failed status queries (0 = fail fast)
        #[arg(long, default_value = "0")]
        retries: u32,

        /// Fail instead of simulating progress locally when the service
        /// rejects the submission
        #[arg(long)]
        no_fallback: bool,
    },

    /// List previously generated reports
    List,

    /// Download a completed report to a local JSON file
    Download {
        /// Task id of the report
        task_id: String,

        /// Output path (default: student-report-<task_id>.json)
        #[arg(short, long)]
        out: Option<String>,
    },
}

/// Prints each status observation as it arrives. Sessions end with exactly
/// one completion or error line.
struct ConsoleObserver;

impl StatusObserver for ConsoleObserver {
    fn on_progress(&self, status: &JobStatus) {
        let progress = status.progress().unwrap_or(0);
        println!("  {} {:>3}% ({})", "•".yellow(), progress, status.kind_str());
    }

    fn on_complete(&self, status: &JobStatus) {
        println!("{}", "✓ Report generated successfully".green().bold());
        if let JobStatus::Completed { result } = status {
            if let Some(url) = result.get("report_url").and_then(|v| v.as_str()) {
                println!("  {} {}", "Report URL:".bold(), url);
            }
        }
    }

    fn on_error(&self, message: &str) {
        println!("{} {}", "✗ Report generation failed:".red().bold(), message);
    }
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    report_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

impl From<ReportSummary> for ReportRow {
    fn from(summary: ReportSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            title: summary.title.unwrap_or_default(),
            report_type: summary.report_type.unwrap_or_default(),
            status: summary.status.unwrap_or_default(),
            created_at: summary.created_at.unwrap_or_default(),
        }
    }
}

fn init_logging() {
    let log_format = std::env::var("SCHOLARIS_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("scholaris=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let credentials = Arc::new(MemoryTokenStore::new(cli.token.clone()));
    let transport: Arc<dyn ReportTransport> = Arc::new(
        HttpReportTransport::new(
            HttpTransportConfig {
                base_url: cli.api_url.clone(),
                ..HttpTransportConfig::default()
            },
            credentials,
        )
        .context("Failed to build HTTP transport")?,
    );

    match cli.command {
        Commands::Generate {
            subject,
            kind,
            interval_ms,
            retries,
            no_fallback,
        } => {
            let kind = ReportKind::from(kind.as_str());
            let poll_config = PollConfig {
                interval: Duration::from_millis(interval_ms),
                max_transport_retries: retries,
                ..PollConfig::default()
            };
            let generator = ReportGenerator::new(
                Arc::clone(&transport),
                Arc::new(SystemTimeProvider),
                Arc::new(UuidProvider),
                poll_config,
                SimulatorConfig::default(),
            );

            println!(
                "{}",
                format!("Generating {} report for {}...", kind, subject)
                    .cyan()
                    .bold()
            );

            // Ctrl-C discards the session without a terminal callback
            let (cancel_handle, cancel_token) = cancel_channel();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel_handle.cancel();
                }
            });

            let outcome = if no_fallback {
                generator
                    .generate(&subject, kind, &ConsoleObserver, cancel_token)
                    .await
            } else {
                generator
                    .generate_with_fallback(&subject, kind, &ConsoleObserver, cancel_token)
                    .await
            }
            .context("Report submission failed")?;

            report_outcome(&outcome)?;
        }

        Commands::List => {
            let reports = transport
                .list_reports()
                .await
                .context("Failed to list reports")?;

            if reports.is_empty() {
                println!("{}", "No reports generated yet".yellow());
            } else {
                let rows: Vec<ReportRow> = reports.into_iter().map(ReportRow::from).collect();
                let table = Table::new(rows).to_string();
                println!("{}", table);
            }
        }

        Commands::Download { task_id, out } => {
            let document = transport
                .fetch_report(&task_id)
                .await
                .context("Failed to fetch report")?;

            let path = out.unwrap_or_else(|| format!("student-report-{}.json", task_id));
            let path = shellexpand::tilde(&path).into_owned();

            let content =
                serde_json::to_string_pretty(&document).context("Failed to encode report")?;
            std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path))?;

            println!("{}", format!("✓ Report saved to {}", path).green().bold());
        }
    }

    Ok(())
}

fn report_outcome(outcome: &ReportOutcome) -> Result<()> {
    if let JobOrigin::Simulated(job_id) = &outcome.origin {
        println!(
            "{}",
            format!("(service unreachable, simulated locally as {})", job_id).yellow()
        );
    }

    match outcome.end {
        SessionEnd::Completed => Ok(()),
        SessionEnd::Failed => anyhow::bail!("report job did not complete"),
        SessionEnd::Cancelled => {
            println!("{}", "Cancelled; no report produced".yellow());
            Ok(())
        }
    }
}
