use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use smart_ats_client::SmartAtsClient;
use smart_ats_core::intake::expand_home;
use smart_ats_core::{AnalysisMode, SmartAtsConfig};
use smart_ats_tui::{App, ExitReason};

/// smart-ats: resume parsing and ATS scoring from the terminal.
///
/// Upload a resume to the analysis backend, optionally alongside a job
/// description, and browse the scored report. ATS reports can be exported
/// as PDF.
#[derive(Parser, Debug)]
#[command(name = "smart-ats", version, about)]
struct Cli {
    /// Backend base URL (overrides the config file).
    #[arg(long)]
    base_url: Option<String>,

    /// Mode to start in: `basic` or `ats`.
    #[arg(short, long)]
    mode: Option<AnalysisMode>,

    /// Resume to attach on startup (can also be set in the TUI).
    #[arg(short, long)]
    resume: Option<String>,

    /// Job description for ATS mode (can also be set in the TUI).
    #[arg(short, long)]
    job_description: Option<String>,

    /// Session cookie from a browser login, as `name=value`.
    #[arg(long)]
    session_cookie: Option<String>,

    /// Directory exported reports are saved to.
    #[arg(long)]
    download_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Log to a file so the TUI's alternate screen stays clean. If the file
    // can't be opened, logs are dropped.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("smart-ats");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("smart-ats.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }

    let mut config = SmartAtsConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        SmartAtsConfig::default()
    });

    if let Some(base_url) = cli.base_url {
        config.server.base_url = base_url;
    }
    if let Some(cookie) = cli.session_cookie {
        config.server.session_cookie = Some(cookie);
    }
    if let Some(dir) = cli.download_dir.as_deref() {
        config.export.download_dir = Some(expand_home(dir));
    }
    if let Some(mode) = cli.mode {
        config.ui.default_mode = mode;
    }

    tracing::info!(
        base_url = %config.server.base_url,
        "Starting smart-ats v{}",
        env!("CARGO_PKG_VERSION")
    );

    let client = SmartAtsClient::new(&config.server)
        .with_context(|| format!("Invalid backend URL '{}'", config.server.base_url))?;

    let mut app = App::new(config, Arc::new(client));

    if let Some(resume) = cli.resume.as_deref() {
        app.set_initial_resume(expand_home(resume));
    }
    if let Some(description) = cli.job_description {
        app.set_initial_job_description(description);
    }

    match app.run().await? {
        ExitReason::SignedOut { login_url } => {
            tracing::info!("Signed out");
            println!("Signed out. Sign in again at {login_url}");
        }
        ExitReason::Quit => tracing::info!("smart-ats exited cleanly"),
    }
    Ok(())
}
