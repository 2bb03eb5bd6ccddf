//! nexpanel - sidebar menu and live clock for the NEX portal home page.
//!
//! Builds the page, starts the clock once the document is ready, and toggles
//! the sidebar whenever a trigger arrives on stdin (`menu`, `show`, `quit`).

#![deny(clippy::all)]

mod config;
mod dom;
mod error;
mod page;
mod settings;
mod widgets;

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{AppError, PageError};
use page::actions::{action_sender, forward_triggers, init_action_channel, PageAction};
use page::runner::run_action_loop;
use page::Page;
use widgets::{ClockDisplay, MenuToggle};

fn main() {
    // Load .env file (if present) before anything else
    if let Err(e) = dotenvy::dotenv() {
        // .env file is optional - only log if it's not a "file not found" error
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            eprintln!("\nCheck config.toml or these environment variables:");
            eprintln!("  NEXPANEL_LOCALE, NEXPANEL_TIME_PATTERN, NEXPANEL_INTERVAL_MS, NEXPANEL_RENDER");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    info!("Starting {} v{}", config.app.name, env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config) {
        error!("{:#}", e);
        if let Some(app_error) = e.downcast_ref::<AppError>() {
            eprintln!("{}", app_error.user_message());
        }
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &Config) {
    let log_dir = settings::init_log_directory(&config.logging.log_dir);
    if let Err(e) = &log_dir {
        eprintln!("Warning: Could not create log directory: {}", e);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(false)
        .with_thread_ids(false)
        .init();

    if let Ok(dir) = log_dir {
        debug!("Log directory: {}", dir.display());
    }
}

/// Start the runtime and serve the page until it is closed.
fn run(config: Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    let result = runtime
        .block_on(serve_page(config))
        .context("Page stopped with an error");

    // Don't let leftover blocking work hold the process open after quit.
    runtime.shutdown_timeout(Duration::from_secs(1));
    result
}

/// Build the page, wire the widgets, and process actions until quit.
async fn serve_page(config: Config) -> Result<(), AppError> {
    let mut action_rx = init_action_channel().ok_or(PageError::ActionChannelClosed)?;
    let sender = action_sender().ok_or(PageError::ActionChannelClosed)?;

    let page = Page::from_config(&config.page);
    let mut menu = MenuToggle::new(page.clone(), &config.page);
    let clock = ClockDisplay::from_config(page.clone(), &config.page, &config.clock)?.run_on_ready();

    page.mark_ready();
    spawn_stdin_trigger(sender)?;

    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };
    run_action_loop(
        &page,
        &mut menu,
        &mut action_rx,
        config.render.format,
        interrupted,
    )
    .await;

    clock.shutdown().await;
    info!("Page closed");
    Ok(())
}

/// Forward stdin lines to the action channel from a dedicated thread.
///
/// The thread is not joined: a pending stdin read ends with the process.
fn spawn_stdin_trigger(sender: mpsc::Sender<PageAction>) -> Result<(), AppError> {
    std::thread::Builder::new()
        .name("stdin-trigger".into())
        .spawn(move || forward_triggers(std::io::stdin().lock(), &sender))?;
    Ok(())
}
