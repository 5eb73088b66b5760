//! pagecheck - browser accessibility check for a deployed single-page app.
//!
//! Loads the target page, opens the process monitor tab and checks the
//! installation instructions. Exits 0 when every check passes, 1 otherwise.

mod cli;
mod settings;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use pagecheck_browser_cdp::CdpBrowser;
use pagecheck_config::{ConfigLoader, ConfigValidator};
use pagecheck_core::{TracingSink, Verdict};

use cli::Cli;

/// Initialize tracing with console and optional file output.
///
/// `RUST_LOG` takes precedence over the configured level. Log files rotate
/// daily; the returned guard flushes them and must live until exit.
fn init_tracing(level: &str, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("pagecheck")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_writer(non_blocking).with_ansi(false).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging is configured from the file, so a broken file goes to stderr.
    let config = match ConfigLoader::load_or_default(cli.config.as_deref()) {
        Ok(config) => cli.apply(config),
        Err(e) => {
            eprintln!("pagecheck: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match init_tracing(&config.logging.level, config.logging.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("pagecheck: failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match ConfigValidator::validate(&config).into_result() {
        Ok(warnings) => {
            for warning in warnings {
                warn!("{}: {}", warning.path, warning.message);
            }
        }
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let browser = CdpBrowser::new(settings::browser_config(&config));
    let settings = settings::check_settings(&config);

    let verdict = pagecheck_core::run(&browser, &settings, &TracingSink).await;

    match &verdict {
        Verdict::Passed => info!("PASS"),
        Verdict::Failed(failure) => error!("FAIL: {}", failure),
    }

    ExitCode::from(verdict.exit_code() as u8)
}
