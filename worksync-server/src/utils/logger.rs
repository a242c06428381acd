//! Logging Infrastructure
//!
//! Console output always; with `log_dir` set, the same events also go to a
//! daily rolling file (`worksync-server.YYYY-MM-DD`).

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Default filter when `RUST_LOG` is not set
fn default_directives(level: &str) -> String {
    format!("worksync_server={level},shared={level},security={level},tower_http=info,sqlx=warn")
}

/// Initialize the logger with optional JSON format and daily rolling file output
///
/// `RUST_LOG` 优先于 `log_level`。返回的 guard 必须存活到进程结束。
pub fn init_logger_with_file(
    log_level: Option<&str>,
    json: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let console: BoxedLayer = if json {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };
    let mut layers = vec![console];

    let mut guard = None;
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        std::fs::create_dir_all(log_path)
            .with_context(|| format!("Failed to create log dir {dir}"))?;

        let file_appender = tracing_appender::rolling::daily(log_path, "worksync-server");
        let (writer, file_guard) = tracing_appender::non_blocking(file_appender);
        let file: BoxedLayer = if json {
            fmt::layer().json().with_ansi(false).with_writer(writer).boxed()
        } else {
            fmt::layer().with_ansi(false).with_writer(writer).boxed()
        };
        layers.push(file);
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("Global logger already set")?;

    Ok(guard)
}
