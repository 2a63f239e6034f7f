use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs the JSON log subscriber for the Lambda process.
///
/// Level comes from `RUST_LOG` and defaults to `info`. Timestamps are left
/// out because CloudWatch stamps every line on ingestion.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .init();
}
