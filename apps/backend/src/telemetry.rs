use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the process-wide JSON log subscriber.
///
/// `RUST_LOG` overrides the default filter. Spans from noisy dependencies
/// stay at warn so request lines remain readable in production.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,backend=info,sqlx=warn,sea_orm=warn,redis=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .json()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_ansi(false),
        )
        .init();
}
