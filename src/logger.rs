use tracing_subscriber::{EnvFilter, fmt};

/// Initializes the tracing subscriber.
///
/// Level is controlled through the RUST_LOG environment variable,
/// defaulting to info:
/// - RUST_LOG=debug cargo run
/// - RUST_LOG=reqline=trace cargo run
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
