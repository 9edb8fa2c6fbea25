use tracing_subscriber::EnvFilter;

/// Initialize tracing for a dashboard binary. Output goes to stderr so the
/// alternate screen stays clean while the TUI is running.
pub fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("meter_dashboard=info".parse().unwrap_or_else(|_| "info".parse().unwrap()))
        .add_directive("meter_client=info".parse().unwrap_or_else(|_| "info".parse().unwrap()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
