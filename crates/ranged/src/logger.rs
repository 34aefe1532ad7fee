use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout stays clean for payload bytes.
///
/// `RUST_LOG` wins when set; otherwise each `-v` raises the default level.
pub fn setup_logger(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
