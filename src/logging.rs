use tracing_subscriber::EnvFilter;

/// Installs the log subscriber. Each `-v` raises the crate's level one
/// step (warn, info, debug, trace); a set `RUST_LOG` wins outright.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("almanac={level}")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
