//! Logger setup shared by the CLI binaries. Logs go to stderr so stdout
//! carries only the report.

/// Default filter for a `-v` count; `RUST_LOG` still takes precedence.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(verbose: u8) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter(verbose)),
    )
    .init();
}
