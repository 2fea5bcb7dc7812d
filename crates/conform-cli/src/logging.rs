//! tracing subscriber setup. Logs go to stderr so stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG`, when set, replaces `--log-level` with a full filter.
fn filter_directive(level: &str, env: Option<String>) -> String {
    env.filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| level.to_string())
}

pub fn init(level: &str, json: bool) {
    let directive = filter_directive(level, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::new(directive);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
