#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for the generator.
//!
//! Library crates log through `tracing`; binaries call [`init`] once.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Levels accepted by [`init`].
pub const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Filter directive for `level`; `RUST_LOG`, when set, wins.
pub fn filter(level: &str, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim).filter(|spec| !spec.is_empty()) {
        Some(spec) => spec.to_string(),
        None if LEVELS.contains(&level.to_ascii_lowercase().as_str()) => level.to_ascii_lowercase(),
        None => "info".to_string(),
    }
}

/// Install a stderr subscriber at `level`.
///
/// A second call keeps the first subscriber.
pub fn init(level: &str) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter(level, rust_log.as_deref())));

    if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
        tracing::debug!("tracing subscriber already initialized");
    }
}

/// Emits a trace event tagged with the module it came from.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(module, "{msg}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter() {
        assert_eq!(filter("debug", None), "debug");
        assert_eq!(filter("WARN", None), "warn");
        assert_eq!(filter("loud", None), "info");
        assert_eq!(filter("debug", Some("pipeline=trace")), "pipeline=trace");
        assert_eq!(filter("debug", Some("  ")), "debug");
    }

    #[test]
    fn test_init_twice() {
        init("info");
        init("debug");
        trace("logging", "still usable");
    }
}
