//! Diagnostics setup.
//!
//! Logs go to stderr so stdout carries only the table.

use tracing_subscriber::EnvFilter;

/// Maps `-v` occurrences to a default filter directive.
#[must_use]
pub fn directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the verbosity flag when set. Calling this twice is
/// harmless; the second call is ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(directive(0), "warn");
        assert_eq!(directive(1), "info");
        assert_eq!(directive(2), "debug");
        assert_eq!(directive(7), "trace");
    }

    #[test]
    fn init_twice_is_fine() {
        init(0);
        init(3);
    }
}
