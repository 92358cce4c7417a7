//! Tracing subscriber for test binaries.
//!
//! Unit tests (via a ctor in the backend lib) and the integration suites
//! both come through [`init`], so one process gets one subscriber.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Directive used when neither `TEST_LOG` nor `RUST_LOG` is set.
pub const QUIET: &str = "warn";

static SUBSCRIBER: OnceCell<()> = OnceCell::new();

/// Install the test subscriber. Safe to call from every test.
pub fn init() {
    SUBSCRIBER.get_or_init(|| {
        let filter = EnvFilter::new(directive(|name| std::env::var(name).ok()));

        // Something else may own the global default already; keep it.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init();
    });
}

/// Filter directive: `TEST_LOG` wins over `RUST_LOG`; blank values are skipped.
pub fn directive<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ["TEST_LOG", "RUST_LOG"]
        .into_iter()
        .filter_map(lookup)
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| QUIET.to_string())
}
