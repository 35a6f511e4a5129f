pub mod paths;
pub mod persistence;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "billing_calendar=info";

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` is honoured; `directive` (for example a configured `log_filter`) is added
/// on top, falling back to `billing_calendar=info`.
pub fn init_tracing(directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        for raw in [directive, Some(DEFAULT_DIRECTIVE)].into_iter().flatten() {
            if let Ok(parsed) = raw.parse() {
                filter = filter.add_directive(parsed);
                break;
            }
        }

        // Another subscriber may already be installed by an embedding application.
        let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
    });
}
