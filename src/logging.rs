use std::sync::Once;

use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::formatter::CustomFormatter;

static SUBSCRIBER_INIT: Once = Once::new();

/// Installs the global subscriber. Later calls are no-ops.
///
/// `RUST_LOG` overrides the filter; otherwise this crate logs at `info` and everything else at `warn`.
pub fn setup_logging() {
    SUBSCRIBER_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}=info", name = env!("CARGO_CRATE_NAME"))));

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(ErrorLayer::default())
            .with(fmt::layer().event_format(CustomFormatter));

        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Failed to install tracing subscriber: {e}");
        }
    });
}
