use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, fmt::time::UtcTime, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Install the global subscriber. `RUST_LOG` wins over `default_directives`.
/// Later calls are no-ops.
pub fn init_logging(default_directives: &str) {
  LOGGER_INIT.get_or_init(|| {
    let env_filter =
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    // Another subscriber may already be installed (tests, embedding apps)
    let _ = tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt::layer().with_target(true).with_timer(UtcTime::rfc_3339()))
      .try_init();
  });
}
