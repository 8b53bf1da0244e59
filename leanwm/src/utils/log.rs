use anyhow::{Context, Result};
use tracing::{metadata::LevelFilter, Subscriber};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Environment variable holding the log filter, e.g. `LEANWM_LOG=leanwm_core=debug`.
pub const LOG_ENV: &str = "LEANWM_LOG";

/// Installs the global subscriber. Logs go to stderr.
///
/// # Errors
///
/// Fails if `LEANWM_LOG` is not a valid filter or a subscriber is already installed.
pub fn setup_logging() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_ENV)
        .from_env()
        .with_context(|| format!("invalid {LOG_ENV}"))?;
    tracing::subscriber::set_global_default(get_subscriber(filter))
        .context("couldn't setup global subscriber (logger)")?;
    Ok(())
}

fn get_subscriber(filter: EnvFilter) -> impl Subscriber {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
}
