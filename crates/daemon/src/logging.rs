//! Structured logging bootstrap, matching the shape of
//! `rvoip-infra-common::logging::setup` (env-filter over `tracing`), kept
//! local to this binary since that crate's own module can't be pulled in
//! as a dependency right now (see DESIGN.md).

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

pub fn install(level: &str) -> anyhow::Result<()> {
    let level = Level::from_str(level).map_err(|_| anyhow::anyhow!("invalid log level: {}", level))?;
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt::Subscriber::builder().with_env_filter(filter).init();
    Ok(())
}

pub fn log_welcome(app_name: &str, version: &str) {
    tracing::info!("Starting {} v{}", app_name, version);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_an_invalid_level() {
        assert!(Level::from_str("not-a-level").is_err());
    }
}
