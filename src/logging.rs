use anyhow::Result;
use std::error::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Sink for store diagnostics. Implementations must not panic or block for long.
pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
    fn log_error(&self, message: &str, error: &(dyn Error + 'static));
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        info!("{message}");
    }

    fn log_error(&self, message: &str, err: &(dyn Error + 'static)) {
        error!(error = %error_chain(err), "{message}");
    }
}

pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(())
}
