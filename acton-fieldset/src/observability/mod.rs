//! Observability (structured logging)
//!
//! The crate emits `tracing` events: descriptor cache population and template
//! reloads at debug level, per-field resolution at trace level, and fetcher
//! misuse as warnings. [`init`] installs a subscriber for binaries and tests
//! that do not bring their own.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
#[must_use]
pub fn default_filter() -> EnvFilter {
    if cfg!(debug_assertions) {
        EnvFilter::new("debug,acton_fieldset=trace")
    } else {
        EnvFilter::new("info")
    }
}

/// Initialize logging
///
/// Sets up:
/// - Structured logging with JSON formatting (production) or pretty formatting (dev)
/// - Environment-based log level filtering through `RUST_LOG`
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
///
/// # Example
///
/// ```rust,no_run
/// use acton_fieldset::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("Application started");
/// # Ok(())
/// # }
/// ```
pub fn init() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    #[cfg(debug_assertions)]
    {
        // Pretty formatting for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()?;
    }

    #[cfg(not(debug_assertions))]
    {
        // JSON formatting for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_mentions_crate() {
        let filter = default_filter().to_string();
        if cfg!(debug_assertions) {
            assert!(filter.contains("acton_fieldset=trace"));
        } else {
            assert_eq!(filter, "info");
        }
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init();
        assert!(init().is_err());
    }
}
