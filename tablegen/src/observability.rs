//! Logging setup
//!
//! Structured logging through `tracing`: pretty output in debug builds, JSON in
//! release builds. Logs go to stderr so generated content written to stdout
//! stays clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
#[must_use]
pub const fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug,tablegen=trace"
    } else {
        "info"
    }
}

/// Filter for verbose runs, at least as detailed as [`default_filter`] in
/// every build
#[must_use]
pub const fn verbose_filter() -> &'static str {
    "debug,tablegen=trace,tablegen_cli_lib=trace"
}

/// Initialize logging with the build's default filter
///
/// `RUST_LOG` overrides the default.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
///
/// # Example
///
/// ```rust,no_run
/// use tablegen::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("generator started");
/// # Ok(())
/// # }
/// ```
pub fn init() -> anyhow::Result<()> {
    init_with_default(default_filter())
}

/// Initialize logging with an explicit fallback filter
///
/// # Errors
///
/// Returns an error if `default` is not a valid filter directive or a global
/// subscriber is already installed.
pub fn init_with_default(default: &str) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default)?,
    };

    #[cfg(debug_assertions)]
    {
        // Pretty formatting for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?;
    }

    #[cfg(not(debug_assertions))]
    {
        // JSON formatting for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}
