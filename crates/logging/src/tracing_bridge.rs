//! crates/logging/src/tracing_bridge.rs
//! Installs a `tracing` subscriber driven by a [`VerbosityConfig`].
//!
//! Library crates only emit events; the binary calls [`init_tracing`] once at
//! startup. The subscriber writes compact lines to stderr so stdout stays
//! reserved for the reply.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2))?;
//! tracing::debug!(target: "ident::connect", "connected to identd");
//! ```

use std::env;
use std::io;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use super::config::VerbosityConfig;

/// Environment variable whose directives replace the verbosity flags.
pub const FILTER_ENV: &str = "RUST_LOG";

/// Builds the filter for `config`.
///
/// A non-empty `RUST_LOG` wins over the flags; if it fails to parse, the
/// flag-derived directives are used instead.
#[must_use]
pub fn env_filter(config: &VerbosityConfig) -> EnvFilter {
    let from_env = env::var(FILTER_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok());

    from_env.unwrap_or_else(|| flag_filter(config))
}

/// Filter derived from the verbosity flags alone.
#[must_use]
pub fn flag_filter(config: &VerbosityConfig) -> EnvFilter {
    EnvFilter::try_new(config.directives()).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber, writing to stderr.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing(config: VerbosityConfig) -> Result<(), TryInitError> {
    init_tracing_with_filter(env_filter(&config))
}

/// Installs the global subscriber with an explicit filter, writing to stderr.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing_with_filter(filter: EnvFilter) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(io::stderr))
        .try_init()
}

fn fmt_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'writer> MakeWriter<'writer> + 'static,
{
    tracing_subscriber::fmt::layer()
        .compact()
        .without_time()
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
}
