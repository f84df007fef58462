use std::time::Duration;

use protocol::{IdentQuery, Response};
use tokio_util::sync::CancellationToken;

use crate::error::ExchangeError;
use crate::exchange::IdentExchange;

/// Knobs applied to a single [`exchange`].
#[derive(Clone, Debug)]
pub struct ExchangeOptions {
    abort: bool,
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl Default for ExchangeOptions {
    fn default() -> Self {
        Self {
            abort: true,
            timeout: None,
            cancel: None,
        }
    }
}

impl ExchangeOptions {
    /// Options with the abort threshold enabled and no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the unterminated-reply abort threshold.
    #[must_use]
    pub const fn with_abort(mut self, abort: bool) -> Self {
        self.abort = abort;
        self
    }

    /// Bounds the whole exchange, connect included, by `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attaches a token whose cancellation ends the exchange early.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Whether oversized unterminated replies are aborted.
    #[must_use]
    pub const fn abort(&self) -> bool {
        self.abort
    }

    /// Configured overall timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Cancellation token, if one was attached.
    #[must_use]
    pub const fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }
}

/// Connects to the identd at `address:port`, sends `query` and parses the reply.
///
/// Cancellation wins over a reply that becomes ready at the same moment. When
/// the token fires or the timeout elapses, the in-flight future is dropped,
/// which closes the socket.
///
/// # Errors
///
/// Returns [`ExchangeError::Io`] for connection and socket failures,
/// [`ExchangeError::ResponseLength`] when the abort threshold trips,
/// [`ExchangeError::Reply`] when the reply breaks the grammar, and
/// [`ExchangeError::Cancelled`] or [`ExchangeError::TimedOut`] when the
/// exchange was cut short.
pub async fn exchange(
    address: &str,
    port: u16,
    query: IdentQuery,
    options: &ExchangeOptions,
) -> Result<Response, ExchangeError> {
    let mut exchange = IdentExchange::new(options.abort);
    let work = exchange.perform(address, port, query);

    let bounded = async {
        match options.timeout {
            Some(limit) => match tokio::time::timeout(limit, work).await {
                Ok(result) => result,
                Err(_elapsed) => {
                    tracing::debug!(
                        target: "ident::connect",
                        timeout_ms = limit.as_millis(),
                        "ident exchange timed out"
                    );
                    Err(ExchangeError::TimedOut(limit))
                }
            },
            None => work.await,
        }
    };

    match &options.cancel {
        Some(token) => {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    tracing::debug!(target: "ident::connect", "ident exchange cancelled");
                    Err(ExchangeError::Cancelled)
                }
                result = bounded => result,
            }
        }
        None => bounded.await,
    }
}
