use ident_io::{ExchangeOptions, exchange};
use protocol::Response;
use tokio_util::sync::CancellationToken;

use crate::error::IdentError;
use crate::options::{RequestOptions, ValidatedRequest};

const REQUEST_TARGET: &str = "ident::request";

/// Asks the identd described by `options` who owns the queried connection.
///
/// Both `USERID` and `ERROR` replies are successful outcomes; an `ERROR`
/// reply is the identd's answer, not a failure of the request.
///
/// # Errors
///
/// Configuration errors are reported before any connection is attempted.
/// Transport failures, oversized replies, grammar violations, timeouts and
/// (with port verification enabled) mismatched reply ports are reported
/// afterwards.
pub async fn request(options: &RequestOptions) -> Result<Response, IdentError> {
    let request = options.validate()?;
    execute(&request, None).await
}

/// Like [`request`], but resolves with a cancellation error as soon as
/// `token` is cancelled, closing the in-flight connection.
///
/// # Errors
///
/// As for [`request`], plus a cancellation error.
pub async fn request_with_cancellation(
    options: &RequestOptions,
    token: CancellationToken,
) -> Result<Response, IdentError> {
    let request = options.validate()?;
    execute(&request, Some(token)).await
}

/// Runs an already validated request.
///
/// # Errors
///
/// As for [`request_with_cancellation`], minus configuration errors.
pub async fn execute(
    request: &ValidatedRequest,
    cancel: Option<CancellationToken>,
) -> Result<Response, IdentError> {
    let query = request.query();
    tracing::debug!(
        target: REQUEST_TARGET,
        address = request.address(),
        port = request.port(),
        server_port = query.server_port(),
        client_port = query.client_port(),
        "sending ident query"
    );

    let mut options = ExchangeOptions::new()
        .with_abort(request.abort())
        .with_timeout(request.timeout());
    if let Some(token) = cancel {
        options = options.with_cancellation(token);
    }

    let response = match exchange(request.address(), request.port(), query, &options).await {
        Ok(response) => response,
        Err(err) => {
            tracing::debug!(
                target: REQUEST_TARGET,
                kind = err.kind().as_str(),
                error = %err,
                "ident request failed"
            );
            return Err(err.into());
        }
    };

    if request.verify_ports() && !response.matches_ports(query.server_port(), query.client_port())
    {
        tracing::warn!(
            target: REQUEST_TARGET,
            reply_server_port = response.server_port(),
            reply_client_port = response.client_port(),
            "ident reply names a different connection"
        );
        return Err(IdentError::PortMismatch {
            expected: query,
            server_port: response.server_port(),
            client_port: response.client_port(),
        });
    }

    tracing::debug!(
        target: REQUEST_TARGET,
        status = response.status().as_str(),
        "ident reply accepted"
    );
    Ok(response)
}
