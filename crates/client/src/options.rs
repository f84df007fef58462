use std::time::Duration;

use protocol::{DEFAULT_IDENT_PORT, IdentQuery};

use crate::error::IdentError;

/// Caller-supplied description of one ident request.
///
/// Every field is optional so that partially filled options can be checked
/// by [`validate`](Self::validate) before any socket is opened. Defaults:
/// identd port 113, abort threshold enabled, no timeout, reply ports trusted
/// as sent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RequestOptions {
    address: Option<String>,
    port: Option<u16>,
    server_port: Option<u16>,
    client_port: Option<u16>,
    abort: Option<bool>,
    timeout: Option<Duration>,
    verify_ports: bool,
}

impl RequestOptions {
    /// Empty options; at least the address and both queried ports must be set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Host running the identd.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// TCP port the identd listens on.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Port on the identd host side of the connection being asked about.
    #[must_use]
    pub const fn with_server_port(mut self, server_port: u16) -> Self {
        self.server_port = Some(server_port);
        self
    }

    /// Port on the local side of the connection being asked about.
    #[must_use]
    pub const fn with_client_port(mut self, client_port: u16) -> Self {
        self.client_port = Some(client_port);
        self
    }

    /// Enables or disables the unterminated-reply abort threshold.
    #[must_use]
    pub const fn with_abort(mut self, abort: bool) -> Self {
        self.abort = Some(abort);
        self
    }

    /// Bounds the whole request by a wall-clock timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Requires the reply to echo the queried port pair.
    #[must_use]
    pub const fn with_verify_ports(mut self, verify_ports: bool) -> Self {
        self.verify_ports = verify_ports;
        self
    }

    /// Checks required fields and applies defaults.
    ///
    /// The address is checked first, then the server port, then the client
    /// port; a port of zero counts as missing.
    ///
    /// # Errors
    ///
    /// Returns [`IdentError::UndefinedLocalAddress`],
    /// [`IdentError::UndefinedServerPort`] or [`IdentError::UndefinedLocalPort`]
    /// for the first missing field.
    pub fn validate(&self) -> Result<ValidatedRequest, IdentError> {
        let address = match self.address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => address.to_owned(),
            _ => return Err(IdentError::UndefinedLocalAddress),
        };
        let server_port = match self.server_port {
            Some(port) if port != 0 => port,
            _ => return Err(IdentError::UndefinedServerPort),
        };
        let client_port = match self.client_port {
            Some(port) if port != 0 => port,
            _ => return Err(IdentError::UndefinedLocalPort),
        };

        Ok(ValidatedRequest {
            address,
            port: self.port.unwrap_or(DEFAULT_IDENT_PORT),
            query: IdentQuery::new(server_port, client_port),
            abort: self.abort.unwrap_or(true),
            timeout: self.timeout,
            verify_ports: self.verify_ports,
        })
    }
}

/// Request options with defaults applied and required fields present.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidatedRequest {
    address: String,
    port: u16,
    query: IdentQuery,
    abort: bool,
    timeout: Option<Duration>,
    verify_ports: bool,
}

impl ValidatedRequest {
    /// Host running the identd.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// TCP port the identd listens on.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Port pair sent in the query.
    #[must_use]
    pub const fn query(&self) -> IdentQuery {
        self.query
    }

    /// Whether oversized unterminated replies are aborted.
    #[must_use]
    pub const fn abort(&self) -> bool {
        self.abort
    }

    /// Wall-clock bound, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether the reply must echo the queried port pair.
    #[must_use]
    pub const fn verify_ports(&self) -> bool {
        self.verify_ports
    }
}
