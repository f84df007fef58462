use ident_io::ExchangeError;
use protocol::{ErrorKind, IdentQuery};

/// Failure of an ident request.
#[derive(Debug, thiserror::Error)]
pub enum IdentError {
    /// The options named no identd address.
    #[error("ident request has no remote address")]
    UndefinedLocalAddress,
    /// The options named no server port.
    #[error("ident request has no server port")]
    UndefinedServerPort,
    /// The options named no client port.
    #[error("ident request has no client port")]
    UndefinedLocalPort,
    /// Connecting, reading or parsing the reply failed.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
    /// The reply described a different connection than the one queried.
    #[error(
        "ident reply names ports {server_port}, {client_port} but {}, {} was queried",
        .expected.server_port(),
        .expected.client_port()
    )]
    PortMismatch {
        /// Port pair that was sent.
        expected: IdentQuery,
        /// Server port echoed by the reply.
        server_port: u32,
        /// Client port echoed by the reply.
        client_port: u32,
    },
}

impl IdentError {
    /// Returns the identifier describing this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UndefinedLocalAddress => ErrorKind::UndefinedLocalAddress,
            Self::UndefinedServerPort => ErrorKind::UndefinedServerPort,
            Self::UndefinedLocalPort => ErrorKind::UndefinedLocalPort,
            Self::Exchange(err) => err.kind(),
            Self::PortMismatch { .. } => ErrorKind::PortMismatch,
        }
    }

    /// Reports whether the request was rejected before any I/O took place.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UndefinedLocalAddress | Self::UndefinedServerPort | Self::UndefinedLocalPort
        )
    }
}
