use ::core::fmt;

use std::io;

/// Stable identifiers for every failure an ident request can surface.
///
/// The identifiers returned by [`ErrorKind::as_str`] are the names callers
/// match on when they log or forward a failure, independent of the concrete
/// error type that carried it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// No remote address was supplied.
    UndefinedLocalAddress,
    /// No server port (the port on the identd host) was supplied.
    UndefinedServerPort,
    /// No client port (the port on the connecting host) was supplied.
    UndefinedLocalPort,
    /// The reply grew past the abort threshold without a terminator.
    InvalidResponseLength,
    /// The reply status was neither `USERID` nor `ERROR`.
    InvalidStatusResponse,
    /// The opsys field named an unknown operating system.
    InvalidOpsysResponse,
    /// The charset field named an unknown character set.
    InvalidCharsetResponse,
    /// The userid was empty or longer than 512 octets.
    InvalidUseridLength,
    /// The error token was neither well known nor a valid `X` extension.
    InvalidErrorToken,
    /// The reply port pair was not two decimal integers.
    InvalidPortPair,
    /// The reply echoed a port pair other than the one queried.
    PortMismatch,
    /// A socket-level failure while connecting, writing or reading.
    Transport,
    /// The request was cancelled by the caller.
    Cancelled,
    /// The request exceeded its wall-clock timeout.
    TimedOut,
}

impl ErrorKind {
    /// Returns the canonical identifier for the error kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UndefinedLocalAddress => "UNDEFINED_LOCAL_ADDRESS",
            Self::UndefinedServerPort => "UNDEFINED_SERVER_PORT",
            Self::UndefinedLocalPort => "UNDEFINED_LOCAL_PORT",
            Self::InvalidResponseLength => "INVALID_RESPONSE_LENGTH",
            Self::InvalidStatusResponse => "INVALID_STATUS_RESPONSE",
            Self::InvalidOpsysResponse => "INVALID_OPSYS_RESPONSE",
            Self::InvalidCharsetResponse => "INVALID_CHARSET_RESPONSE",
            Self::InvalidUseridLength => "INVALID_USERID_LENGTH",
            Self::InvalidErrorToken => "INVALID_ERROR_TOKEN",
            Self::InvalidPortPair => "INVALID_PORT_PAIR",
            Self::PortMismatch => "PORT_MISMATCH",
            Self::Transport => "TRANSPORT_ERROR",
            Self::Cancelled => "CANCELLED",
            Self::TimedOut => "TIMED_OUT",
        }
    }

    /// Reports whether the kind describes a malformed reply from the peer.
    #[must_use]
    pub const fn is_protocol(self) -> bool {
        matches!(
            self,
            Self::InvalidResponseLength
                | Self::InvalidStatusResponse
                | Self::InvalidOpsysResponse
                | Self::InvalidCharsetResponse
                | Self::InvalidUseridLength
                | Self::InvalidErrorToken
                | Self::InvalidPortPair
                | Self::PortMismatch
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammar violations detected while parsing a single ident reply line.
///
/// Each variant carries the offending field exactly as it was decoded so
/// diagnostics can echo what the peer sent.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ReplyError {
    /// The port pair was not `<integer> , <integer>`.
    #[error("malformed ident port pair: {input:?}")]
    InvalidPortPair {
        /// The trimmed port-pair text.
        input: String,
    },
    /// The status field was neither `USERID` nor `ERROR`.
    #[error("invalid ident reply status: {status:?}")]
    InvalidStatus {
        /// The trimmed status text.
        status: String,
    },
    /// The opsys field is not `OTHER` and not a known operating system.
    #[error("invalid ident opsys token: {opsys:?}")]
    InvalidOpsys {
        /// The trimmed opsys token.
        opsys: String,
    },
    /// The charset field is not a known character set.
    #[error("invalid ident charset token: {charset:?}")]
    InvalidCharset {
        /// The trimmed charset token.
        charset: String,
    },
    /// The userid was empty or longer than the protocol allows.
    #[error("ident userid length {length} outside the permitted 1-512 octets")]
    InvalidUserIdLength {
        /// The userid length in octets.
        length: usize,
    },
    /// The error token is neither well known nor a valid `X` extension.
    #[error("invalid ident error token: {token:?}")]
    InvalidErrorToken {
        /// The trimmed error token.
        token: String,
    },
}

impl ReplyError {
    /// Returns the identifier matching this grammar violation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPortPair { .. } => ErrorKind::InvalidPortPair,
            Self::InvalidStatus { .. } => ErrorKind::InvalidStatusResponse,
            Self::InvalidOpsys { .. } => ErrorKind::InvalidOpsysResponse,
            Self::InvalidCharset { .. } => ErrorKind::InvalidCharsetResponse,
            Self::InvalidUserIdLength { .. } => ErrorKind::InvalidUseridLength,
            Self::InvalidErrorToken { .. } => ErrorKind::InvalidErrorToken,
        }
    }
}

impl From<ReplyError> for io::Error {
    fn from(err: ReplyError) -> Self {
        Self::new(io::ErrorKind::InvalidData, err)
    }
}

/// The peer sent more than the abort threshold without terminating its reply.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("ident reply exceeded {limit} bytes without a line terminator ({length} bytes buffered)")]
pub struct ResponseLengthExceeded {
    /// Number of bytes buffered when the threshold tripped.
    pub length: usize,
    /// The configured abort threshold.
    pub limit: usize,
}

impl ResponseLengthExceeded {
    /// Always [`ErrorKind::InvalidResponseLength`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidResponseLength
    }
}

impl From<ResponseLengthExceeded> for io::Error {
    fn from(err: ResponseLengthExceeded) -> Self {
        Self::new(io::ErrorKind::InvalidData, err)
    }
}
