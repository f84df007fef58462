use std::io;
use std::time::Duration;

use protocol::{ErrorKind, ReplyError, ResponseLengthExceeded};

/// Failures of a single ident exchange.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// Connecting, writing or reading failed at the socket level.
    #[error("ident transport failure: {0}")]
    Io(#[from] io::Error),
    /// The reply exceeded the abort threshold without a terminator.
    #[error(transparent)]
    ResponseLength(#[from] ResponseLengthExceeded),
    /// The reply line broke the protocol grammar.
    #[error(transparent)]
    Reply(#[from] ReplyError),
    /// The caller cancelled the exchange.
    #[error("ident request cancelled")]
    Cancelled,
    /// The exchange did not finish within the configured timeout.
    #[error("ident request timed out after {0:?}")]
    TimedOut(Duration),
}

impl ExchangeError {
    /// Returns the identifier describing this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Transport,
            Self::ResponseLength(err) => err.kind(),
            Self::Reply(err) => err.kind(),
            Self::Cancelled => ErrorKind::Cancelled,
            Self::TimedOut(_) => ErrorKind::TimedOut,
        }
    }

    /// Returns the underlying socket error, if the failure was a transport error.
    #[must_use]
    pub const fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_wrapped_error() {
        let io = ExchangeError::from(io::Error::from(io::ErrorKind::ConnectionRefused));
        assert_eq!(io.kind(), ErrorKind::Transport);
        assert_eq!(
            io.io_error().map(io::Error::kind),
            Some(io::ErrorKind::ConnectionRefused)
        );

        let length = ExchangeError::from(ResponseLengthExceeded {
            length: 1001,
            limit: 1000,
        });
        assert_eq!(length.kind(), ErrorKind::InvalidResponseLength);
        assert!(length.io_error().is_none());

        let reply = ExchangeError::from(ReplyError::InvalidErrorToken {
            token: "nope".to_owned(),
        });
        assert_eq!(reply.kind(), ErrorKind::InvalidErrorToken);

        assert_eq!(ExchangeError::Cancelled.kind(), ErrorKind::Cancelled);
        assert_eq!(
            ExchangeError::TimedOut(Duration::from_secs(1)).kind(),
            ErrorKind::TimedOut
        );
    }

    #[test]
    fn transparent_variants_keep_the_inner_message() {
        let err = ExchangeError::from(ReplyError::InvalidStatus {
            status: "FOOBAR".to_owned(),
        });
        assert_eq!(err.to_string(), "invalid ident reply status: \"FOOBAR\"");
    }
}
