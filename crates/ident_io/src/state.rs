use std::fmt;

/// Lifecycle of one ident exchange.
///
/// ```text
/// Idle -> Connecting -> AwaitingReply -> Complete | Aborted | TransportFailed
/// ```
///
/// The three right-most states are terminal; a new request needs a new
/// exchange.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ExchangeState {
    /// Nothing has happened yet.
    #[default]
    Idle,
    /// A TCP connection is being established.
    Connecting,
    /// The query was sent and reply bytes are being accumulated.
    AwaitingReply,
    /// The reply line was received and handed to the parser.
    Complete,
    /// The reply exceeded the abort threshold and the socket was dropped.
    Aborted,
    /// A socket error ended the exchange.
    TransportFailed,
}

impl ExchangeState {
    /// Reports whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Aborted | Self::TransportFailed)
    }

    /// Short lowercase name used in log events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::AwaitingReply => "awaiting-reply",
            Self::Complete => "complete",
            Self::Aborted => "aborted",
            Self::TransportFailed => "transport-failed",
        }
    }
}

impl fmt::Display for ExchangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_end_states_are_terminal() {
        assert!(!ExchangeState::Idle.is_terminal());
        assert!(!ExchangeState::Connecting.is_terminal());
        assert!(!ExchangeState::AwaitingReply.is_terminal());
        assert!(ExchangeState::Complete.is_terminal());
        assert!(ExchangeState::Aborted.is_terminal());
        assert!(ExchangeState::TransportFailed.is_terminal());
    }

    #[test]
    fn default_state_is_idle() {
        assert_eq!(ExchangeState::default(), ExchangeState::Idle);
        assert_eq!(ExchangeState::AwaitingReply.to_string(), "awaiting-reply");
    }
}
