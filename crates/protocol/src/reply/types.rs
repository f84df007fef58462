use ::core::fmt;
use std::borrow::Cow;

use crate::tables::{ERROR_TOKENS, STATUS_ERROR, STATUS_USERID};

/// Status field of an ident reply.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ReplyStatus {
    /// `USERID`: the lookup succeeded.
    UserId,
    /// `ERROR`: the lookup failed.
    Error,
}

impl ReplyStatus {
    /// Returns the status exactly as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserId => STATUS_USERID,
            Self::Error => STATUS_ERROR,
        }
    }
}

impl fmt::Display for ReplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated ident reply.
///
/// Values are only produced by [`parse_ident_reply`](super::parse_ident_reply),
/// so every field has already passed the grammar checks. The port pair is the
/// one echoed by the peer, which is not necessarily the one that was queried.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Response {
    server_port: u32,
    client_port: u32,
    #[cfg_attr(feature = "serde", serde(flatten))]
    reply: Reply,
}

impl Response {
    pub(crate) const fn new(server_port: u32, client_port: u32, reply: Reply) -> Self {
        Self {
            server_port,
            client_port,
            reply,
        }
    }

    /// Server port echoed by the peer.
    #[must_use]
    pub const fn server_port(&self) -> u32 {
        self.server_port
    }

    /// Client port echoed by the peer.
    #[must_use]
    pub const fn client_port(&self) -> u32 {
        self.client_port
    }

    /// Reply status.
    #[must_use]
    pub const fn status(&self) -> ReplyStatus {
        match self.reply {
            Reply::UserId(_) => ReplyStatus::UserId,
            Reply::Error(_) => ReplyStatus::Error,
        }
    }

    /// Status-specific payload.
    #[must_use]
    pub const fn reply(&self) -> &Reply {
        &self.reply
    }

    /// Consumes the response and returns the status-specific payload.
    #[must_use]
    pub fn into_reply(self) -> Reply {
        self.reply
    }

    /// Returns the `USERID` payload, if this is a successful lookup.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserIdReply> {
        match &self.reply {
            Reply::UserId(reply) => Some(reply),
            Reply::Error(_) => None,
        }
    }

    /// Returns the `ERROR` payload, if the lookup failed.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorReply> {
        match &self.reply {
            Reply::Error(reply) => Some(reply),
            Reply::UserId(_) => None,
        }
    }

    /// Reports whether the echoed port pair matches the queried one.
    #[must_use]
    pub fn matches_ports(&self, server_port: u16, client_port: u16) -> bool {
        self.server_port == u32::from(server_port) && self.client_port == u32::from(client_port)
    }
}

/// Payload of an ident reply, one variant per status.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "status"))]
pub enum Reply {
    /// `USERID` reply.
    #[cfg_attr(feature = "serde", serde(rename = "USERID"))]
    UserId(UserIdReply),
    /// `ERROR` reply.
    #[cfg_attr(feature = "serde", serde(rename = "ERROR"))]
    Error(ErrorReply),
}

/// Fields of a `USERID` reply.
///
/// Serializes flat: `opsys`, then `charset` when one was declared, then
/// `userid` as a string or, for declared charsets, as its raw octets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserIdReply {
    opsys: String,
    userid: UserId,
}

impl UserIdReply {
    pub(crate) const fn new(opsys: String, userid: UserId) -> Self {
        Self { opsys, userid }
    }

    /// Operating-system token, `OTHER` for unformatted identifiers.
    #[must_use]
    pub fn opsys(&self) -> &str {
        &self.opsys
    }

    /// Character set declared by the peer, if any.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.userid.charset()
    }

    /// The user identifier.
    #[must_use]
    pub const fn userid(&self) -> &UserId {
        &self.userid
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UserIdReply {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let charset = self.userid.charset();
        let len = if charset.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("UserIdReply", len)?;
        state.serialize_field("opsys", &self.opsys)?;
        if let Some(charset) = charset {
            state.serialize_field("charset", charset)?;
        } else {
            state.skip_field("charset")?;
        }
        match &self.userid {
            UserId::Text(text) => state.serialize_field("userid", text)?,
            UserId::Encoded { bytes, .. } => state.serialize_field("userid", bytes)?,
        }
        state.end()
    }
}

/// A user identifier as carried by a `USERID` reply.
///
/// When the reply declares a charset the octets are kept undecoded and it is
/// up to the caller to interpret them; otherwise they are decoded as UTF-8.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UserId {
    /// Identifier decoded with the default charset.
    Text(String),
    /// Raw identifier octets in a declared charset.
    Encoded {
        /// Declared charset token.
        charset: String,
        /// Undecoded identifier octets.
        bytes: Vec<u8>,
    },
}

impl UserId {
    /// Declared charset, `None` for default-charset identifiers.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Encoded { charset, .. } => Some(charset),
        }
    }

    /// Identifier text when it was decoded with the default charset.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Encoded { .. } => None,
        }
    }

    /// Identifier octets as they appear on the wire.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Encoded { bytes, .. } => bytes,
        }
    }

    /// Decodes the identifier using its declared charset.
    ///
    /// Default-charset identifiers are returned borrowed. `None` is returned
    /// when the declared charset has no decoder.
    #[cfg(feature = "charset")]
    #[must_use]
    pub fn decode(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(text) => Some(Cow::Borrowed(text)),
            Self::Encoded { charset, bytes } => {
                let encoding = encoding_rs::Encoding::for_label(charset.as_bytes())?;
                let (decoded, _had_errors) = encoding.decode_without_bom_handling(bytes);
                Some(decoded)
            }
        }
    }

    /// Renders the identifier for display, replacing undecodable octets.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Encoded { bytes, .. } => String::from_utf8_lossy(bytes),
        }
    }
}

/// Fields of an `ERROR` reply.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ErrorReply {
    error: String,
}

impl ErrorReply {
    pub(crate) const fn new(error: String) -> Self {
        Self { error }
    }

    /// The error token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.error
    }

    /// Reports whether the token is an implementation-defined `X` extension.
    #[must_use]
    pub fn is_extension(&self) -> bool {
        !ERROR_TOKENS.contains(&self.error.as_str())
    }
}
