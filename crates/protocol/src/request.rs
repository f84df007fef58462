use ::core::fmt::{self, Write as FmtWrite};

use crate::error::ReplyError;
use crate::tables::EOL;

/// The port pair an ident query asks about.
///
/// `server_port` is the port on the identd host and `client_port` the port on
/// the querying host, matching the order in which RFC 1413 places them on the
/// wire.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IdentQuery {
    server_port: u16,
    client_port: u16,
}

impl IdentQuery {
    /// Creates a query for the given port pair.
    #[must_use]
    pub const fn new(server_port: u16, client_port: u16) -> Self {
        Self {
            server_port,
            client_port,
        }
    }

    /// Port on the identd host.
    #[must_use]
    pub const fn server_port(self) -> u16 {
        self.server_port
    }

    /// Port on the querying host.
    #[must_use]
    pub const fn client_port(self) -> u16 {
        self.client_port
    }
}

/// Writes the request line for `query` into `writer`, including the trailing CR LF.
///
/// The rendering places a single space after the comma (`"6193, 23\r\n"`),
/// which every identd accepts since whitespace between tokens is insignificant.
pub fn write_ident_request<W: FmtWrite>(writer: &mut W, query: IdentQuery) -> fmt::Result {
    write!(writer, "{}, {}", query.server_port, query.client_port)?;
    writer.write_str("\r\n")
}

/// Renders the request line for `query` into an owned buffer.
///
/// # Examples
///
/// ```
/// use protocol::{IdentQuery, format_ident_request};
///
/// assert_eq!(format_ident_request(IdentQuery::new(6193, 23)), "6193, 23\r\n");
/// ```
#[must_use]
pub fn format_ident_request(query: IdentQuery) -> String {
    let mut rendered = String::with_capacity(16);
    write_ident_request(&mut rendered, query).expect("String implements fmt::Write");
    rendered
}

/// Parses a request line as an identd would receive it.
///
/// A trailing CR LF is optional. The ports are returned as `(server, client)`
/// without range checks beyond a successful decimal parse.
pub fn parse_ident_request(line: &[u8]) -> Result<(u32, u32), ReplyError> {
    let line = line.strip_suffix(EOL.as_slice()).unwrap_or(line);
    parse_port_pair(&String::from_utf8_lossy(line))
}

pub(crate) fn parse_port_pair(text: &str) -> Result<(u32, u32), ReplyError> {
    let invalid = || ReplyError::InvalidPortPair {
        input: text.trim().to_owned(),
    };

    let (server, client) = text.split_once(',').ok_or_else(invalid)?;
    let server = parse_port(server).ok_or_else(invalid)?;
    let client = parse_port(client).ok_or_else(invalid)?;
    Ok((server, client))
}

fn parse_port(text: &str) -> Option<u32> {
    let digits = text.trim();
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
