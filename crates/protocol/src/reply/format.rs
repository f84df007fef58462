use ::core::fmt;
use std::io::{self, Write};

use crate::tables::EOL;

use super::types::{Reply, Response, UserId};

/// Writes the canonical reply line for `response`, including the trailing CR LF.
///
/// Fields are separated by `" : "`, mirroring the layout used in RFC 1413's
/// examples, so the output parses back to an identical [`Response`].
/// Identifiers in a declared charset are written as their raw octets.
pub fn write_ident_reply<W: Write>(writer: &mut W, response: &Response) -> io::Result<()> {
    write!(
        writer,
        "{}, {} : {} : ",
        response.server_port(),
        response.client_port(),
        response.status()
    )?;

    match response.reply() {
        Reply::UserId(user) => {
            writer.write_all(user.opsys().as_bytes())?;
            if let Some(charset) = user.charset() {
                writer.write_all(b",")?;
                writer.write_all(charset.as_bytes())?;
            }
            writer.write_all(b" : ")?;
            writer.write_all(user.userid().as_bytes())?;
        }
        Reply::Error(error) => writer.write_all(error.token().as_bytes())?,
    }

    writer.write_all(EOL)
}

/// Renders the canonical reply line for `response` into an owned buffer.
///
/// # Examples
///
/// ```
/// use protocol::{format_ident_reply, parse_ident_reply};
///
/// let response = parse_ident_reply(b"6195,23:ERROR:NO-USER")?;
/// assert_eq!(format_ident_reply(&response), b"6195, 23 : ERROR : NO-USER\r\n");
/// # Ok::<_, protocol::ReplyError>(())
/// ```
#[must_use]
pub fn format_ident_reply(response: &Response) -> Vec<u8> {
    let mut rendered = Vec::with_capacity(64);
    write_ident_reply(&mut rendered, response).expect("Vec<u8> implements io::Write");
    rendered
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} : {} : ",
            self.server_port(),
            self.client_port(),
            self.status()
        )?;

        match self.reply() {
            Reply::UserId(user) => {
                f.write_str(user.opsys())?;
                if let Some(charset) = user.charset() {
                    write!(f, ",{charset}")?;
                }
                write!(f, " : {}", user.userid())
            }
            Reply::Error(error) => f.write_str(error.token()),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
