use std::borrow::Cow;

use crate::error::ReplyError;
use crate::request::parse_port_pair;
use crate::tables::{STATUS_ERROR, STATUS_USERID};
use crate::validation::{
    is_valid_charset, is_valid_error_token, is_valid_opsys, is_valid_userid_length,
};

use super::types::{ErrorReply, Reply, Response, UserId, UserIdReply};

const FIELD_SEPARATOR: u8 = b':';

/// Parses one ident reply line whose CR LF terminator has already been removed.
///
/// The line is split on `:` into at most four fields. The last field keeps
/// any further colons, which matters for userids. Port pair, status, opsys and
/// charset are trimmed of surrounding whitespace. The userid keeps its
/// whitespace except for the single space that conventionally follows the
/// separator colon. That space is dropped in the compact layout too, so
/// `1,2:USERID:UNIX: bob` yields `bob`, and a userid consisting of one space
/// is read as empty and rejected with
/// [`InvalidUserIdLength`](ReplyError::InvalidUserIdLength).
///
/// The userid bound is counted in octets, so 300 two-octet characters exceed
/// it even though they decode to 300 characters.
///
/// The first field that violates the grammar determines the error; no
/// partially populated [`Response`] is ever produced.
///
/// # Examples
///
/// ```
/// use protocol::{ReplyStatus, parse_ident_reply};
///
/// let response = parse_ident_reply(b"6193, 23 : USERID : UNIX : stjohns")?;
/// assert_eq!(response.server_port(), 6193);
/// assert_eq!(response.client_port(), 23);
/// assert_eq!(response.status(), ReplyStatus::UserId);
///
/// let user = response.user_id().expect("USERID reply");
/// assert_eq!(user.opsys(), "UNIX");
/// assert_eq!(user.userid().as_text(), Some("stjohns"));
/// # Ok::<_, protocol::ReplyError>(())
/// ```
pub fn parse_ident_reply(line: &[u8]) -> Result<Response, ReplyError> {
    let mut fields = line.splitn(4, |byte| *byte == FIELD_SEPARATOR);

    let port_pair = decode_default(fields.next().unwrap_or_default());
    let (server_port, client_port) = parse_port_pair(&port_pair)?;

    let status = decode_default(fields.next().unwrap_or_default());
    let reply = match status.trim() {
        STATUS_USERID => {
            let opsys_field = fields.next().unwrap_or_default();
            let userid = fields.next().unwrap_or_default();
            Reply::UserId(parse_user_id_fields(opsys_field, userid)?)
        }
        STATUS_ERROR => Reply::Error(parse_error_field(fields.next().unwrap_or_default())?),
        other => {
            return Err(ReplyError::InvalidStatus {
                status: other.to_owned(),
            });
        }
    };

    Ok(Response::new(server_port, client_port, reply))
}

fn parse_user_id_fields(opsys_field: &[u8], userid: &[u8]) -> Result<UserIdReply, ReplyError> {
    let opsys_field = decode_default(opsys_field);
    let opsys_field = opsys_field.trim();
    let (opsys, charset) = match opsys_field.split_once(',') {
        Some((opsys, charset)) => (opsys.trim(), Some(charset.trim())),
        None => (opsys_field, None),
    };

    if !is_valid_opsys(opsys) {
        return Err(ReplyError::InvalidOpsys {
            opsys: opsys.to_owned(),
        });
    }

    let userid = strip_separator_space(userid);
    let userid = match charset {
        Some(charset) => {
            if !is_valid_charset(charset) {
                return Err(ReplyError::InvalidCharset {
                    charset: charset.to_owned(),
                });
            }
            UserId::Encoded {
                charset: charset.to_owned(),
                bytes: userid.to_vec(),
            }
        }
        None => {
            if !is_valid_userid_length(userid.len()) {
                return Err(ReplyError::InvalidUserIdLength {
                    length: userid.len(),
                });
            }
            UserId::Text(decode_default(userid).into_owned())
        }
    };

    Ok(UserIdReply::new(opsys.to_owned(), userid))
}

fn parse_error_field(field: &[u8]) -> Result<ErrorReply, ReplyError> {
    let token = decode_default(field);
    let token = token.trim();
    if !is_valid_error_token(token) {
        return Err(ReplyError::InvalidErrorToken {
            token: token.to_owned(),
        });
    }
    Ok(ErrorReply::new(token.to_owned()))
}

fn decode_default(field: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(field)
}

fn strip_separator_space(userid: &[u8]) -> &[u8] {
    userid.strip_prefix(b" ").unwrap_or(userid)
}
