use std::borrow::Cow;
use std::io::{self, Write};

use client::IdentError;
use protocol::{Response, UserId};

use crate::args::{OutputFormat, PROGRAM_NAME};

/// Writes a successful reply to stdout in the selected format.
pub(crate) fn write_response<W: Write>(
    out: &mut W,
    response: &Response,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Human => writeln!(out, "{}", render_human(response)),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, response)?;
            writeln!(out)
        }
    }
}

/// Writes a request failure; JSON mode puts a machine-readable object on stdout.
pub(crate) fn write_failure<Out, Err>(
    stdout: &mut Out,
    stderr: &mut Err,
    error: &IdentError,
    format: OutputFormat,
) -> io::Result<()>
where
    Out: Write,
    Err: Write,
{
    let kind = error.kind();
    if format == OutputFormat::Json {
        let body = serde_json::json!({
            "error": kind.as_str(),
            "message": error.to_string(),
        });
        serde_json::to_writer(&mut *stdout, &body)?;
        writeln!(stdout)?;
    }
    writeln!(stderr, "{PROGRAM_NAME}: {kind}: {error}")
}

/// Canonical reply line, with charset-tagged userids decoded where possible.
pub(crate) fn render_human(response: &Response) -> String {
    match response.user_id() {
        Some(user) if user.charset().is_some() => format!(
            "{}, {} : {} : {},{} : {}",
            response.server_port(),
            response.client_port(),
            response.status(),
            user.opsys(),
            user.charset().unwrap_or_default(),
            decoded_userid(user.userid())
        ),
        _ => response.to_string(),
    }
}

#[cfg(feature = "charset")]
fn decoded_userid(userid: &UserId) -> Cow<'_, str> {
    userid.decode().unwrap_or_else(|| userid.to_string_lossy())
}

#[cfg(not(feature = "charset"))]
fn decoded_userid(userid: &UserId) -> Cow<'_, str> {
    userid.to_string_lossy()
}
