#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line frontend of the `oc-ident` binary. It
//! parses `oc-ident [OPTIONS] ADDRESS SERVER_PORT CLIENT_PORT` with a
//! [`clap`](https://docs.rs/clap/) command definition, turns the operands into
//! [`client::RequestOptions`], runs the request on a current-thread tokio
//! runtime and prints the reply.
//!
//! # Design
//!
//! [`run`] accepts the argument iterator together with handles for standard
//! output and error so tests can drive it in-process. The binary forwards the
//! returned status through [`exit_code_from`]. Pressing Ctrl-C cancels the
//! in-flight request, which closes its connection.
//!
//! # Invariants
//!
//! - `run` never panics; I/O failures surface as non-zero exit codes.
//! - Stdout carries only the reply (or, with `--json`, the failure object);
//!   diagnostics go to stderr.
//! - `ERROR` replies are well-formed answers and exit with status 0.
//!
//! # Errors
//!
//! Usage errors exit with status `2`; request failures exit with `1` and name
//! the failure kind (for example `TRANSPORT_ERROR`) on stderr.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["oc-ident", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(stdout.starts_with(b"oc-ident "));
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;

use client::{IdentError, RequestOptions, ValidatedRequest};
use protocol::Response;
use tokio_util::sync::CancellationToken;

mod args;
mod output;

use args::{HELP_TEXT, PROGRAM_NAME, ParsedArgs, parse_args};
use output::{write_failure, write_response};

/// Exit status for a well-formed reply.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status when the request failed.
pub const EXIT_FAILURE: i32 = 1;
/// Exit status for command-line usage errors.
pub const EXIT_USAGE: i32 = 2;

const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit status.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let _ = write!(stderr, "{}", error.render());
            EXIT_USAGE
        }
    }
}

/// Converts a status returned by [`run`] into an [`ExitCode`](std::process::ExitCode).
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let ParsedArgs {
        show_help,
        show_version,
        format,
        verbosity,
        options,
    } = parsed;

    if show_help {
        return match stdout.write_all(HELP_TEXT.as_bytes()) {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_FAILURE,
        };
    }

    if show_version {
        return match writeln!(stdout, "{PROGRAM_NAME} {}", env!("CARGO_PKG_VERSION")) {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_FAILURE,
        };
    }

    // A subscriber may already be installed when `run` is called repeatedly in-process.
    let _ = logging::init_tracing(verbosity);

    match resolve(&options) {
        Ok(response) => match write_response(stdout, &response, format) {
            Ok(()) => EXIT_SUCCESS,
            Err(error) => {
                let _ = writeln!(stderr, "{PROGRAM_NAME}: failed to write reply: {error}");
                EXIT_FAILURE
            }
        },
        Err(error) => {
            let _ = write_failure(stdout, stderr, &error, format);
            EXIT_FAILURE
        }
    }
}

/// Validates `options` and runs the request on a current-thread runtime.
fn resolve(options: &RequestOptions) -> Result<Response, IdentError> {
    let request = options.validate()?;

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => return Err(IdentError::Exchange(error.into())),
    };

    runtime.block_on(request_until_interrupted(&request))
}

async fn request_until_interrupted(request: &ValidatedRequest) -> Result<Response, IdentError> {
    let token = CancellationToken::new();
    let interrupt = token.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!(target: "ident::request", "interrupted; cancelling ident request");
            interrupt.cancel();
        }
    });

    let result = client::execute(request, Some(token)).await;
    watcher.abort();
    result
}

#[cfg(test)]
mod tests;
