#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Wire grammar of the Ident Protocol (RFC 1413).
//!
//! The crate performs no I/O. It renders the one-line query a client sends,
//! accumulates the reply bytes a transport receives until the CR LF
//! terminator shows up, and parses the finished line into a typed
//! [`Response`]. Socket handling lives in the `ident_io` crate, which drives
//! these building blocks over a TCP connection.
//!
//! # Examples
//!
//! Render a query and parse the reply an identd sent back for it:
//!
//! ```
//! use protocol::{IdentQuery, ReplyBuffer, ReplyProgress, format_ident_request, parse_ident_reply};
//!
//! let query = IdentQuery::new(6193, 23);
//! assert_eq!(format_ident_request(query), "6193, 23\r\n");
//!
//! let mut buffer = ReplyBuffer::new();
//! assert_eq!(buffer.push(b"6193, 23 : USERID : UN")?, ReplyProgress::NeedMore);
//! let ReplyProgress::Complete(line) = buffer.push(b"IX : stjohns\r\n")? else {
//!     panic!("terminator was sent");
//! };
//!
//! let response = parse_ident_reply(&line)?;
//! assert_eq!(response.to_string(), "6193, 23 : USERID : UNIX : stjohns");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Replies that break the grammar surface a [`ReplyError`] whose
//! [`kind`](ReplyError::kind) names the failing field:
//!
//! ```
//! use protocol::{ErrorKind, parse_ident_reply};
//!
//! let err = parse_ident_reply(b"1,2:USERID:UNIX,KLINGON:bob").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidCharsetResponse);
//! assert_eq!(err.kind().as_str(), "INVALID_CHARSET_RESPONSE");
//! ```

mod buffer;
mod error;
mod reply;
mod request;
pub mod tables;
pub mod validation;

pub use buffer::{ReplyBuffer, ReplyProgress};
pub use error::{ErrorKind, ReplyError, ResponseLengthExceeded};
pub use reply::{
    ErrorReply, Reply, ReplyStatus, Response, UserId, UserIdReply, format_ident_reply,
    parse_ident_reply, write_ident_reply,
};
pub use request::{IdentQuery, format_ident_request, parse_ident_request, write_ident_request};
pub use tables::{ABORT_THRESHOLD, DEFAULT_IDENT_PORT, READ_CHUNK_LEN};
