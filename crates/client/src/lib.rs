#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Ident Protocol (RFC 1413) request client.
//!
//! Callers describe the connection they want identified with
//! [`RequestOptions`], then call [`request`]. Options are validated and
//! defaulted before any I/O: the identd port defaults to 113 and the
//! unterminated-reply abort threshold is on. The returned
//! [`Response`](protocol::Response) carries either the `USERID` or the
//! `ERROR` branch of the reply; failures carry an [`IdentError`] whose
//! [`kind`](IdentError::kind) is one of the stable identifiers in
//! [`ErrorKind`](protocol::ErrorKind).
//!
//! Every call is independent: it owns its socket and reply buffer, so any
//! number of requests may run concurrently.
//!
//! # Examples
//!
//! ```no_run
//! use client::{RequestOptions, request};
//!
//! # async fn demo() -> Result<(), client::IdentError> {
//! let options = RequestOptions::new()
//!     .with_address("192.0.2.7")
//!     .with_server_port(6193)
//!     .with_client_port(23);
//!
//! let response = request(&options).await?;
//! match response.user_id() {
//!     Some(user) => println!("{} ({})", user.userid(), user.opsys()),
//!     None => println!("identd said {}", response),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Missing fields are rejected without touching the network:
//!
//! ```
//! use client::RequestOptions;
//! use protocol::ErrorKind;
//!
//! let err = RequestOptions::new().with_address("localhost").validate().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UndefinedServerPort);
//! ```

mod error;
mod options;
mod request;

pub use error::IdentError;
pub use options::{RequestOptions, ValidatedRequest};
pub use request::{execute, request, request_with_cancellation};
