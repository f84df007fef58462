#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Socket side of an Ident Protocol client.
//!
//! [`IdentExchange`] performs one query/reply round trip over any tokio
//! stream: it writes the query rendered by the `protocol` crate, feeds the
//! received bytes into a [`protocol::ReplyBuffer`] and hands the completed
//! line to [`protocol::parse_ident_reply`]. [`exchange`] wraps the round trip
//! with TCP connection setup, an optional timeout and cooperative
//! cancellation.
//!
//! Events are emitted through `tracing` under the `ident::connect` and
//! `ident::reply` targets.
//!
//! # Examples
//!
//! ```no_run
//! use ident_io::{ExchangeOptions, exchange};
//! use protocol::IdentQuery;
//!
//! # async fn demo() -> Result<(), ident_io::ExchangeError> {
//! let response = exchange("192.0.2.7", 113, IdentQuery::new(6193, 23), &ExchangeOptions::new()).await?;
//! println!("{response}");
//! # Ok(())
//! # }
//! ```

mod driver;
mod error;
mod exchange;
mod state;

pub use driver::{ExchangeOptions, exchange};
pub use error::ExchangeError;
pub use exchange::IdentExchange;
pub use state::ExchangeState;
