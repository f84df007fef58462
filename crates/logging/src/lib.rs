#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` turns the `-v` count and `--debug` tokens accepted by `oc-ident`
//! into a `tracing` filter and installs the process-wide subscriber. The
//! library crates (`protocol`, `ident_io`, `client`) only emit events under
//! three targets, one per [`DebugFlag`]:
//!
//! | flag      | target           | events                                  |
//! |-----------|------------------|-----------------------------------------|
//! | `connect` | `ident::connect` | connection setup, state changes         |
//! | `reply`   | `ident::reply`   | reply buffering, abort threshold        |
//! | `request` | `ident::request` | request validation and outcome          |
//!
//! # Invariants
//!
//! - Output always goes to stderr; stdout carries only the reply.
//! - A non-empty `RUST_LOG` overrides the flags entirely.
//! - Warnings are shown even without `-v`.
//!
//! # Examples
//!
//! ```
//! use logging::{DebugFlag, VerbosityConfig};
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_debug_flag("reply2").unwrap();
//!
//! assert_eq!(config.debug.get(DebugFlag::Reply), 2);
//! assert_eq!(config.directives(), "warn,ident::reply=trace,ident::request=debug");
//! ```

mod config;
mod levels;
mod tracing_bridge;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, tracing_level};
pub use tracing_bridge::{
    FILTER_ENV, env_filter, flag_filter, init_tracing, init_tracing_with_filter,
};
