mod format;
mod parse;
mod types;

pub use format::{format_ident_reply, write_ident_reply};
pub use parse::parse_ident_reply;
pub use types::{ErrorReply, Reply, ReplyStatus, Response, UserId, UserIdReply};
