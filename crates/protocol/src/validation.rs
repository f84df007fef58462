//! Field predicates applied while parsing ident replies.
//!
//! Every check is a plain function over already-decoded fields so it can be
//! exercised against the tables in [`crate::tables`] without building a reply.

use crate::tables::{
    CHARSET_TOKENS, ERROR_EXTENSION_MIN_LEN, ERROR_EXTENSION_PREFIX, ERROR_TOKENS, OPSYS_OTHER,
    OPSYS_TOKENS, TOKEN_MAX_LEN, USERID_MAX_LEN,
};

/// Returns `true` when `token` is `OTHER` or a registered operating system.
#[must_use]
pub fn is_valid_opsys(token: &str) -> bool {
    token == OPSYS_OTHER || OPSYS_TOKENS.contains(&token)
}

/// Returns `true` when `token` is a registered character set.
///
/// Comparison is exact; the registry spelling must be used on the wire.
#[must_use]
pub fn is_valid_charset(token: &str) -> bool {
    CHARSET_TOKENS.contains(&token)
}

/// Returns `true` when a userid of `length` octets is within `1..=512`.
#[must_use]
pub fn is_valid_userid_length(length: usize) -> bool {
    (1..=USERID_MAX_LEN).contains(&length)
}

/// Returns `true` when `token` is a well-known error token or an `X` extension.
///
/// Extension tokens must be between 2 and 64 octets long and start with the
/// reserved `X` prefix.
#[must_use]
pub fn is_valid_error_token(token: &str) -> bool {
    if ERROR_TOKENS.contains(&token) {
        return true;
    }

    (ERROR_EXTENSION_MIN_LEN..=TOKEN_MAX_LEN).contains(&token.len())
        && token.starts_with(ERROR_EXTENSION_PREFIX)
}
