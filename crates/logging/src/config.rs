//! crates/logging/src/config.rs
//! Verbosity configuration derived from `-v` and `--debug` flags.

use std::fmt::Write as _;

use super::levels::{DebugFlag, DebugLevels, tracing_level};

/// Verbosity of the ident diagnostics written to stderr.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a configuration from the number of `-v` flags.
    ///
    /// One `-v` reports request outcomes, two add connection and reply
    /// events, three or more enable trace output everywhere.
    #[must_use]
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        match level {
            0 => {}
            1 => {
                config.debug.request = 1;
            }
            2 => {
                config.debug.request = 1;
                config.debug.connect = 1;
                config.debug.reply = 1;
            }
            _ => {
                config.debug.request = 2;
                config.debug.connect = 2;
                config.debug.reply = 2;
            }
        }

        config
    }

    /// Apply a single debug flag token (e.g., "reply2", "connect").
    ///
    /// # Errors
    ///
    /// Returns a message naming the token when the flag is unknown or the
    /// level is not a number.
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;
        let flag =
            DebugFlag::from_name(name).ok_or_else(|| format!("unknown debug flag: {name}"))?;

        self.debug.set(flag, level);
        Ok(())
    }

    /// Renders the configuration as an `EnvFilter` directive string.
    ///
    /// Everything outside the ident targets stays at `warn`.
    #[must_use]
    pub fn directives(&self) -> String {
        let mut directives = String::from("warn");
        for flag in DebugFlag::ALL {
            let level = self.debug.get(flag);
            if level > 0 {
                let _ = write!(
                    directives,
                    ",{}={}",
                    flag.target(),
                    tracing_level(level).to_string().to_ascii_lowercase()
                );
            }
        }
        directives
    }
}

/// Parse a flag token like "reply2" into ("reply", 2) or "connect" into ("connect", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_owned());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(pos) => {
            let (name, level) = token.split_at(pos);
            let level = level
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((name, level))
        }
        None => Ok((token, 1)),
    }
}
