//! crates/logging/src/levels.rs
//! Diagnostic categories and their verbosity levels.

use tracing::Level;

/// Diagnostic categories emitted by the ident crates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Connection setup, teardown and state changes.
    Connect,
    /// Reply buffering and parsing.
    Reply,
    /// Request validation and outcome.
    Request,
}

impl DebugFlag {
    /// Every flag, in the order the `--debug` help lists them.
    pub const ALL: [Self; 3] = [Self::Connect, Self::Reply, Self::Request];

    /// Name accepted by [`VerbosityConfig::apply_debug_flag`](crate::VerbosityConfig::apply_debug_flag).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Reply => "reply",
            Self::Request => "request",
        }
    }

    /// `tracing` target the flag controls.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Connect => "ident::connect",
            Self::Reply => "ident::reply",
            Self::Request => "ident::request",
        }
    }

    /// Looks a flag up by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }
}

/// Debug verbosity level for each flag.
///
/// Level 0 keeps only warnings, 1 adds debug events and 2 or more adds trace
/// events.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Connection events level.
    pub connect: u8,
    /// Reply events level.
    pub reply: u8,
    /// Request events level.
    pub request: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    #[must_use]
    pub const fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Connect => self.connect,
            DebugFlag::Reply => self.reply,
            DebugFlag::Request => self.request,
        }
    }

    /// Set the level for a specific flag.
    pub const fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Connect => self.connect = level,
            DebugFlag::Reply => self.reply = level,
            DebugFlag::Request => self.request = level,
        }
    }
}

/// Most verbose `tracing` level enabled by a flag level.
#[must_use]
pub const fn tracing_level(level: u8) -> Level {
    match level {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for flag in DebugFlag::ALL {
            assert_eq!(DebugFlag::from_name(flag.name()), Some(flag));
            assert!(flag.target().starts_with("ident::"));
        }
        assert_eq!(DebugFlag::from_name("deltasum"), None);
    }

    #[test]
    fn levels_get_and_set() {
        let mut levels = DebugLevels::default();
        levels.set(DebugFlag::Reply, 2);
        assert_eq!(levels.get(DebugFlag::Reply), 2);
        assert_eq!(levels.get(DebugFlag::Connect), 0);
    }

    #[test]
    fn flag_levels_map_to_tracing_levels() {
        assert_eq!(tracing_level(0), Level::WARN);
        assert_eq!(tracing_level(1), Level::DEBUG);
        assert_eq!(tracing_level(2), Level::TRACE);
        assert_eq!(tracing_level(9), Level::TRACE);
    }
}
