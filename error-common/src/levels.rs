//! Runtime error levels and remote severities
//!
//! [`ErrorLevel`] is a bitmask over the classic runtime error constants. The
//! reporter ANDs a level against two masks (the ambient reporting mask and
//! the configured minimum mask) before anything is forwarded.

use crate::error::ReporterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

/// Bitmask of runtime error levels
///
/// Serialized as a signed integer mask. Deserializes from either an integer
/// or a string accepted by [`FromStr`], e.g. `"E_WARNING|E_NOTICE"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawErrorLevel", into = "i64")]
pub struct ErrorLevel(u32);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawErrorLevel {
    Mask(i64),
    Names(String),
}

impl TryFrom<RawErrorLevel> for ErrorLevel {
    type Error = ReporterError;

    fn try_from(raw: RawErrorLevel) -> Result<Self, Self::Error> {
        match raw {
            RawErrorLevel::Mask(mask) => Ok(Self::from_mask(mask)),
            RawErrorLevel::Names(names) => names.parse(),
        }
    }
}

impl ErrorLevel {
    pub const NONE: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARNING: Self = Self(2);
    pub const PARSE: Self = Self(4);
    pub const NOTICE: Self = Self(8);
    pub const CORE_ERROR: Self = Self(16);
    pub const CORE_WARNING: Self = Self(32);
    pub const COMPILE_ERROR: Self = Self(64);
    pub const COMPILE_WARNING: Self = Self(128);
    pub const USER_ERROR: Self = Self(256);
    pub const USER_WARNING: Self = Self(512);
    pub const USER_NOTICE: Self = Self(1024);
    pub const STRICT: Self = Self(2048);
    pub const RECOVERABLE_ERROR: Self = Self(4096);
    pub const DEPRECATED: Self = Self(8192);
    pub const USER_DEPRECATED: Self = Self(16384);
    pub const ALL: Self = Self(32767);
    /// Every bit set, the value of a `-1` mask
    pub const EVERYTHING: Self = Self(u32::MAX);

    const NAMED: [(&'static str, Self); 16] = [
        ("E_ERROR", Self::ERROR),
        ("E_WARNING", Self::WARNING),
        ("E_PARSE", Self::PARSE),
        ("E_NOTICE", Self::NOTICE),
        ("E_CORE_ERROR", Self::CORE_ERROR),
        ("E_CORE_WARNING", Self::CORE_WARNING),
        ("E_COMPILE_ERROR", Self::COMPILE_ERROR),
        ("E_COMPILE_WARNING", Self::COMPILE_WARNING),
        ("E_USER_ERROR", Self::USER_ERROR),
        ("E_USER_WARNING", Self::USER_WARNING),
        ("E_USER_NOTICE", Self::USER_NOTICE),
        ("E_STRICT", Self::STRICT),
        ("E_RECOVERABLE_ERROR", Self::RECOVERABLE_ERROR),
        ("E_DEPRECATED", Self::DEPRECATED),
        ("E_USER_DEPRECATED", Self::USER_DEPRECATED),
        ("E_ALL", Self::ALL),
    ];

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build a level from a signed mask; negative masks set the high bits
    /// the same way `-1` means "everything".
    pub fn from_mask(mask: i64) -> Self {
        Self(u32::try_from(mask & i64::from(u32::MAX)).unwrap_or(u32::MAX))
    }

    /// True when the two masks share at least one bit
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Constant name of a single level, e.g. `E_WARNING`
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(_, level)| *level == self)
            .map(|(name, _)| *name)
    }
}

impl Default for ErrorLevel {
    fn default() -> Self {
        Self::EVERYTHING
    }
}

impl From<i64> for ErrorLevel {
    fn from(mask: i64) -> Self {
        Self::from_mask(mask)
    }
}

impl From<ErrorLevel> for i64 {
    fn from(level: ErrorLevel) -> Self {
        if level == ErrorLevel::EVERYTHING {
            -1
        } else {
            i64::from(level.0)
        }
    }
}

impl BitOr for ErrorLevel {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for ErrorLevel {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", i64::from(*self)),
        }
    }
}

impl FromStr for ErrorLevel {
    type Err = ReporterError;

    /// Accepts an integer mask (`-1`, `6143`) or constant names joined with `|`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(mask) = trimmed.parse::<i64>() {
            return Ok(Self::from_mask(mask));
        }

        trimmed.split('|').try_fold(Self::NONE, |acc, part| {
            let part = part.trim().to_uppercase();
            Self::NAMED
                .iter()
                .find(|(name, _)| *name == part)
                .map(|(_, level)| acc | *level)
                .ok_or_else(|| {
                    ReporterError::Configuration(format!("Unknown error level: {}", part))
                })
        })
    }
}

/// Severity attached to an item sent to the remote error-tracking service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Notice => "notice",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
            Level::Alert => "alert",
            Level::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
