use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid PHP version \"{0}\" (expected e.g. \"8.1\")")]
pub struct ParsePhpVersionError(String);

/// Target PHP version (`major.minor`) the fixed code must run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhpVersion {
    major: u8,
    minor: u8,
}

impl PhpVersion {
    pub const PHP_8_1: Self = Self::new(8, 1);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Native `readonly` properties exist since PHP 8.1.
    pub fn supports_readonly_properties(&self) -> bool {
        *self >= Self::PHP_8_1
    }
}

impl Default for PhpVersion {
    fn default() -> Self {
        Self::PHP_8_1
    }
}

impl FromStr for PhpVersion {
    type Err = ParsePhpVersionError;

    /// Accepts `8`, `8.1` and `8.1.12`; the patch level is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePhpVersionError(s.to_string());
        let mut parts = s.trim().split('.');

        let major = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(err)?;
        let minor = match parts.next() {
            Some(p) => p.parse().map_err(|_| err())?,
            None => 0,
        };
        if let Some(patch) = parts.next() {
            patch.parse::<u16>().map_err(|_| err())?;
        }
        if parts.next().is_some() {
            return Err(err());
        }

        Ok(Self::new(major, minor))
    }
}

impl TryFrom<String> for PhpVersion {
    type Error = ParsePhpVersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PhpVersion> for String {
    fn from(version: PhpVersion) -> Self {
        version.to_string()
    }
}

impl fmt::Display for PhpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
