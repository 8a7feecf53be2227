use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// Target PHP language version, `major.minor[.patch]`.
///
/// Only used to decide whether optional, version-dependent decorations
/// (return types, nullable hints) are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct PhpVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl TryFrom<String> for PhpVersion {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for PhpVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl PhpVersion {
    /// PHP 8.0, the default target.
    pub const PHP_8_0: Self = Self::new(8, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Check whether this version is at least `major.minor`.
    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }

    /// Scalar type hints and return types (PHP 7.0).
    pub fn supports_return_types(&self) -> bool {
        self.at_least(7, 0)
    }

    /// `?Type` nullable hints (PHP 7.1).
    pub fn supports_nullable_types(&self) -> bool {
        self.at_least(7, 1)
    }
}

impl Default for PhpVersion {
    fn default() -> Self {
        Self::PHP_8_0
    }
}

impl fmt::Display for PhpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}", self.major, self.minor)
        } else {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
        }
    }
}

impl FromStr for PhpVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(format!("invalid PHP version '{}', expected 'X.Y' or 'X.Y.Z'", s));
        }
        Ok(Self {
            major: parts[0].parse().map_err(|_| "invalid major")?,
            minor: parts[1].parse().map_err(|_| "invalid minor")?,
            patch: match parts.get(2) {
                Some(p) => p.parse().map_err(|_| "invalid patch")?,
                None => 0,
            },
        })
    }
}
