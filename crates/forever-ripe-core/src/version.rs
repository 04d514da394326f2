//! Configuration schema revisions and dotted version comparison.
//!
//! Versions are compared segment by segment as integers, so `1.10.0` sorts
//! after `1.2.0`. Strings that do not parse are treated by the resolver as
//! predating the first tracked revision.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Version string of the running plugin build.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A `major.minor.patch` schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion {
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Patch component.
    pub patch: u32,
}

impl SchemaVersion {
    /// First revision whose documents carry a tracked `Version` field.
    ///
    /// Shipped a fixed list of four crop prefabs as the default allow-list.
    pub const FIRST_TRACKED: Self = Self::new(1, 0, 0);

    /// Owner permission gating; the override keeps the plant's age.
    pub const PERMISSION_GATE: Self = Self::new(1, 1, 0);

    /// An empty or absent allow-list applies to every plant type.
    pub const WILDCARD_ALLOW_LIST: Self = Self::new(1, 2, 0);

    /// The revision written by this build.
    pub const CURRENT: Self = Self::WILDCARD_ALLOW_LIST;

    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a dotted version string.
    ///
    /// Accepts one to three numeric segments (`"1"`, `"1.1"`, `"1.1.0"`);
    /// missing trailing segments are zero. Surrounding whitespace is ignored.
    /// Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut segments = raw.trim().split('.');
        let major = segments.next().and_then(parse_segment)?;
        let minor = match segments.next() {
            Some(segment) => parse_segment(segment)?,
            None => 0,
        };
        let patch = match segments.next() {
            Some(segment) => parse_segment(segment)?,
            None => 0,
        };
        if segments.next().is_some() {
            return None;
        }
        Some(Self::new(major, minor, patch))
    }
}

/// An all-digit segment too large for `u32` saturates instead of failing.
fn parse_segment(segment: &str) -> Option<u32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(segment.parse().unwrap_or(u32::MAX))
}

impl core::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Error returned when a version string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid schema version: {0:?}")]
pub struct ParseVersionError(pub String);

impl FromStr for SchemaVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseVersionError(s.to_owned()))
    }
}

impl Serialize for SchemaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SchemaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
