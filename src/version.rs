//! Schema-family version identifiers
//!
//! Versions compose as `major.minor[.patch[.build]]` and are totally ordered.
//! Source documents frequently carry only the two leading components, so the
//! parser is lenient about the tail.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::BridgeError;

/// A schema-family version: `major.minor[.patch[.build]]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FamilyVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
    pub build: Option<u32>,
}

impl FamilyVersion {
    /// Create a two-component version
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            patch: None,
            build: None,
        }
    }

    /// Parse from a string such as "9.4", "9.4.0" or "9.4.0.002"
    pub fn parse(text: &str) -> Result<Self, BridgeError> {
        let invalid = || BridgeError::InvalidVersion(text.to_string());
        let mut parts = text.trim().split('.');

        let major = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;
        let minor = parts
            .next()
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;
        let patch = match parts.next() {
            Some(p) => Some(p.parse().map_err(|_| invalid())?),
            None => None,
        };
        let build = match parts.next() {
            Some(p) => Some(p.parse().map_err(|_| invalid())?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            major,
            minor,
            patch,
            build,
        })
    }

    /// Whether the leading two components match
    pub fn same_major_minor(&self, other: &FamilyVersion) -> bool {
        self.major == other.major && self.minor == other.minor
    }

    /// Whether `other` looks like the release immediately after this one.
    ///
    /// Used only to soften the wording of the non-fatal version-mismatch
    /// warning; never affects whether translation proceeds.
    pub fn is_plausible_next(&self, other: &FamilyVersion) -> bool {
        (other.major == self.major && other.minor == self.minor + 1)
            || (other.major == self.major + 1 && other.minor == 0)
    }

    fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (
            self.major,
            self.minor,
            self.patch.unwrap_or(0),
            self.build.unwrap_or(0),
        )
    }
}

impl fmt::Display for FamilyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }
        if let Some(build) = self.build {
            write!(f, ".{}", build)?;
        }
        Ok(())
    }
}

impl PartialEq for FamilyVersion {
    fn eq(&self, other: &Self) -> bool {
        self.as_tuple() == other.as_tuple()
    }
}

impl Eq for FamilyVersion {}

impl PartialOrd for FamilyVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FamilyVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_tuple().cmp(&other.as_tuple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_components() {
        let v = FamilyVersion::parse("9.4").unwrap();
        assert_eq!(v.major, 9);
        assert_eq!(v.minor, 4);
        assert_eq!(v.patch, None);
        assert_eq!(v.to_string(), "9.4");
    }

    #[test]
    fn test_parse_four_components() {
        let v = FamilyVersion::parse("9.4.0.002").unwrap();
        assert_eq!(v.patch, Some(0));
        assert_eq!(v.build, Some(2));
        assert_eq!(v.to_string(), "9.4.0.2");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(FamilyVersion::parse("").is_err());
        assert!(FamilyVersion::parse("9").is_err());
        assert!(FamilyVersion::parse("9.x").is_err());
        assert!(FamilyVersion::parse("9.4.0.0.1").is_err());
    }

    #[test]
    fn test_total_order() {
        let a = FamilyVersion::parse("9.4").unwrap();
        let b = FamilyVersion::parse("9.4.0").unwrap();
        let c = FamilyVersion::parse("9.5").unwrap();
        assert_eq!(a, b);
        assert!(a < c);
        assert!(FamilyVersion::parse("10.0").unwrap() > c);
    }

    #[test]
    fn test_plausible_next() {
        let v = FamilyVersion::new(9, 4);
        assert!(v.is_plausible_next(&FamilyVersion::new(9, 5)));
        assert!(v.is_plausible_next(&FamilyVersion::new(10, 0)));
        assert!(!v.is_plausible_next(&FamilyVersion::new(9, 6)));
        assert!(!v.is_plausible_next(&FamilyVersion::new(10, 1)));
    }
}
