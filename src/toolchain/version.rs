//! Tool version parsing and comparison.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Version text that could not be read as a dotted version number.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid version: {text}")]
pub struct VersionParseError {
    pub text: String,
}

/// A parsed tool version.
///
/// Ordering is numeric-lexicographic over (major, minor, patch); derive
/// order of the fields is load-bearing for the `Ord` impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToolVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ToolVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Floor predicate: at least `major.minor`, ignoring patch.
    ///
    /// Passes when the major version exceeds the floor outright, or ties it
    /// with a minor version at or above the floor's.
    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ToolVersion {
    type Err = VersionParseError;

    /// Parse `22`, `22.4`, or `22.4.0`. A pre-release or build suffix
    /// (`19.0.0-next.3`, `1.22.0+sha`) is ignored; extra dotted components
    /// beyond the third (`12.4.254.21`) are ignored as well. Anything
    /// non-numeric inside the consumed components is an error, never a
    /// guess.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VersionParseError {
            text: s.to_string(),
        };

        let core = s.trim().split(['-', '+']).next().unwrap_or_default();
        if core.is_empty() {
            return Err(err());
        }

        let mut numbers = core.split('.');
        let major = numbers
            .next()
            .ok_or_else(err)?
            .parse()
            .map_err(|_| err())?;
        let minor = match numbers.next() {
            Some(part) => part.parse().map_err(|_| err())?,
            None => 0,
        };
        let patch = match numbers.next() {
            Some(part) => part.parse().map_err(|_| err())?,
            None => 0,
        };

        Ok(Self {
            major,
            minor,
            patch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_version() {
        assert_eq!("22.4.0".parse(), Ok(ToolVersion::new(22, 4, 0)));
    }

    #[test]
    fn parses_partial_versions() {
        assert_eq!("22.4".parse(), Ok(ToolVersion::new(22, 4, 0)));
        assert_eq!("22".parse(), Ok(ToolVersion::new(22, 0, 0)));
    }

    #[test]
    fn parses_with_surrounding_whitespace() {
        assert_eq!(" 1.22.22 ".parse(), Ok(ToolVersion::new(1, 22, 22)));
    }

    #[test]
    fn ignores_prerelease_and_build_suffixes() {
        assert_eq!("19.0.0-next.3".parse(), Ok(ToolVersion::new(19, 0, 0)));
        assert_eq!("1.22.0+sha.abcdef".parse(), Ok(ToolVersion::new(1, 22, 0)));
    }

    #[test]
    fn ignores_components_past_patch() {
        assert_eq!("12.4.254.21".parse(), Ok(ToolVersion::new(12, 4, 254)));
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert!("latest".parse::<ToolVersion>().is_err());
        assert!("".parse::<ToolVersion>().is_err());
        assert!("22.x".parse::<ToolVersion>().is_err());
        assert!("v22.4.0".parse::<ToolVersion>().is_err());
    }

    #[test]
    fn parse_error_carries_original_text() {
        let err = "bogus".parse::<ToolVersion>().unwrap_err();
        assert_eq!(err.text, "bogus");
    }

    #[test]
    fn ordering_is_numeric_not_textual() {
        let v9: ToolVersion = "9.9.9".parse().unwrap();
        let v10: ToolVersion = "10.0.0".parse().unwrap();
        assert!(v9 < v10);
    }

    #[test]
    fn at_least_major_floor() {
        let v: ToolVersion = "22.4.0".parse().unwrap();
        assert!(v.at_least(22, 0));
        let low: ToolVersion = "21.9.9".parse().unwrap();
        assert!(!low.at_least(22, 0));
    }

    #[test]
    fn at_least_minor_floor_only_binds_on_major_tie() {
        // 1.21.x fails a 1.22 floor, 1.22.x passes, 2.0.0 passes outright.
        assert!(!ToolVersion::new(1, 21, 9).at_least(1, 22));
        assert!(ToolVersion::new(1, 22, 0).at_least(1, 22));
        assert!(ToolVersion::new(1, 22, 22).at_least(1, 22));
        assert!(ToolVersion::new(2, 0, 0).at_least(1, 22));
    }

    #[test]
    fn display_round_trips() {
        let v = ToolVersion::new(19, 2, 3);
        assert_eq!(v.to_string(), "19.2.3");
        assert_eq!(v.to_string().parse(), Ok(v));
    }
}
