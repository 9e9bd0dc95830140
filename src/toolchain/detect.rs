//! Output-shape parsers for tool checks.
//!
//! Each tool reports itself differently: node prints a single `v`-prefixed
//! line, npm a JS object literal, the Angular CLI a labeled banner line,
//! yarn a bare version number, and npx is located by install path. One
//! parser per shape, all pure functions over captured line collections.

use crate::toolchain::relaxed::{self, RelaxedJsonError};
use crate::toolchain::version::ToolVersion;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Why a tool check failed.
///
/// Unparsable or ambiguous output is always a hard failure, never treated
/// as "assume latest" or "assume absent".
#[derive(Debug, Error)]
pub enum CheckError {
    /// Zero or more than one candidate version line.
    #[error("Version info not found or not unique")]
    AmbiguousVersion,

    /// A candidate line was found but its version text did not parse.
    #[error("Version could not be parsed: {text}")]
    UnparsableVersion { text: String },

    /// The version parsed but sits below the step's floor.
    #[error("Version is too low: {found}")]
    VersionTooLow { found: ToolVersion },

    /// No output line carried the expected label prefix.
    #[error("No line labeled '{label}' in output")]
    MissingLabel { label: &'static str },

    /// No output line looked like a dotted version number.
    #[error("No version-shaped line in output")]
    MissingVersionLine,

    /// Structured output did not normalize into valid JSON.
    #[error("Malformed structured output: {0}")]
    Malformed(#[from] RelaxedJsonError),

    /// Structured output parsed but lacked the expected field.
    #[error("Field '{field}' not found in structured output")]
    MissingField { field: &'static str },

    /// A locator query reported no install path at the expected location.
    #[error("No install path containing '{fragment}' reported")]
    MissingInstallPath { fragment: &'static str },
}

fn version_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(?:\.\d+){0,3}").unwrap())
}

fn version_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\d+(?:\.\d+)*$").unwrap())
}

/// Exactly one line of the form `v<version>`.
///
/// Zero candidates means the tool said nothing useful; two or more is
/// ambiguity. Both fail identically.
pub fn unique_v_prefixed_version(lines: &[String]) -> Result<ToolVersion, CheckError> {
    let candidates: Vec<&String> = lines.iter().filter(|l| l.starts_with('v')).collect();
    if candidates.len() != 1 {
        return Err(CheckError::AmbiguousVersion);
    }
    let line = candidates[0];
    line[1..].parse().map_err(|_| CheckError::UnparsableVersion {
        text: line.clone(),
    })
}

/// Version from a named field of relaxed-JSON output.
///
/// Lines are joined and clipped to the outermost braces before parsing, so
/// banner noise around the object literal does not poison the read.
pub fn field_version(lines: &[String], field: &'static str) -> Result<ToolVersion, CheckError> {
    let joined = lines.join("\n");
    let body = match (joined.find('{'), joined.rfind('}')) {
        (Some(start), Some(end)) if start < end => &joined[start..=end],
        _ => joined.as_str(),
    };

    let value = relaxed::parse(body)?;
    let text = value
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or(CheckError::MissingField { field })?;
    text.parse().map_err(|_| CheckError::UnparsableVersion {
        text: text.to_string(),
    })
}

/// Version following a known label prefix, e.g. `Angular CLI: 19.2.3`.
pub fn labeled_version(lines: &[String], label: &'static str) -> Result<ToolVersion, CheckError> {
    let line = lines
        .iter()
        .map(|l| l.trim_start())
        .find(|l| l.starts_with(label))
        .ok_or(CheckError::MissingLabel { label })?;

    let rest = line[label.len()..].trim();
    let token = version_token_regex()
        .find(rest)
        .ok_or_else(|| CheckError::UnparsableVersion {
            text: rest.to_string(),
        })?;
    token
        .as_str()
        .parse()
        .map_err(|_| CheckError::UnparsableVersion {
            text: rest.to_string(),
        })
}

/// First line that is exactly a dotted version number.
///
/// Replaces a fixed line-position contract: the position depended on shell
/// echo artifacts, the shape does not. Absence still fails the check.
pub fn version_shaped_line(lines: &[String]) -> Result<ToolVersion, CheckError> {
    let line = lines
        .iter()
        .map(|l| l.trim())
        .find(|l| version_line_regex().is_match(l))
        .ok_or(CheckError::MissingVersionLine)?;
    line.parse().map_err(|_| CheckError::UnparsableVersion {
        text: line.to_string(),
    })
}

/// Whether any output line contains the expected install-path fragment.
pub fn contains_path_fragment(lines: &[String], fragment: &str) -> bool {
    lines.iter().any(|l| l.contains(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(ls: &[&str]) -> Vec<String> {
        ls.iter().map(|l| (*l).to_string()).collect()
    }

    #[test]
    fn single_v_line_parses() {
        let v = unique_v_prefixed_version(&lines(&["v22.4.0"])).unwrap();
        assert_eq!(v, ToolVersion::new(22, 4, 0));
    }

    #[test]
    fn no_v_line_is_ambiguous() {
        let err = unique_v_prefixed_version(&lines(&["node: command output"])).unwrap_err();
        assert!(matches!(err, CheckError::AmbiguousVersion));
    }

    #[test]
    fn duplicate_v_lines_fail_regardless_of_value() {
        let err = unique_v_prefixed_version(&lines(&["v22.4.0", "v22.4.0"])).unwrap_err();
        assert!(matches!(err, CheckError::AmbiguousVersion));
    }

    #[test]
    fn v_line_with_garbage_version_is_unparsable() {
        let err = unique_v_prefixed_version(&lines(&["vnope"])).unwrap_err();
        assert!(matches!(err, CheckError::UnparsableVersion { .. }));
    }

    #[test]
    fn non_v_lines_are_ignored_when_unique() {
        let v =
            unique_v_prefixed_version(&lines(&["Welcome to Node.js", "v22.14.0"])).unwrap();
        assert_eq!(v.major, 22);
    }

    #[test]
    fn field_version_reads_relaxed_object() {
        let v = field_version(&lines(&["{   npm: '10.2.3' }"]), "npm").unwrap();
        assert_eq!(v, ToolVersion::new(10, 2, 3));
    }

    #[test]
    fn field_version_spans_multiple_lines() {
        let out = lines(&["{", "  npm: '10.9.2',", "  node: '22.14.0',", "}"]);
        let v = field_version(&out, "npm").unwrap();
        assert_eq!(v, ToolVersion::new(10, 9, 2));
    }

    #[test]
    fn field_version_tolerates_banner_noise() {
        let out = lines(&["npm info it worked", "{ npm: '11.0.0' }", "npm timing done"]);
        let v = field_version(&out, "npm").unwrap();
        assert_eq!(v.major, 11);
    }

    #[test]
    fn missing_field_is_reported() {
        let err = field_version(&lines(&["{ node: '22.0.0' }"]), "npm").unwrap_err();
        assert!(matches!(err, CheckError::MissingField { field: "npm" }));
    }

    #[test]
    fn malformed_object_is_reported() {
        let err = field_version(&lines(&["{ npm: '10.2.3"]), "npm").unwrap_err();
        assert!(matches!(err, CheckError::Malformed(_)));
    }

    #[test]
    fn labeled_version_finds_banner_line() {
        let out = lines(&[
            "     _                      _                 ____ _     ___",
            "Angular CLI: 19.2.3",
            "Node: 22.14.0",
            "Package Manager: npm 10.9.2",
        ]);
        let v = labeled_version(&out, "Angular CLI:").unwrap();
        assert_eq!(v, ToolVersion::new(19, 2, 3));
    }

    #[test]
    fn labeled_version_tolerates_leading_indent_and_trailing_text() {
        let out = lines(&["   Angular CLI: 19.0.0 (outdated)"]);
        let v = labeled_version(&out, "Angular CLI:").unwrap();
        assert_eq!(v, ToolVersion::new(19, 0, 0));
    }

    #[test]
    fn missing_label_is_reported() {
        let err = labeled_version(&lines(&["Node: 22.14.0"]), "Angular CLI:").unwrap_err();
        assert!(matches!(
            err,
            CheckError::MissingLabel {
                label: "Angular CLI:"
            }
        ));
    }

    #[test]
    fn label_without_version_is_unparsable() {
        let err = labeled_version(&lines(&["Angular CLI: <error>"]), "Angular CLI:").unwrap_err();
        assert!(matches!(err, CheckError::UnparsableVersion { .. }));
    }

    #[test]
    fn version_shaped_line_scans_past_noise() {
        let out = lines(&["yarn install v-tool", "warning: something", "1.22.22"]);
        let v = version_shaped_line(&out).unwrap();
        assert_eq!(v, ToolVersion::new(1, 22, 22));
    }

    #[test]
    fn version_shaped_line_absence_fails() {
        let err = version_shaped_line(&lines(&["no version here"])).unwrap_err();
        assert!(matches!(err, CheckError::MissingVersionLine));
    }

    #[test]
    fn version_shaped_line_requires_at_least_two_components() {
        let err = version_shaped_line(&lines(&["3"])).unwrap_err();
        assert!(matches!(err, CheckError::MissingVersionLine));
    }

    #[test]
    fn path_fragment_containment() {
        let out = lines(&["/usr/local/bin/npx"]);
        assert!(contains_path_fragment(&out, "/bin/npx"));
        assert!(!contains_path_fragment(&out, r"\nodejs\"));
        assert!(!contains_path_fragment(&[], "/bin/npx"));
    }
}
