//! Tolerant reader for JavaScript-object-literal output.
//!
//! `npm version` prints its report as a JS object literal rather than JSON:
//! single-quoted strings, bare identifier keys, trailing commas, irregular
//! spacing. This module rewrites that notation into strict JSON and hands
//! the result to `serde_json`. Anything the rewriter cannot account for
//! surfaces as a parse error rather than a silent misparse.

use serde_json::Value;
use thiserror::Error;

/// Failure to read relaxed object-literal text.
#[derive(Debug, Error)]
pub enum RelaxedJsonError {
    /// A quoted string ran past the end of the input.
    #[error("unterminated string in structured output")]
    UnterminatedString,

    /// The normalized text still was not valid JSON.
    #[error("malformed structured output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse relaxed object-literal text into a JSON value.
pub fn parse(text: &str) -> Result<Value, RelaxedJsonError> {
    let normalized = normalize(text)?;
    Ok(serde_json::from_str(&normalized)?)
}

/// Rewrite relaxed notation into strict JSON syntax.
///
/// Handles three deviations: single-quoted strings (including `\'` escapes
/// and embedded double quotes), bare identifier keys, and trailing commas.
/// Everything else passes through untouched, so genuine syntax errors still
/// fail in `serde_json`.
fn normalize(text: &str) -> Result<String, RelaxedJsonError> {
    let mut out = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                out.push('"');
                loop {
                    match chars.next() {
                        None => return Err(RelaxedJsonError::UnterminatedString),
                        Some('\\') => match chars.next() {
                            None => return Err(RelaxedJsonError::UnterminatedString),
                            // `\'` is not a JSON escape; emit the quote bare.
                            Some('\'') => out.push('\''),
                            Some(escaped) => {
                                out.push('\\');
                                out.push(escaped);
                            }
                        },
                        Some('\'') => {
                            out.push('"');
                            break;
                        }
                        Some('"') => out.push_str("\\\""),
                        Some(other) => out.push(other),
                    }
                }
            }
            '"' => {
                out.push('"');
                loop {
                    match chars.next() {
                        None => return Err(RelaxedJsonError::UnterminatedString),
                        Some('\\') => {
                            out.push('\\');
                            match chars.next() {
                                None => return Err(RelaxedJsonError::UnterminatedString),
                                Some(escaped) => out.push(escaped),
                            }
                        }
                        Some('"') => {
                            out.push('"');
                            break;
                        }
                        Some(other) => out.push(other),
                    }
                }
            }
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                let mut ident = String::new();
                ident.push(c);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || matches!(next, '_' | '$' | '-') {
                        ident.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match ident.as_str() {
                    "true" | "false" | "null" => out.push_str(&ident),
                    _ => {
                        out.push('"');
                        out.push_str(&ident);
                        out.push('"');
                    }
                }
            }
            ',' => {
                let mut lookahead = chars.clone();
                let mut next_significant = None;
                while let Some(&next) = lookahead.peek() {
                    if next.is_whitespace() {
                        lookahead.next();
                    } else {
                        next_significant = Some(next);
                        break;
                    }
                }
                if !matches!(next_significant, Some('}') | Some(']')) {
                    out.push(',');
                }
            }
            other => out.push(other),
        }
    }

    Ok(out)
}
