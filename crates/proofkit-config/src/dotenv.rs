// crates/proofkit-config/src/dotenv.rs
// ============================================================================
// Module: Dotenv Files
// Description: Strict parser for `KEY=VALUE` environment files.
// Purpose: Supply lower-precedence settings from a local `.env` file.
// Dependencies: proofkit-core
// ============================================================================

//! ## Overview
//! Grammar, one entry per line:
//! - blank lines and lines starting with `#` are ignored;
//! - an optional `export ` prefix is stripped;
//! - values wrapped in matching single or double quotes are unwrapped, and
//!   only a `#` comment may follow the closing quote;
//! - unquoted values end at the first ` #` (inline comment).
//!
//! Later entries override earlier ones. Oversized or non-UTF-8 files and
//! lines without `=` are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use proofkit_core::ConfigError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted `.env` file size in bytes.
pub(crate) const MAX_ENV_FILE_SIZE: usize = 1024 * 1024;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Parsed `.env` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    /// Entries keyed by variable name.
    entries: BTreeMap<String, String>,
}

impl EnvFile {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read,
    /// [`ConfigError::Invalid`] when it is too large or not UTF-8, and
    /// [`ConfigError::Parse`] on malformed lines.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        if bytes.len() > MAX_ENV_FILE_SIZE {
            return Err(ConfigError::Invalid("env file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("env file must be utf-8".to_string()))?;
        Self::parse(content)
    }

    /// Parses `.env` content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] naming the first malformed line.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut entries = BTreeMap::new();
        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").map_or(line, str::trim_start);
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!(
                    "env file line {}: expected KEY=VALUE",
                    index + 1
                )));
            };
            let key = key.trim();
            if !is_valid_key(key) {
                return Err(ConfigError::Parse(format!(
                    "env file line {}: invalid key {key:?}",
                    index + 1
                )));
            }
            entries.insert(key.to_string(), unquote(value.trim()).to_string());
        }
        Ok(Self {
            entries,
        })
    }

    /// Returns the value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the file defined no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Keys are non-empty, ASCII alphanumerics or `_`, and do not start with a digit.
fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// Strips matching quotes, or an inline comment from an unquoted value.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        let Some(rest) = value.strip_prefix(quote) else {
            continue;
        };
        if let Some(end) = rest.find(quote) {
            let trailing = rest[end + quote.len_utf8()..].trim_start();
            if trailing.is_empty() || trailing.starts_with('#') {
                return &rest[..end];
            }
        }
    }
    value.find(" #").map_or(value, |cut| value[..cut].trim_end())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
