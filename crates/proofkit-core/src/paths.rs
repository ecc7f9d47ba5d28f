// crates/proofkit-core/src/paths.rs
// ============================================================================
// Module: ProofKit Run Paths
// Description: Directory layout helpers for audit runs.
// Purpose: Derive run directories and artifact paths consistently.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Each audit run owns a directory under the configured output root:
//!
//! ```text
//! <output_dir>/run_YYYYMMDD_HHMMSS/
//!   raw/
//!     screenshots/
//!   out/
//! ```
//!
//! Artifact helpers create their parent directory on demand and return the
//! target path. Page names are sanitized before they become file names.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use time::OffsetDateTime;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Subdirectory for raw collector output.
const RAW_DIR: &str = "raw";
/// Subdirectory for rendered outputs.
const OUT_DIR: &str = "out";
/// Subdirectory of [`RAW_DIR`] for screenshots.
const SCREENSHOTS_DIR: &str = "screenshots";

// ============================================================================
// SECTION: Run Identifiers
// ============================================================================

/// Formats the run identifier for `timestamp` as `run_YYYYMMDD_HHMMSS` (UTC).
#[must_use]
pub fn run_id_at(timestamp: OffsetDateTime) -> String {
    let utc = timestamp.to_offset(time::UtcOffset::UTC);
    format!(
        "run_{:04}{:02}{:02}_{:02}{:02}{:02}",
        utc.year(),
        u8::from(utc.month()),
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second()
    )
}

/// Returns the run directory path without touching the filesystem.
///
/// A fresh identifier is derived from the current UTC time when `run_id` is
/// `None`.
#[must_use]
pub fn run_dir(base_dir: &Path, run_id: Option<&str>) -> PathBuf {
    run_id.map_or_else(
        || base_dir.join(run_id_at(OffsetDateTime::now_utc())),
        |run_id| base_dir.join(run_id),
    )
}

// ============================================================================
// SECTION: Run Layout
// ============================================================================

/// Standard directory layout for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectories {
    /// Run root.
    pub root: PathBuf,
    /// Raw collector output.
    pub raw: PathBuf,
    /// Rendered outputs.
    pub out: PathBuf,
    /// Captured screenshots.
    pub screenshots: PathBuf,
}

impl RunDirectories {
    /// Returns the layout rooted at `run_dir` without creating anything.
    #[must_use]
    pub fn layout(run_dir: &Path) -> Self {
        let raw = run_dir.join(RAW_DIR);
        Self {
            root: run_dir.to_path_buf(),
            out: run_dir.join(OUT_DIR),
            screenshots: raw.join(SCREENSHOTS_DIR),
            raw,
        }
    }

    /// Creates every directory of the layout. Existing directories are kept.
    ///
    /// # Errors
    ///
    /// Returns an error when a directory cannot be created.
    pub fn create(run_dir: &Path) -> io::Result<Self> {
        let dirs = Self::layout(run_dir);
        for dir in [&dirs.root, &dirs.raw, &dirs.out, &dirs.screenshots] {
            fs::create_dir_all(dir)?;
        }
        Ok(dirs)
    }
}

// ============================================================================
// SECTION: Artifact Paths
// ============================================================================

/// Returns the screenshot path for `page_name`, creating the screenshots
/// directory. A non-empty `suffix` (for example `mobile`) is appended.
///
/// # Errors
///
/// Returns an error when the screenshots directory cannot be created.
pub fn screenshot_path(run_dir: &Path, page_name: &str, suffix: &str) -> io::Result<PathBuf> {
    let dir = run_dir.join(RAW_DIR).join(SCREENSHOTS_DIR);
    fs::create_dir_all(&dir)?;
    let mut name = sanitize_file_stem(page_name);
    if !suffix.is_empty() {
        name.push('_');
        name.push_str(suffix);
    }
    name.push_str(".png");
    Ok(dir.join(name))
}

/// Returns `out/<filename>` under the run, creating `out/`.
///
/// # Errors
///
/// Returns an error when the output directory cannot be created.
pub fn output_path(run_dir: &Path, filename: &str) -> io::Result<PathBuf> {
    let dir = run_dir.join(OUT_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir.join(filename))
}

/// Returns `raw/<collector>.json` under the run, creating `raw/`.
///
/// # Errors
///
/// Returns an error when the raw directory cannot be created.
pub fn raw_data_path(run_dir: &Path, collector_name: &str) -> io::Result<PathBuf> {
    let dir = run_dir.join(RAW_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir.join(format!("{collector_name}.json")))
}

/// Replaces every character outside `[A-Za-z0-9_-]` with `_`.
///
/// # Notes
/// Non-ASCII letters are replaced too: `café` becomes `caf_`.
pub(crate) fn sanitize_file_stem(raw: &str) -> String {
    raw.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}
