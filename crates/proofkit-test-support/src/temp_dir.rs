// crates/proofkit-test-support/src/temp_dir.rs
// ============================================================================
// Module: Temporary Directory Fixture
// Description: Unique scratch directories removed when the scope ends.
// Purpose: Isolate filesystem side effects of individual tests.
// Dependencies: tempfile
// ============================================================================

//! ## Overview
//! [`TempDir`] wraps [`tempfile::TempDir`] with a ProofKit prefix. Dropping
//! it removes the tree and ignores failures; [`TempDir::close`] reports them
//! instead, except when the directory is already gone.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::path::Path;
use std::path::PathBuf;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name prefix for fixture directories.
const TEMP_DIR_PREFIX: &str = "proofkit-test-";

// ============================================================================
// SECTION: Fixture
// ============================================================================

/// Uniquely named directory under the platform temp area.
///
/// # Invariants
/// - The directory exists and is empty right after [`temp_dir`] returns.
/// - The directory and its contents are removed when the value is dropped.
#[derive(Debug)]
pub struct TempDir {
    /// Underlying directory handle; removal happens in its `Drop`.
    inner: tempfile::TempDir,
}

impl TempDir {
    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Returns `path().join(relative)`.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.inner.path().join(relative)
    }

    /// Removes the directory tree now, surfacing removal errors.
    ///
    /// A directory already removed by the caller is not an error.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while deleting the tree.
    pub fn close(self) -> io::Result<()> {
        match self.inner.close() {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            result => result,
        }
    }
}

impl AsRef<Path> for TempDir {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

/// Creates a fresh, empty temporary directory.
///
/// # Errors
///
/// Returns the I/O error raised when the directory cannot be created.
pub fn temp_dir() -> io::Result<TempDir> {
    let inner = tempfile::Builder::new().prefix(TEMP_DIR_PREFIX).tempdir()?;
    Ok(TempDir {
        inner,
    })
}
