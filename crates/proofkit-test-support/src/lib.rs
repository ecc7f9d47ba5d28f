// crates/proofkit-test-support/src/lib.rs
// ============================================================================
// Module: ProofKit Test Support Library
// Description: Scoped fixtures shared by ProofKit test suites.
// Purpose: Provide setup/teardown helpers released on every exit path.
// Dependencies: proofkit-core, tempfile
// ============================================================================

//! ## Overview
//! Fixtures are plain values whose `Drop` performs teardown, so release
//! happens on normal return and on panic alike:
//! - [`temp_dir`] yields a unique, empty directory removed on drop.
//! - [`mock_env`] sets the ProofKit environment for the current scope and
//!   restores the previous values on drop.
//! - [`sample_url`] returns a fixed URL literal.
//!
//! Invariants:
//! - Environment mutation is serialized by a process-wide lock held for the
//!   whole scope. Holding two scopes on one thread deadlocks.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod env_guard;
pub mod sample;
pub mod temp_dir;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use env_guard::EnvGuard;
pub use env_guard::MOCK_API_KEY;
pub use env_guard::MOCK_ENV_VARS;
pub use env_guard::MOCK_LOG_LEVEL;
pub use env_guard::MOCK_OUTPUT_DIR;
pub use env_guard::MockEnv;
pub use env_guard::env_lock;
pub use env_guard::mock_env;
pub use sample::SAMPLE_URL;
pub use sample::sample_url;
pub use temp_dir::TempDir;
pub use temp_dir::temp_dir;
