// crates/proofkit-core/src/lib.rs
// ============================================================================
// Module: ProofKit Core Library
// Description: Shared primitives used by every ProofKit crate.
// Purpose: Single home for the error taxonomy, env keys, logging, and paths.
// Dependencies: serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! `proofkit-core` holds the building blocks the rest of the workspace shares:
//! - [`ProofKitError`] and the per-area error enums.
//! - [`ProofKitEnv`], the catalog of recognized environment variables.
//! - [`Logger`] and the [`LogSink`] implementations that emit JSON lines.
//! - Run directory helpers such as [`RunDirectories`].
//!
//! Security posture: environment and path inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod env;
pub mod error;
pub mod logging;
pub mod paths;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use env::ProofKitEnv;
pub use env::read_env_strict;
pub use error::AnalyzerError;
pub use error::CollectorError;
pub use error::ConfigError;
pub use error::NarratorError;
pub use error::ProofKitError;
pub use error::ReportError;
pub use logging::FileLogSink;
pub use logging::LogError;
pub use logging::LogLevel;
pub use logging::LogLevelParseError;
pub use logging::LogRecord;
pub use logging::LogSink;
pub use logging::Logger;
pub use logging::LoggerConfig;
pub use logging::NoopLogSink;
pub use logging::StderrLogSink;
pub use logging::install_logger;
pub use logging::logger;
pub use paths::RunDirectories;
pub use paths::output_path;
pub use paths::raw_data_path;
pub use paths::run_dir;
pub use paths::run_id_at;
pub use paths::screenshot_path;
