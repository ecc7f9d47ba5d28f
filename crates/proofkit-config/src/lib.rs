// crates/proofkit-config/src/lib.rs
// ============================================================================
// Module: ProofKit Config Library
// Description: Typed ProofKit settings sourced from env vars and `.env` files.
// Purpose: Single source of truth for ProofKit runtime configuration.
// Dependencies: proofkit-core, serde, serde_json
// ============================================================================

//! ## Overview
//! `proofkit-config` resolves [`ProofKitSettings`] from, in order of
//! precedence, the process environment, an optional `.env` file, and
//! built-in defaults. Parsing is strict: malformed numbers, log levels, or
//! score weights fail closed with [`ConfigError`].
//!
//! [`get_config`] caches one shared instance; [`reset_config`] drops it so
//! the next call reloads.
//!
//! Security posture: env inputs are untrusted and the API key is redacted
//! from `Debug` output.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod dotenv;
pub mod global;
pub mod settings;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use dotenv::EnvFile;
pub use global::get_config;
pub use global::reset_config;
pub use proofkit_core::ConfigError;
pub use proofkit_core::ProofKitEnv;
pub use settings::DEFAULT_ENV_FILE;
pub use settings::ProofKitSettings;
pub use settings::ScoreCategory;
pub use settings::ScoreWeights;
