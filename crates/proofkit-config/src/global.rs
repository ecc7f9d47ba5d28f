// crates/proofkit-config/src/global.rs
// ============================================================================
// Module: Shared Settings
// Description: Lazily loaded, process-wide ProofKit settings.
// Purpose: Load configuration once and hand out shared references.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`get_config`] loads [`ProofKitSettings`] on first use and returns the same
//! `Arc` on every later call. [`reset_config`] clears the slot; holders of an
//! earlier `Arc` keep their snapshot while the next call reloads.
//! A failed load leaves the slot empty, so a corrected environment is picked
//! up on the next call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use proofkit_core::ConfigError;

use crate::settings::ProofKitSettings;

// ============================================================================
// SECTION: State
// ============================================================================

/// Cached settings slot.
static SETTINGS: RwLock<Option<Arc<ProofKitSettings>>> = RwLock::new(None);

// ============================================================================
// SECTION: API
// ============================================================================

/// Returns the shared settings, loading them on first use.
///
/// # Errors
///
/// Returns [`ConfigError`] when loading fails. Nothing is cached in that case.
pub fn get_config() -> Result<Arc<ProofKitSettings>, ConfigError> {
    if let Some(settings) = SETTINGS.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
        return Ok(Arc::clone(settings));
    }
    let mut slot = SETTINGS.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(settings) = slot.as_ref() {
        return Ok(Arc::clone(settings));
    }
    let settings = Arc::new(ProofKitSettings::load()?);
    *slot = Some(Arc::clone(&settings));
    drop(slot);
    Ok(settings)
}

/// Drops the cached settings so the next [`get_config`] reloads.
pub fn reset_config() {
    SETTINGS.write().unwrap_or_else(PoisonError::into_inner).take();
}
