// crates/proofkit-test-support/src/env_guard.rs
// ============================================================================
// Module: Environment Guards
// Description: Scoped environment mutation with restore-on-drop.
// Purpose: Let tests set process env vars without leaking them.
// Dependencies: proofkit-core
// ============================================================================

//! ## Overview
//! [`EnvGuard`] records the prior state of every variable before its first
//! mutation and restores it on drop. [`MockEnv`] pairs a guard with the
//! process-wide [`env_lock`] so concurrently running tests never observe each
//! other's values. [`mock_env`] applies the standard ProofKit test values.
//!
//! Invariants:
//! - Variables absent before the scope are absent after it.
//! - Restoration runs on unwind as well as on normal return.
//! - The lock is released only after every variable has been restored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use proofkit_core::ProofKitEnv;

// ============================================================================
// SECTION: Mock Values
// ============================================================================

/// API key exported by [`mock_env`].
pub const MOCK_API_KEY: &str = "sk-ant-test-key";
/// Log level exported by [`mock_env`].
pub const MOCK_LOG_LEVEL: &str = "DEBUG";
/// Output directory exported by [`mock_env`].
pub const MOCK_OUTPUT_DIR: &str = "/tmp/proofkit_test";

/// Variables and values exported by [`mock_env`].
pub const MOCK_ENV_VARS: [(ProofKitEnv, &str); 3] = [
    (ProofKitEnv::AnthropicApiKey, MOCK_API_KEY),
    (ProofKitEnv::LogLevel, MOCK_LOG_LEVEL),
    (ProofKitEnv::OutputDir, MOCK_OUTPUT_DIR),
];

// ============================================================================
// SECTION: Raw Mutation
// ============================================================================

/// Unsafe env mutation, confined to one module.
mod env_mut {
    #![allow(unsafe_code, reason = "Test fixtures mutate process env vars in a controlled scope.")]

    use std::ffi::OsStr;

    /// Sets an environment variable for the current process.
    pub fn set_var(key: &str, value: &OsStr) {
        // SAFETY: Callers hold the process-wide env lock for the mutation.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    /// Removes an environment variable from the current process.
    pub fn remove_var(key: &str) {
        // SAFETY: Callers hold the process-wide env lock for the mutation.
        unsafe {
            std::env::remove_var(key);
        }
    }
}

// ============================================================================
// SECTION: Lock
// ============================================================================

/// Process-wide lock serializing environment mutation.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Acquires the process-wide environment lock.
///
/// A test that panicked while holding the lock has already had its variables
/// restored by its guard, so a poisoned lock is recovered.
///
/// The lock is not reentrant: calling [`mock_env`] or [`MockEnv::locked`]
/// while this thread holds the returned guard deadlocks.
pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// SECTION: Guard
// ============================================================================

/// Restores captured environment variables when dropped.
///
/// The guard does not lock; pair it with [`env_lock`] or use [`MockEnv`].
#[derive(Debug, Default)]
pub struct EnvGuard {
    /// Variable names with their value before the first mutation.
    saved: Vec<(String, Option<OsString>)>,
}

impl EnvGuard {
    /// Creates a guard with nothing captured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current state of `names` for restoration.
    #[must_use]
    pub fn capture(names: &[&str]) -> Self {
        let mut guard = Self::new();
        for name in names {
            guard.remember(name);
        }
        guard
    }

    /// Exports [`MOCK_ENV_VARS`] and returns the guard restoring them.
    ///
    /// Does not lock; callers must already hold [`env_lock`].
    #[must_use]
    pub fn mock() -> Self {
        let mut guard = Self::new();
        for (key, value) in MOCK_ENV_VARS {
            guard.set(key.as_str(), value);
        }
        guard
    }

    /// Sets `name` to `value`, capturing the prior state first.
    pub fn set(&mut self, name: &str, value: &str) {
        self.remember(name);
        env_mut::set_var(name, value.as_ref());
    }

    /// Removes `name`, capturing the prior state first.
    pub fn remove(&mut self, name: &str) {
        self.remember(name);
        env_mut::remove_var(name);
    }

    /// Returns the names this guard will restore.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.saved.iter().map(|(name, _)| name.as_str())
    }

    /// Records the current state of `name` unless already captured.
    fn remember(&mut self, name: &str) {
        if self.saved.iter().any(|(saved, _)| saved == name) {
            return;
        }
        self.saved.push((name.to_string(), std::env::var_os(name)));
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in self.saved.drain(..).rev() {
            match value {
                Some(value) => env_mut::set_var(&name, &value),
                None => env_mut::remove_var(&name),
            }
        }
    }
}

// ============================================================================
// SECTION: Mock Environment
// ============================================================================

/// Locked environment scope.
///
/// # Invariants
/// - `guard` is declared before `_lock`, so restoration completes before the
///   lock is released.
#[derive(Debug)]
pub struct MockEnv {
    /// Restores every touched variable on drop.
    guard: EnvGuard,
    /// Keeps other scopes out until restoration finishes.
    _lock: MutexGuard<'static, ()>,
}

impl MockEnv {
    /// Acquires the environment lock without changing any variable.
    ///
    /// Deadlocks if this thread already holds [`env_lock`] or another
    /// [`MockEnv`]. Nest further changes through [`MockEnv::set`] instead.
    #[must_use]
    pub fn locked() -> Self {
        let lock = env_lock();
        Self {
            guard: EnvGuard::new(),
            _lock: lock,
        }
    }

    /// Sets `key` for the rest of the scope.
    pub fn set(&mut self, key: ProofKitEnv, value: &str) {
        self.guard.set(key.as_str(), value);
    }

    /// Removes `key` for the rest of the scope.
    pub fn remove(&mut self, key: ProofKitEnv) {
        self.guard.remove(key.as_str());
    }

    /// Removes every recognized ProofKit variable for the rest of the scope.
    pub fn clear_all(&mut self) {
        for key in ProofKitEnv::ALL {
            self.remove(key);
        }
    }
}

/// Locks the environment and exports [`MOCK_ENV_VARS`] until the returned
/// scope is dropped.
///
/// Deadlocks if this thread already holds [`env_lock`] or another
/// [`MockEnv`]. Inside such a scope use [`EnvGuard::mock`] instead.
#[must_use]
pub fn mock_env() -> MockEnv {
    let lock = env_lock();
    MockEnv {
        guard: EnvGuard::mock(),
        _lock: lock,
    }
}
