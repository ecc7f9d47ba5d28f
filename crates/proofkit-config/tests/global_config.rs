//! Shared settings cache tests for proofkit-config.
// crates/proofkit-config/tests/global_config.rs
// =============================================================================
// Module: Shared Settings Tests
// Description: Validate caching and reset of the process-wide settings.
// Purpose: Ensure one instance is shared until explicitly reset.
// =============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::sync::Arc;

use proofkit_config::ConfigError;
use proofkit_config::ProofKitEnv;
use proofkit_config::get_config;
use proofkit_config::reset_config;
use proofkit_test_support::MOCK_ENV_VARS;
use proofkit_test_support::MockEnv;

/// Locks the environment, clears ProofKit variables, and applies mock values.
fn isolated_mock_env() -> MockEnv {
    let mut env = MockEnv::locked();
    env.clear_all();
    for (key, value) in MOCK_ENV_VARS {
        env.set(key, value);
    }
    env
}

#[test]
fn get_config_returns_the_same_instance() {
    let _env = isolated_mock_env();
    reset_config();

    let first = get_config().unwrap();
    let second = get_config().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.anthropic_api_key, "sk-ant-test-key");
    reset_config();
}

#[test]
fn reset_config_forces_a_fresh_instance() {
    let _env = isolated_mock_env();
    reset_config();

    let first = get_config().unwrap();
    reset_config();
    let second = get_config().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
    reset_config();
}

#[test]
fn cached_instance_ignores_later_env_changes_until_reset() {
    let mut env = isolated_mock_env();
    reset_config();

    let before = get_config().unwrap();
    env.set(ProofKitEnv::MaxPagesFast, "12");
    assert_eq!(get_config().unwrap().max_pages_fast, before.max_pages_fast);

    reset_config();
    assert_eq!(get_config().unwrap().max_pages_fast, 12);
    assert_eq!(before.max_pages_fast, 5);
    reset_config();
}

#[test]
fn failed_load_is_not_cached() {
    let mut env = isolated_mock_env();
    reset_config();

    env.set(ProofKitEnv::AiMaxTokens, "lots");
    assert!(matches!(get_config(), Err(ConfigError::Invalid(_))));

    env.set(ProofKitEnv::AiMaxTokens, "1500");
    assert_eq!(get_config().unwrap().ai_max_tokens, 1_500);
    reset_config();
}
