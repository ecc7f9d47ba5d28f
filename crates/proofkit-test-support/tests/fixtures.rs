//! Lifecycle tests for the shared ProofKit test fixtures.
// crates/proofkit-test-support/tests/fixtures.rs
// =============================================================================
// Module: Fixture Lifecycle Tests
// Description: Validate acquisition and release of every fixture.
// Purpose: Ensure teardown runs on normal return and on panic.
// =============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect and explicit panics."
)]

use std::collections::HashSet;
use std::ffi::OsString;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::path::PathBuf;
use std::sync::Mutex;

use proofkit_core::ProofKitEnv;
use proofkit_test_support::EnvGuard;
use proofkit_test_support::MOCK_ENV_VARS;
use proofkit_test_support::MockEnv;
use proofkit_test_support::SAMPLE_URL;
use proofkit_test_support::env_lock;
use proofkit_test_support::mock_env;
use proofkit_test_support::sample_url;
use proofkit_test_support::temp_dir;

const API_KEY: &str = "ANTHROPIC_API_KEY";
const LOG_LEVEL: &str = "PROOFKIT_LOG_LEVEL";
const OUTPUT_DIR: &str = "PROOFKIT_OUTPUT_DIR";

fn snapshot() -> Vec<Option<OsString>> {
    [API_KEY, LOG_LEVEL, OUTPUT_DIR].into_iter().map(std::env::var_os).collect()
}

// ============================================================================
// SECTION: Temporary Directory
// ============================================================================

#[test]
fn temp_dir_exists_and_is_empty_on_acquisition() {
    let dir = temp_dir().unwrap();
    assert!(dir.path().is_dir());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn temp_dir_is_removed_with_contents_on_drop() {
    let dir = temp_dir().unwrap();
    let path = dir.path().to_path_buf();
    std::fs::create_dir_all(dir.join("raw").join("screenshots")).unwrap();
    std::fs::write(dir.join("raw").join("screenshots").join("home.png"), [0_u8; 8]).unwrap();
    drop(dir);
    assert!(!path.exists());
}

#[test]
fn temp_dir_is_removed_when_scope_panics() {
    let seen: Mutex<Option<PathBuf>> = Mutex::new(None);
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let dir = temp_dir().unwrap();
        std::fs::write(dir.join("partial.json"), "{").unwrap();
        *seen.lock().unwrap() = Some(dir.path().to_path_buf());
        panic!("audit step failed");
    }));
    assert!(outcome.is_err());
    let path = seen.lock().unwrap().take().unwrap();
    assert!(!path.exists());
}

#[test]
fn temp_dir_paths_are_unique_across_threads() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(|| {
                let dirs: Vec<_> = (0..4).map(|_| temp_dir().unwrap()).collect();
                let paths: Vec<PathBuf> =
                    dirs.iter().map(|dir| dir.path().to_path_buf()).collect();
                (dirs, paths)
            })
        })
        .collect();
    let mut alive = Vec::new();
    let mut unique = HashSet::new();
    for handle in handles {
        let (dirs, paths) = handle.join().unwrap();
        for path in paths {
            assert!(unique.insert(path), "duplicate temp dir path");
        }
        alive.push(dirs);
    }
    assert_eq!(unique.len(), 32);
}

#[test]
fn temp_dir_sequential_acquisitions_differ() {
    let first = temp_dir().unwrap();
    let first_path = first.path().to_path_buf();
    first.close().unwrap();
    let second = temp_dir().unwrap();
    assert_ne!(first_path, second.path());
}

#[test]
fn temp_dir_close_tolerates_caller_removal() {
    let dir = temp_dir().unwrap();
    std::fs::write(dir.join("out.html"), "<html/>").unwrap();
    std::fs::remove_dir_all(dir.path()).unwrap();
    dir.close().unwrap();
}

#[test]
fn temp_dir_close_removes_tree() {
    let dir = temp_dir().unwrap();
    let path = dir.path().to_path_buf();
    std::fs::create_dir(dir.join("out")).unwrap();
    dir.close().unwrap();
    assert!(!path.exists());
}

// ============================================================================
// SECTION: Mock Environment
// ============================================================================

#[test]
fn mock_env_exports_literal_values() {
    let _env = mock_env();
    assert_eq!(std::env::var(API_KEY).unwrap(), "sk-ant-test-key");
    assert_eq!(std::env::var(LOG_LEVEL).unwrap(), "DEBUG");
    assert_eq!(std::env::var(OUTPUT_DIR).unwrap(), "/tmp/proofkit_test");
}

#[test]
fn mock_env_values_match_key_catalog() {
    let names: Vec<&str> = MOCK_ENV_VARS.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(names, vec![API_KEY, LOG_LEVEL, OUTPUT_DIR]);
}

#[test]
fn mock_env_restores_absent_and_original_values() {
    let mut outer = MockEnv::locked();
    outer.remove(ProofKitEnv::AnthropicApiKey);
    outer.set(ProofKitEnv::LogLevel, "WARNING");
    outer.set(ProofKitEnv::OutputDir, "/srv/proofkit/runs");

    {
        let _inner = EnvGuard::mock();
        assert_eq!(std::env::var(API_KEY).unwrap(), "sk-ant-test-key");
        assert_eq!(std::env::var(LOG_LEVEL).unwrap(), "DEBUG");
    }

    assert!(std::env::var_os(API_KEY).is_none());
    assert_eq!(std::env::var(LOG_LEVEL).unwrap(), "WARNING");
    assert_eq!(std::env::var(OUTPUT_DIR).unwrap(), "/srv/proofkit/runs");
}

#[test]
fn mock_env_restores_after_panic() {
    let before = {
        let _lock = env_lock();
        snapshot()
    };
    let outcome = catch_unwind(|| {
        let _env = mock_env();
        panic!("test body failed");
    });
    assert!(outcome.is_err());
    let _lock = env_lock();
    assert_eq!(snapshot(), before);
}

#[test]
fn env_guard_restores_state_from_before_first_mutation() {
    let _lock = env_lock();
    let mut outer = EnvGuard::capture(&["PROOFKIT_FIXTURE_PROBE"]);
    outer.remove("PROOFKIT_FIXTURE_PROBE");
    {
        let mut guard = EnvGuard::new();
        guard.set("PROOFKIT_FIXTURE_PROBE", "one");
        guard.set("PROOFKIT_FIXTURE_PROBE", "two");
        guard.remove("PROOFKIT_FIXTURE_PROBE");
        guard.set("PROOFKIT_FIXTURE_PROBE", "three");
        assert_eq!(guard.names().collect::<Vec<_>>(), vec!["PROOFKIT_FIXTURE_PROBE"]);
    }
    assert!(std::env::var_os("PROOFKIT_FIXTURE_PROBE").is_none());
}

#[test]
fn clear_all_hides_every_proofkit_variable() {
    let mut env = mock_env();
    env.clear_all();
    for key in ProofKitEnv::ALL {
        assert!(std::env::var_os(key.as_str()).is_none(), "{} still set", key.as_str());
    }
}

// ============================================================================
// SECTION: Sample Values
// ============================================================================

#[test]
fn sample_url_is_fixed_literal() {
    assert_eq!(sample_url(), "https://example.com");
    assert_eq!(sample_url(), SAMPLE_URL);
    assert_eq!(sample_url(), sample_url());
}
