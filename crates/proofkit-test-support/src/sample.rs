// crates/proofkit-test-support/src/sample.rs
// ============================================================================
// Module: Sample Values
// Description: Fixed literals reused across test cases.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Literal inputs shared by tests that need a realistic audit target without
//! touching the network.

/// URL used wherever a test needs a syntactically valid audit target.
pub const SAMPLE_URL: &str = "https://example.com";

/// Returns [`SAMPLE_URL`].
#[must_use]
pub const fn sample_url() -> &'static str {
    SAMPLE_URL
}
