// crates/proofkit-core/src/env.rs
// ============================================================================
// Module: ProofKit Environment Keys
// Description: Catalog of environment variables recognized by ProofKit.
// Purpose: Keep env names in one place with strict UTF-8 reads.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Every environment variable ProofKit reads is named here. Values are read
//! with strict UTF-8 enforcement so misconfiguration fails closed instead of
//! being silently replaced.

use crate::error::ConfigError;

// ============================================================================
// SECTION: Environment Keys
// ============================================================================

/// Environment keys for ProofKit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProofKitEnv {
    /// Anthropic API key used by the narrator.
    AnthropicApiKey,
    /// Root directory for audit runs.
    OutputDir,
    /// Directory holding report templates.
    TemplatesDir,
    /// Browser navigation timeout in milliseconds.
    PlaywrightTimeout,
    /// Lighthouse throttling profile name.
    LighthouseThrottling,
    /// Page budget for fast audits.
    MaxPagesFast,
    /// Page budget for full audits.
    MaxPagesFull,
    /// JSON object overriding category score weights.
    ScoreWeights,
    /// Model identifier for narrative generation.
    AiModel,
    /// Token ceiling for narrative generation.
    AiMaxTokens,
    /// Minimum log level.
    LogLevel,
}

impl ProofKitEnv {
    /// Every recognized key, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::AnthropicApiKey,
        Self::OutputDir,
        Self::TemplatesDir,
        Self::PlaywrightTimeout,
        Self::LighthouseThrottling,
        Self::MaxPagesFast,
        Self::MaxPagesFull,
        Self::ScoreWeights,
        Self::AiModel,
        Self::AiMaxTokens,
        Self::LogLevel,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnthropicApiKey => "ANTHROPIC_API_KEY",
            Self::OutputDir => "PROOFKIT_OUTPUT_DIR",
            Self::TemplatesDir => "PROOFKIT_TEMPLATES_DIR",
            Self::PlaywrightTimeout => "PROOFKIT_PLAYWRIGHT_TIMEOUT",
            Self::LighthouseThrottling => "PROOFKIT_LIGHTHOUSE_THROTTLING",
            Self::MaxPagesFast => "PROOFKIT_MAX_PAGES_FAST",
            Self::MaxPagesFull => "PROOFKIT_MAX_PAGES_FULL",
            Self::ScoreWeights => "PROOFKIT_SCORE_WEIGHTS",
            Self::AiModel => "PROOFKIT_AI_MODEL",
            Self::AiMaxTokens => "PROOFKIT_AI_MAX_TOKENS",
            Self::LogLevel => "PROOFKIT_LOG_LEVEL",
        }
    }

    /// Looks up a key by its environment variable name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name} must be valid UTF-8")))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::ProofKitEnv;

    #[test]
    fn names_round_trip_through_lookup() {
        for key in ProofKitEnv::ALL {
            assert_eq!(ProofKitEnv::from_name(key.as_str()), Some(key));
        }
        assert_eq!(ProofKitEnv::from_name("PROOFKIT_UNKNOWN"), None);
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = ProofKitEnv::ALL.iter().map(|key| key.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ProofKitEnv::ALL.len());
    }
}
