// crates/proofkit-core/src/error.rs
// ============================================================================
// Module: ProofKit Errors
// Description: Error taxonomy shared across ProofKit crates.
// Purpose: Give each pipeline area a typed error rooted in one enum.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`ProofKitError`] is the root error. Each pipeline area owns a dedicated
//! enum that converts into it with `?`. Payloads are plain strings so errors
//! stay `Clone` and comparable in tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Area Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// Malformed configuration source.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// A required API key is missing or blank.
    #[error("missing api key: {0} is not set")]
    MissingApiKey(&'static str),
}

/// Data collection errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectorError {
    /// Browser automation failed.
    #[error("playwright error: {0}")]
    Playwright(String),
    /// Browser automation timed out.
    #[error("playwright timed out: {0}")]
    PlaywrightTimeout(String),
    /// Lighthouse audit failed.
    #[error("lighthouse error: {0}")]
    Lighthouse(String),
    /// HTTP probe failed.
    #[error("http probe error: {0}")]
    HttpProbe(String),
}

impl CollectorError {
    /// Returns true for browser automation failures, timeouts included.
    #[must_use]
    pub const fn is_playwright(&self) -> bool {
        matches!(self, Self::Playwright(_) | Self::PlaywrightTimeout(_))
    }
}

/// Analysis errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
    /// A rule failed while executing.
    #[error("rule execution failed: {0}")]
    RuleExecution(String),
    /// Score calculation failed.
    #[error("scoring failed: {0}")]
    Scoring(String),
}

/// Narrative generation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarratorError {
    /// The AI API call failed.
    #[error("ai api error: {0}")]
    AiApi(String),
    /// The request exceeded the token limit.
    #[error("token limit exceeded: {0}")]
    TokenLimit(String),
    /// A prompt template could not be rendered.
    #[error("prompt error: {0}")]
    Prompt(String),
}

/// Report building errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A report template could not be rendered.
    #[error("template error: {0}")]
    Template(String),
}

// ============================================================================
// SECTION: Root Error
// ============================================================================

/// Root error for ProofKit operations.
///
/// # Invariants
/// - [`ProofKitError::kind`] labels are stable for log records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofKitError {
    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Collection failure.
    #[error(transparent)]
    Collector(#[from] CollectorError),
    /// Analysis failure.
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
    /// Narrative failure.
    #[error(transparent)]
    Narrator(#[from] NarratorError),
    /// Report failure.
    #[error(transparent)]
    Report(#[from] ReportError),
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(String),
}

impl ProofKitError {
    /// Returns a stable label for the failing area.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Collector(_) => "collector",
            Self::Analyzer(_) => "analyzer",
            Self::Narrator(_) => "narrator",
            Self::Report(_) => "report",
            Self::Io(_) => "io",
        }
    }
}

impl From<std::io::Error> for ProofKitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test-only assertions favor direct unwrap for clarity.")]
mod tests {
    use super::CollectorError;
    use super::ConfigError;
    use super::NarratorError;
    use super::ProofKitError;

    fn load_key() -> Result<String, ProofKitError> {
        let key: Result<String, ConfigError> =
            Err(ConfigError::MissingApiKey("ANTHROPIC_API_KEY"));
        Ok(key?)
    }

    #[test]
    fn area_errors_convert_with_question_mark() {
        let err = load_key().unwrap_err();
        assert_eq!(err.kind(), "config");
        assert_eq!(err.to_string(), "missing api key: ANTHROPIC_API_KEY is not set");
    }

    #[test]
    fn timeout_counts_as_playwright_failure() {
        assert!(CollectorError::PlaywrightTimeout("nav".to_string()).is_playwright());
        assert!(CollectorError::Playwright("crash".to_string()).is_playwright());
        assert!(!CollectorError::Lighthouse("exit 1".to_string()).is_playwright());
    }

    #[test]
    fn io_errors_keep_their_message() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ProofKitError::from(io);
        assert_eq!(err.kind(), "io");
        assert_eq!(err.to_string(), "io error: denied");
    }

    #[test]
    fn transparent_variants_forward_display() {
        let err = ProofKitError::from(NarratorError::TokenLimit("4096 > 2000".to_string()));
        assert_eq!(err.kind(), "narrator");
        assert_eq!(err.to_string(), "token limit exceeded: 4096 > 2000");
    }
}
