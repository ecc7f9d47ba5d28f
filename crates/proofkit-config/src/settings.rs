// crates/proofkit-config/src/settings.rs
// ============================================================================
// Module: ProofKit Settings
// Description: Typed ProofKit settings with strict env parsing.
// Purpose: Resolve runtime settings from env, `.env`, and defaults.
// Dependencies: proofkit-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every field of [`ProofKitSettings`] maps to one [`ProofKitEnv`] key.
//! Lookups consult the process environment first, then the `.env` file, and
//! fall back to the field default. Values are validated as they are read, so
//! a loaded settings value is always internally consistent.
//! Security posture: env inputs are untrusted; the API key never appears in
//! `Debug` output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use proofkit_core::ConfigError;
use proofkit_core::LogLevel;
use proofkit_core::LoggerConfig;
use proofkit_core::ProofKitEnv;
use proofkit_core::read_env_strict;
use serde::Deserialize;
use serde::Serialize;

use crate::dotenv::EnvFile;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default `.env` location, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";
/// Default run output root.
const DEFAULT_OUTPUT_DIR: &str = "runs";
/// Default report template directory.
const DEFAULT_TEMPLATES_DIR: &str = "templates";
/// Default browser navigation timeout in milliseconds.
const DEFAULT_PLAYWRIGHT_TIMEOUT_MS: u64 = 60_000;
/// Default Lighthouse throttling profile.
const DEFAULT_LIGHTHOUSE_THROTTLING: &str = "mobile";
/// Default page budget for fast audits.
const DEFAULT_MAX_PAGES_FAST: u32 = 5;
/// Default page budget for full audits.
const DEFAULT_MAX_PAGES_FULL: u32 = 50;
/// Default narrative model.
const DEFAULT_AI_MODEL: &str = "claude-sonnet-4-20250514";
/// Default narrative token ceiling.
const DEFAULT_AI_MAX_TOKENS: u32 = 2_000;
/// Smallest accepted sum of score weights.
const MIN_WEIGHT_TOTAL: f64 = 0.99;
/// Largest accepted sum of score weights.
const MAX_WEIGHT_TOTAL: f64 = 1.01;
/// Placeholder printed instead of the API key.
const REDACTED: &str = "<redacted>";

// ============================================================================
// SECTION: Score Weights
// ============================================================================

/// Scoring categories weighted into the overall audit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreCategory {
    /// Page speed and Core Web Vitals.
    Performance,
    /// Search engine optimization.
    Seo,
    /// Lead capture and calls to action.
    Conversion,
    /// Usability and accessibility.
    Ux,
    /// Transport and header security.
    Security,
    /// Stack freshness and upkeep.
    Maintenance,
}

impl ScoreCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Performance,
        Self::Seo,
        Self::Conversion,
        Self::Ux,
        Self::Security,
        Self::Maintenance,
    ];

    /// Returns the canonical uppercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Performance => "PERFORMANCE",
            Self::Seo => "SEO",
            Self::Conversion => "CONVERSION",
            Self::Ux => "UX",
            Self::Security => "SECURITY",
            Self::Maintenance => "MAINTENANCE",
        }
    }
}

/// Relative weight of each scoring category.
///
/// # Invariants
/// - Every weight is finite and non-negative.
/// - Weights sum to 1.0 within a 0.01 tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "UPPERCASE")]
pub struct ScoreWeights {
    /// Weight of [`ScoreCategory::Performance`].
    pub performance: f64,
    /// Weight of [`ScoreCategory::Seo`].
    pub seo: f64,
    /// Weight of [`ScoreCategory::Conversion`].
    pub conversion: f64,
    /// Weight of [`ScoreCategory::Ux`].
    pub ux: f64,
    /// Weight of [`ScoreCategory::Security`].
    pub security: f64,
    /// Weight of [`ScoreCategory::Maintenance`].
    pub maintenance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            performance: 0.25,
            seo: 0.20,
            conversion: 0.25,
            ux: 0.15,
            security: 0.10,
            maintenance: 0.05,
        }
    }
}

impl ScoreWeights {
    /// Returns the weight for `category`.
    #[must_use]
    pub const fn get(&self, category: ScoreCategory) -> f64 {
        match category {
            ScoreCategory::Performance => self.performance,
            ScoreCategory::Seo => self.seo,
            ScoreCategory::Conversion => self.conversion,
            ScoreCategory::Ux => self.ux,
            ScoreCategory::Security => self.security,
            ScoreCategory::Maintenance => self.maintenance,
        }
    }

    /// Returns the sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        ScoreCategory::ALL.iter().map(|category| self.get(*category)).sum()
    }

    /// Validates weight bounds and the total.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a weight is negative or not
    /// finite, or when the total falls outside `[0.99, 1.01]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in ScoreCategory::ALL {
            let weight = self.get(category);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "score weight {} must be a non-negative number",
                    category.as_str()
                )));
            }
        }
        let total = self.total();
        if !(MIN_WEIGHT_TOTAL..=MAX_WEIGHT_TOTAL).contains(&total) {
            return Err(ConfigError::Invalid(format!(
                "score weights must sum to 1.0 (got {total:.3})"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// ProofKit runtime settings.
#[derive(Clone, PartialEq)]
pub struct ProofKitSettings {
    /// Anthropic API key; may be empty until a narrative is requested.
    pub anthropic_api_key: String,
    /// Root directory for audit runs.
    pub output_dir: PathBuf,
    /// Directory holding report templates.
    pub templates_dir: PathBuf,
    /// Browser navigation timeout in milliseconds.
    pub playwright_timeout_ms: u64,
    /// Lighthouse throttling profile name.
    pub lighthouse_throttling: String,
    /// Page budget for fast audits.
    pub max_pages_fast: u32,
    /// Page budget for full audits.
    pub max_pages_full: u32,
    /// Category weights for the overall score.
    pub score_weights: ScoreWeights,
    /// Model identifier for narrative generation.
    pub ai_model: String,
    /// Token ceiling for narrative generation.
    pub ai_max_tokens: u32,
    /// Minimum log level.
    pub log_level: LogLevel,
}

impl Default for ProofKitSettings {
    fn default() -> Self {
        Self {
            anthropic_api_key: String::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            playwright_timeout_ms: DEFAULT_PLAYWRIGHT_TIMEOUT_MS,
            lighthouse_throttling: DEFAULT_LIGHTHOUSE_THROTTLING.to_string(),
            max_pages_fast: DEFAULT_MAX_PAGES_FAST,
            max_pages_full: DEFAULT_MAX_PAGES_FULL,
            score_weights: ScoreWeights::default(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            ai_max_tokens: DEFAULT_AI_MAX_TOKENS,
            log_level: LogLevel::Info,
        }
    }
}

impl fmt::Debug for ProofKitSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.anthropic_api_key.is_empty() { "" } else { REDACTED };
        f.debug_struct("ProofKitSettings")
            .field("anthropic_api_key", &api_key)
            .field("output_dir", &self.output_dir)
            .field("templates_dir", &self.templates_dir)
            .field("playwright_timeout_ms", &self.playwright_timeout_ms)
            .field("lighthouse_throttling", &self.lighthouse_throttling)
            .field("max_pages_fast", &self.max_pages_fast)
            .field("max_pages_full", &self.max_pages_full)
            .field("score_weights", &self.score_weights)
            .field("ai_model", &self.ai_model)
            .field("ai_max_tokens", &self.ai_max_tokens)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl ProofKitSettings {
    /// Loads settings from the environment and `./.env` when it exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the `.env` file or any value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."))
    }

    /// Loads settings from the environment and `dir/.env` when it is a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the `.env` file or any value is invalid.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(DEFAULT_ENV_FILE);
        let file = if path.is_file() { EnvFile::read(&path)? } else { EnvFile::default() };
        Self::resolve(&file)
    }

    /// Loads settings from the environment and the `.env` file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file is missing, and
    /// [`ConfigError`] when the file or any value is invalid.
    pub fn load_with_env_file(path: &Path) -> Result<Self, ConfigError> {
        Self::resolve(&EnvFile::read(path)?)
    }

    /// Loads settings from the process environment only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(&EnvFile::default())
    }

    /// Resolves every field against the layered sources.
    fn resolve(file: &EnvFile) -> Result<Self, ConfigError> {
        let source = LayeredSource {
            file,
        };
        let mut settings = Self::default();
        if let Some(value) = source.raw(ProofKitEnv::AnthropicApiKey)? {
            settings.anthropic_api_key = value;
        }
        if let Some(value) = source.nonempty(ProofKitEnv::OutputDir)? {
            settings.output_dir = normalize_path(&value);
        }
        if let Some(value) = source.nonempty(ProofKitEnv::TemplatesDir)? {
            settings.templates_dir = normalize_path(&value);
        }
        if let Some(value) = source.positive(ProofKitEnv::PlaywrightTimeout)? {
            settings.playwright_timeout_ms = value;
        }
        if let Some(value) = source.nonempty(ProofKitEnv::LighthouseThrottling)? {
            settings.lighthouse_throttling = value;
        }
        if let Some(value) = source.positive(ProofKitEnv::MaxPagesFast)? {
            settings.max_pages_fast = value;
        }
        if let Some(value) = source.positive(ProofKitEnv::MaxPagesFull)? {
            settings.max_pages_full = value;
        }
        if let Some(value) = source.nonempty(ProofKitEnv::ScoreWeights)? {
            settings.score_weights = parse_score_weights(ProofKitEnv::ScoreWeights, &value)?;
        }
        if let Some(value) = source.nonempty(ProofKitEnv::AiModel)? {
            settings.ai_model = value;
        }
        if let Some(value) = source.positive(ProofKitEnv::AiMaxTokens)? {
            settings.ai_max_tokens = value;
        }
        if let Some(value) = source.nonempty(ProofKitEnv::LogLevel)? {
            settings.log_level = LogLevel::from_str(&value).map_err(|err| {
                ConfigError::Invalid(format!("{}: {err}", ProofKitEnv::LogLevel.as_str()))
            })?;
        }
        Ok(settings)
    }

    /// Returns the API key, failing when it is blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when the key is empty or
    /// whitespace.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        if self.anthropic_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey(ProofKitEnv::AnthropicApiKey.as_str()));
        }
        Ok(&self.anthropic_api_key)
    }

    /// Returns logger parameters derived from these settings.
    #[must_use]
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: self.log_level,
            ..LoggerConfig::default()
        }
    }

    /// Returns the run directory under [`Self::output_dir`].
    #[must_use]
    pub fn run_dir(&self, run_id: Option<&str>) -> PathBuf {
        proofkit_core::run_dir(&self.output_dir, run_id)
    }
}

// ============================================================================
// SECTION: Sources
// ============================================================================

/// Process environment layered over a `.env` file.
struct LayeredSource<'a> {
    /// Lower-precedence file entries.
    file: &'a EnvFile,
}

impl LayeredSource<'_> {
    /// Returns the raw value for `key`, preferring the process environment.
    fn raw(&self, key: ProofKitEnv) -> Result<Option<String>, ConfigError> {
        if let Some(value) = read_env_strict(key.as_str())? {
            return Ok(Some(value));
        }
        Ok(self.file.get(key.as_str()).map(str::to_string))
    }

    /// Returns the value for `key`, rejecting blank values.
    fn nonempty(&self, key: ProofKitEnv) -> Result<Option<String>, ConfigError> {
        match self.raw(key)? {
            Some(value) if value.trim().is_empty() => {
                Err(ConfigError::Invalid(format!("{} must not be empty", key.as_str())))
            }
            Some(value) => Ok(Some(value.trim().to_string())),
            None => Ok(None),
        }
    }

    /// Returns the value for `key` parsed as a positive integer.
    fn positive<T>(&self, key: ProofKitEnv) -> Result<Option<T>, ConfigError>
    where
        T: FromStr + PartialEq + Default,
    {
        self.nonempty(key)?.map(|value| parse_positive(key, &value)).transpose()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a positive integer value.
fn parse_positive<T>(key: ProofKitEnv, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    let value: T = raw.parse().map_err(|_| {
        ConfigError::Invalid(format!("{} must be a positive integer", key.as_str()))
    })?;
    if value == T::default() {
        return Err(ConfigError::Invalid(format!("{} must be greater than zero", key.as_str())));
    }
    Ok(value)
}

/// Parses and validates a JSON score weight object.
fn parse_score_weights(key: ProofKitEnv, raw: &str) -> Result<ScoreWeights, ConfigError> {
    let weights: ScoreWeights = serde_json::from_str(raw).map_err(|err| {
        ConfigError::Invalid(format!("{} must be a JSON object of weights: {err}", key.as_str()))
    })?;
    weights.validate()?;
    Ok(weights)
}

/// Drops `.` components so `./runs` and `runs` compare equal.
fn normalize_path(raw: &str) -> PathBuf {
    let normalized: PathBuf =
        Path::new(raw).components().filter(|part| !matches!(part, Component::CurDir)).collect();
    if normalized.as_os_str().is_empty() { PathBuf::from(".") } else { normalized }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test-only assertions favor direct unwrap for clarity.")]
mod tests {
    use std::path::PathBuf;

    use proofkit_core::ConfigError;
    use proofkit_core::ProofKitEnv;

    use super::ScoreCategory;
    use super::ScoreWeights;
    use super::normalize_path;
    use super::parse_positive;
    use super::parse_score_weights;

    #[test]
    fn normalize_drops_current_dir_components() {
        assert_eq!(normalize_path("./custom/runs"), PathBuf::from("custom/runs"));
        assert_eq!(normalize_path("/custom/./output"), PathBuf::from("/custom/output"));
        assert_eq!(normalize_path("./"), PathBuf::from("."));
        assert_eq!(normalize_path("../shared"), PathBuf::from("../shared"));
    }

    #[test]
    fn positive_rejects_zero_negative_and_garbage() {
        let key = ProofKitEnv::MaxPagesFast;
        assert_eq!(parse_positive::<u32>(key, "10").unwrap(), 10);
        assert!(parse_positive::<u32>(key, "0").is_err());
        assert!(parse_positive::<u32>(key, "-3").is_err());
        assert!(parse_positive::<u32>(key, "ten").is_err());
        assert!(parse_positive::<u32>(key, "4294967296").is_err());
    }

    #[test]
    fn default_weights_sum_to_one() {
        let weights = ScoreWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-9);
        weights.validate().unwrap();
    }

    #[test]
    fn weights_reject_negative_and_unbalanced_totals() {
        let negative = ScoreWeights {
            performance: -0.05,
            maintenance: 0.35,
            ..ScoreWeights::default()
        };
        assert!(matches!(negative.validate(), Err(ConfigError::Invalid(_))));

        let heavy = ScoreWeights {
            performance: 0.5,
            ..ScoreWeights::default()
        };
        assert!(heavy.validate().is_err());
    }

    #[test]
    fn weights_parse_from_uppercase_json() {
        let weights = parse_score_weights(
            ProofKitEnv::ScoreWeights,
            r#"{"PERFORMANCE":0.3,"SEO":0.2,"CONVERSION":0.2,"UX":0.1,"SECURITY":0.1,"MAINTENANCE":0.1}"#,
        )
        .unwrap();
        assert!((weights.get(ScoreCategory::Performance) - 0.3).abs() < 1e-9);
        assert!((weights.get(ScoreCategory::Maintenance) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn weights_reject_missing_or_unknown_categories() {
        let key = ProofKitEnv::ScoreWeights;
        assert!(parse_score_weights(key, r#"{"PERFORMANCE":1.0}"#).is_err());
        assert!(
            parse_score_weights(
                key,
                r#"{"PERFORMANCE":0.25,"SEO":0.2,"CONVERSION":0.25,"UX":0.15,"SECURITY":0.1,"MAINTENANCE":0.05,"SPEED":0.0}"#,
            )
            .is_err()
        );
        assert!(parse_score_weights(key, "[0.25]").is_err());
    }
}
