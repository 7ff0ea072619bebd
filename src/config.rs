use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::AggregatorSettings;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub suggestions: SuggestionSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub profiles: String,
    pub connections: String,
    pub blocks: String,
    pub participations: String,
    pub roles: String,
    pub projects: String,
    pub applications: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_ttl() -> u64 { 30 }
fn default_cache_capacity() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionSettings {
    #[serde(default = "default_min_people")]
    pub min_people: usize,
    #[serde(default = "default_max_people")]
    pub max_people: usize,
    #[serde(default = "default_max_roles")]
    pub max_roles: usize,
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    #[serde(default = "default_min_role_score")]
    pub min_role_score: u8,
    #[serde(default)]
    pub rank_by_weight: bool,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            min_people: default_min_people(),
            max_people: default_max_people(),
            max_roles: default_max_roles(),
            max_candidates: default_max_candidates(),
            min_role_score: default_min_role_score(),
            rank_by_weight: false,
        }
    }
}

impl From<&SuggestionSettings> for AggregatorSettings {
    fn from(s: &SuggestionSettings) -> Self {
        AggregatorSettings {
            min_people: s.min_people,
            max_people: s.max_people,
            max_roles: s.max_roles,
            max_candidates: s.max_candidates,
            min_role_score: s.min_role_score,
            rank_by_weight: s.rank_by_weight,
        }
    }
}

fn default_min_people() -> usize { 3 }
fn default_max_people() -> usize { 5 }
fn default_max_roles() -> usize { 10 }
fn default_max_candidates() -> usize { 20 }
fn default_min_role_score() -> u8 { 20 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_category_weight")]
    pub category: f64,
    #[serde(default = "default_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_experience_weight")]
    pub experience: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            category: default_category_weight(),
            skills: default_skills_weight(),
            location: default_location_weight(),
            experience: default_experience_weight(),
            availability: default_availability_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(w: &WeightsConfig) -> Self {
        ScoringWeights {
            category: w.category,
            skills: w.skills,
            location: w.location,
            experience: w.experience,
            availability: w.availability,
        }
    }
}

fn default_category_weight() -> f64 { 40.0 }
fn default_skills_weight() -> f64 { 25.0 }
fn default_location_weight() -> f64 { 20.0 }
fn default_experience_weight() -> f64 { 10.0 }
fn default_availability_weight() -> f64 { 5.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_search_threshold")]
    pub default_threshold: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_threshold: default_search_threshold(),
        }
    }
}

fn default_search_threshold() -> f64 { crate::core::DEFAULT_THRESHOLD }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CREW_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CREW__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CREW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CREW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn aggregator_settings(&self) -> AggregatorSettings {
        AggregatorSettings::from(&self.suggestions)
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}
