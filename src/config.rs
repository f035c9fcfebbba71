use crate::core::aptitude::{QuestionSet, QuestionSetError};
use crate::core::MatchLimits;
use crate::models::Question;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    #[serde(default)]
    pub collection: CollectionSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub aptitude: AptitudeSettings,
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
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_colleges_collection")]
    pub colleges: String,
    #[serde(default = "default_students_collection")]
    pub students: String,
    #[serde(default = "default_tests_collection")]
    pub tests: String,
    #[serde(default = "default_admins_collection")]
    pub admins: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            colleges: default_colleges_collection(),
            students: default_students_collection(),
            tests: default_tests_collection(),
            admins: default_admins_collection(),
        }
    }
}

fn default_colleges_collection() -> String { "colleges".to_string() }
fn default_students_collection() -> String { "students".to_string() }
fn default_tests_collection() -> String { "tests".to_string() }
fn default_admins_collection() -> String { "admins".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Redis is optional; without it only the in-process tier is used
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> usize { 50 }
fn default_max_limit() -> usize { 200 }

impl From<&MatchingSettings> for MatchLimits {
    fn from(settings: &MatchingSettings) -> Self {
        MatchLimits {
            default_limit: settings.default_limit.min(settings.max_limit),
            max_limit: settings.max_limit,
        }
    }
}

/// Where the aptitude questions come from
///
/// `questions` (inline) wins over `question_file`; with neither set the
/// built-in sample test is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AptitudeSettings {
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
    #[serde(default)]
    pub question_file: Option<String>,
}

impl AptitudeSettings {
    pub fn question_set(&self) -> Result<QuestionSet, QuestionSetError> {
        if let Some(questions) = &self.questions {
            return QuestionSet::new(questions.clone());
        }
        if let Some(path) = &self.question_file {
            return QuestionSet::load(path);
        }
        Ok(QuestionSet::default())
    }
}

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
    /// 4. Environment variables (prefixed with COMPASS_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., COMPASS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("COMPASS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("COMPASS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Override secrets from well-known environment variables
///
/// `DATABASE_URL` and the `COMPASS_APPWRITE__*` variables take precedence
/// over anything in the config files.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", url)?;
    }

    for (var, key) in [
        ("COMPASS_APPWRITE__ENDPOINT", "appwrite.endpoint"),
        ("COMPASS_APPWRITE__API_KEY", "appwrite.api_key"),
        ("COMPASS_APPWRITE__PROJECT_ID", "appwrite.project_id"),
        ("COMPASS_APPWRITE__DATABASE_ID", "appwrite.database_id"),
        ("REDIS_URL", "cache.redis_url"),
    ] {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
