use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleConfig {
    /// Timezone applied when a schedule's DTSTART carries none.
    pub default_timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `config.toml` and
    /// `NEXTTIME__*` environment variables. Environment variables take precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it or
    /// validating it fails.
    pub fn load() -> CoreResult<Self> {
        let settings = Config::builder()
            .set_default("logging.level", "info")?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Environment
            .add_source(
                config::Environment::with_prefix("NEXTTIME")
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Rejects values that deserialize fine but cannot be used.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` for a blank default timezone
    /// or a blank log level.
    pub fn validate(&self) -> CoreResult<()> {
        if self
            .schedule
            .default_timezone
            .as_deref()
            .is_some_and(|tz| tz.trim().is_empty())
        {
            return Err(CoreError::InvalidConfiguration(
                "schedule.default_timezone must not be blank".to_string(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "logging.level must not be blank".to_string(),
            ));
        }

        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> CoreResult<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
