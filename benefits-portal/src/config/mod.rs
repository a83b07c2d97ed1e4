use serde::Deserialize;
use service_core::error::AppError;
use validator::Validate;

#[derive(Deserialize, Clone, Validate)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    #[validate(nested)]
    pub session: SessionSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug, Validate)]
pub struct SessionSettings {
    /// Idle time after which the browser's portal state is forgotten.
    /// Capped at one year.
    #[serde(default = "default_inactivity_hours")]
    #[validate(range(min = 1, max = 8760))]
    pub inactivity_hours: i64,
    /// Set to true when served over HTTPS.
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            inactivity_hours: default_inactivity_hours(),
            secure_cookie: false,
        }
    }
}

fn default_inactivity_hours() -> i64 {
    24
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector, e.g. http://tempo:4317. Traces are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let base_path = std::env::current_dir().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Failed to determine the current directory: {}",
            e
        ))
    })?;

    // Check if we're already in benefits-portal directory or need to navigate to it
    let configuration_directory = if base_path.ends_with("benefits-portal") {
        base_path.join("config")
    } else {
        base_path.join("benefits-portal").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    load_settings(settings)
}

/// Deserialize and range-check the merged configuration.
pub fn load_settings(config: config::Config) -> Result<Settings, AppError> {
    let settings = config.try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(overrides: &[(&str, i64)]) -> Result<Settings, AppError> {
        let mut builder = config::Config::builder()
            .set_override("server.host", "127.0.0.1")
            .unwrap()
            .set_override("server.port", 9000)
            .unwrap();
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value).unwrap();
        }
        load_settings(builder.build().unwrap())
    }

    #[test]
    fn test_optional_sections_default() {
        let settings = build(&[]).unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.session.inactivity_hours, 24);
        assert!(!settings.session.secure_cookie);
        assert_eq!(settings.telemetry.log_level, "info");
        assert!(settings.telemetry.otlp_endpoint.is_none());
    }

    #[test]
    fn test_inactivity_window_is_range_checked() {
        for hours in [0, -5, 1_000_000_000_000] {
            let result = build(&[("session.inactivity_hours", hours)]);
            assert!(
                matches!(result, Err(AppError::ValidationError(_))),
                "{hours} hours should be rejected"
            );
        }

        let settings = build(&[("session.inactivity_hours", 8760)]).unwrap();
        assert_eq!(settings.session.inactivity_hours, 8760);
    }

    #[test]
    fn test_missing_server_section_is_a_config_error() {
        let result = load_settings(config::Config::builder().build().unwrap());
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
