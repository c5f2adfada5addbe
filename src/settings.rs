use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use dotenv::dotenv;

pub const DEFAULT_API_BASE_URL: &str = "https://restaurant-bookings-api.onrender.com";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Root of the bookings API, without the `/api/...` path
    pub api_base_url: String,
    /// How long the confirmation dialog stays open in milliseconds
    pub confirmation_close_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            confirmation_close_ms: 3000,
        }
    }
}

impl Settings {
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        dotenv().ok();

        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings: Settings = serde_yaml::from_str(contents)?;

        settings.api_base_url = parse_env_var(&settings.api_base_url)?;

        Ok(settings)
    }

    /// Like [`Settings::from_yaml`], but a missing file means defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        if !path.as_ref().exists() {
            return Ok(Self::default());
        }
        Self::from_yaml(path)
    }

    pub fn confirmation_close(&self) -> Duration {
        Duration::from_millis(self.confirmation_close_ms)
    }
}

fn parse_env_var(value: &str) -> Result<String, Box<dyn std::error::Error>> {
    if value.starts_with("${") && value.ends_with("}") {
        let env_name = &value[2..value.len() - 1];
        match env::var(env_name) {
            Ok(val) => Ok(val),
            Err(_) => Err(format!("Environment variable '{}' not found", env_name).into()),
        }
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings = Settings::from_yaml_str("confirmation_close_ms: 1500").unwrap();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.confirmation_close(), Duration::from_millis(1500));
    }

    #[test]
    fn api_url_is_read_from_the_environment() {
        env::set_var("BOOKINGS_SETTINGS_TEST_URL", "http://localhost:4000");
        let settings =
            Settings::from_yaml_str("api_base_url: ${BOOKINGS_SETTINGS_TEST_URL}").unwrap();
        assert_eq!(settings.api_base_url, "http://localhost:4000");
    }

    #[test]
    fn unknown_environment_variable_is_an_error() {
        let err = Settings::from_yaml_str("api_base_url: ${BOOKINGS_SETTINGS_TEST_UNSET}")
            .unwrap_err();
        assert!(err.to_string().contains("BOOKINGS_SETTINGS_TEST_UNSET"));
    }

    #[test]
    fn missing_file_means_defaults() {
        let settings = Settings::load("does-not-exist/settings.yaml").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
