use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::render::Engine;

pub const DEFAULT_ENDPOINT: &str = "http://cvtool-cgk-node.azurewebsites.net/graphql";
pub const DEFAULT_USERNAME: &str = "pieterb";
pub const DEFAULT_OUTPUT: &str = "template.pdf";

/// Generator configuration loaded from environment variables (and `.env`).
/// Every variable has a default; invalid values fail at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub username: String,
    /// When set, the profile is read from this JSON file instead of the endpoint.
    pub profile_file: Option<PathBuf>,
    pub output: PathBuf,
    pub engine: Engine,
    pub header_image: Option<PathBuf>,
    pub keep_tex: bool,
    pub http_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            endpoint: var("CV_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            username: var("CV_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            profile_file: var("CV_PROFILE_FILE").map(PathBuf::from),
            output: PathBuf::from(var("CV_OUTPUT").unwrap_or_else(|| DEFAULT_OUTPUT.to_string())),
            engine: match var("CV_ENGINE") {
                Some(raw) => raw
                    .parse::<Engine>()
                    .map_err(|e| anyhow!(e))
                    .context("CV_ENGINE is invalid")?,
                None => Engine::default(),
            },
            header_image: var("CV_HEADER_IMAGE").map(PathBuf::from),
            keep_tex: match var("CV_KEEP_TEX") {
                Some(raw) => parse_bool(&raw).context("CV_KEEP_TEX must be true or false")?,
                None => false,
            },
            http_timeout: Duration::from_secs(
                var("CV_HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse::<u64>()
                    .context("CV_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("'{other}' is not a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.username, "pieterb");
        assert_eq!(config.output, PathBuf::from("template.pdf"));
        assert_eq!(config.engine, Engine::LuaLatex);
        assert!(config.profile_file.is_none());
        assert!(config.header_image.is_none());
        assert!(!config.keep_tex);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CV_USERNAME", "janed"),
            ("CV_PROFILE_FILE", "resources/employee.json"),
            ("CV_ENGINE", "XeLaTeX"),
            ("CV_KEEP_TEX", "yes"),
            ("CV_HTTP_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.username, "janed");
        assert_eq!(
            config.profile_file,
            Some(PathBuf::from("resources/employee.json"))
        );
        assert_eq!(config.engine, Engine::XeLatex);
        assert!(config.keep_tex);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("CV_USERNAME", "  "), ("CV_PROFILE_FILE", "")]).unwrap();
        assert_eq!(config.username, DEFAULT_USERNAME);
        assert!(config.profile_file.is_none());
    }

    #[test]
    fn test_invalid_engine_is_rejected() {
        let err = config_from(&[("CV_ENGINE", "troff")]).unwrap_err();
        assert!(format!("{err:#}").contains("CV_ENGINE"));
    }

    #[test]
    fn test_invalid_bool_is_rejected() {
        assert!(config_from(&[("CV_KEEP_TEX", "maybe")]).is_err());
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        assert!(config_from(&[("CV_HTTP_TIMEOUT_SECS", "soon")]).is_err());
    }
}
