use af_client::ApiConfig;
use pfd::DuplicateKeyPolicy;
use serde::Deserialize;
use std::fs::File;

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct MetricsConfig {
    pub statsd_host: String,
    pub statsd_port: u16,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,
    pub sentry_dsn: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommonConfig {
    pub metrics: Option<MetricsConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub on_duplicate_key: DuplicateKeyPolicy,
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub common: CommonConfig,
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub schema: SchemaConfig,
}

impl Config {
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let data = serde_yaml::from_reader(file)?;

        Ok(data)
    }

    /// The `api` section, required by every command that talks to a backend.
    pub fn api(&self) -> Result<&ApiConfig, ConfigError> {
        self.api.as_ref().ok_or(ConfigError::MissingSection("api"))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("config has no `{0}` section")]
    MissingSection(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp_file(s: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        write!(tmp, "{}", s).expect("write yaml");

        tmp
    }

    #[test]
    fn full_config() {
        let yaml = r#"
            logging:
                level: debug
                sentry_dsn: https://key@sentry.example/1
            metrics:
                statsd_host: 127.0.0.1
                statsd_port: 8125
            api:
                af_url: http://af.example:8050
                oam_url: http://oam.example:8070
                cups_url: http://cups.example:8080
                timeout_secs: 3
            schema:
                on_duplicate_key: reject
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");

        let logging = config.common.logging.as_ref().expect("logging config");
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.sentry_dsn.as_deref(), Some("https://key@sentry.example/1"));

        let metrics = config.common.metrics.as_ref().expect("metrics config");
        assert_eq!(metrics.statsd_port, 8125);

        let api = config.api().expect("api config");
        assert_eq!(api.af_url.as_str(), "http://af.example:8050/");
        assert_eq!(api.timeout_secs, 3);

        assert_eq!(config.schema.on_duplicate_key, DuplicateKeyPolicy::Reject);
    }

    #[test]
    fn minimal_config() {
        let tmp = write_tmp_file("logging:\n    sentry_dsn: null\n");
        let config = Config::from_file(tmp.path()).expect("load config");

        assert_eq!(config.common.logging.as_ref().expect("logging config").level, "info");
        assert!(config.common.metrics.is_none());
        assert_eq!(config.schema.on_duplicate_key, DuplicateKeyPolicy::Overwrite);
        assert!(matches!(config.api(), Err(ConfigError::MissingSection("api"))));
    }

    #[test]
    fn invalid_values() {
        let bad_url = r#"
            api:
                af_url: "not a url"
                oam_url: http://oam.example
                cups_url: http://cups.example
            "#;
        let tmp = write_tmp_file(bad_url);
        assert!(matches!(Config::from_file(tmp.path()), Err(ConfigError::ParseError(_))));

        let bad_policy = "schema:\n    on_duplicate_key: merge\n";
        let tmp = write_tmp_file(bad_policy);
        assert!(matches!(Config::from_file(tmp.path()), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn missing_file() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/cnca.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
