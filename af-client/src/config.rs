use serde::Deserialize;
use url::Url;

fn default_timeout_secs() -> u64 {
    10
}

/// Base URLs of the APIs the console talks to.
///
/// Each base is the scheme, host and optional path prefix in front of the
/// API's own paths, e.g. `http://af.example:8050` for
/// `http://af.example:8050/af/v1/pfd/transactions`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// AF API (`/af/v1/subscriptions`, `/af/v1/pfd/transactions`)
    pub af_url: Url,
    /// 5G OAM API (`/ngcoam/v1/af/services`)
    pub oam_url: Url,
    /// CUPS API (`/userplanes`)
    pub cups_url: Url,
    /// Timeout applied to every request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_config() {
        let yaml = r#"
af_url: "http://10.0.0.1:8050"
oam_url: "http://10.0.0.1:8070/proxy/"
cups_url: "http://10.0.0.2:8080"
"#;
        let config: ApiConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.af_url.as_str(), "http://10.0.0.1:8050/");
        assert_eq!(config.oam_url.path(), "/proxy/");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(
            serde_yaml::from_str::<ApiConfig>(
                r#"
af_url: "not-a-url"
oam_url: "http://10.0.0.1:8070"
cups_url: "http://10.0.0.2:8080"
"#
            )
            .is_err()
        );

        // Missing required field
        assert!(serde_yaml::from_str::<ApiConfig>(r#"af_url: "http://10.0.0.1""#).is_err());
    }
}
