use serde::{Deserialize, Serialize};

/// Top-level configuration, read from `~/.cazcheck/config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Derive `last_year_mileage` from the two most recent MOT tests.
    /// When off, the envelope always reports 0.
    pub enable_mileage_rate: bool,
    pub checker: CheckerConfig,
    pub mot: MotConfig,
}

/// Clean air zone vehicle checker (HTML form service)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub base_url: String,
    pub entry_path: String,
    pub confirm_path: String,
    /// The checker rejects requests without a browser-like agent
    pub user_agent: String,
    /// First cell of the result row we care about, compared exactly
    pub zone: String,
    /// Charge shown for a chargeable vehicle, e.g. "£8.00"
    pub charge_amount: String,
    pub no_charge_text: String,
    pub timeout_secs: u64,
}

/// MOT history REST API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl CheckerConfig {
    pub fn entry_url(&self) -> String {
        join_url(&self.base_url, &self.entry_path)
    }

    pub fn confirm_url(&self) -> String {
        join_url(&self.base_url, &self.confirm_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_join_without_double_slash() {
        let mut checker = CheckerConfig::default();
        checker.base_url = "http://127.0.0.1:8080/".to_string();
        checker.entry_path = "/vehicle_checkers/enter_details".to_string();
        assert_eq!(
            checker.entry_url(),
            "http://127.0.0.1:8080/vehicle_checkers/enter_details"
        );
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            enable_mileage_rate = true

            [mot]
            api_key = "abc"
            "#,
        )
        .unwrap();

        assert!(config.enable_mileage_rate);
        assert_eq!(config.mot.api_key.as_deref(), Some("abc"));
        assert_eq!(config.checker, CheckerConfig::default());
    }
}
