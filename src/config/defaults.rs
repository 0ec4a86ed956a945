use super::types::{CheckerConfig, Config, MotConfig};

pub const DEFAULT_CHECKER_BASE_URL: &str =
    "https://vehiclecheck.drive-clean-air-zone.service.gov.uk";
pub const DEFAULT_ENTRY_PATH: &str = "/vehicle_checkers/enter_details";
pub const DEFAULT_CONFIRM_PATH: &str = "/vehicle_checkers/confirm_details";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_6) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/83.0.4103.106 Safari/537.36; \
    TfWM Innovation (innovation@tfwm.org.uk)";
pub const DEFAULT_ZONE: &str = "Birmingham";
pub const DEFAULT_CHARGE_AMOUNT: &str = "£8.00";
pub const DEFAULT_NO_CHARGE_TEXT: &str = "No Charge";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

pub const DEFAULT_MOT_ENDPOINT: &str = "https://beta.check-mot.service.gov.uk/trade/vehicles/mot-tests";

/// Environment overrides, applied on top of whatever the file says
pub const ENV_MOT_API_KEY: &str = "MOT_API_KEY";
pub const ENV_ENABLE_MILEAGE_RATE: &str = "CAZCHECK_ENABLE_MILEAGE_RATE";

impl Default for Config {
    fn default() -> Self {
        Config {
            enable_mileage_rate: false,
            checker: CheckerConfig::default(),
            mot: MotConfig::default(),
        }
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            base_url: DEFAULT_CHECKER_BASE_URL.to_string(),
            entry_path: DEFAULT_ENTRY_PATH.to_string(),
            confirm_path: DEFAULT_CONFIRM_PATH.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            zone: DEFAULT_ZONE.to_string(),
            charge_amount: DEFAULT_CHARGE_AMOUNT.to_string(),
            no_charge_text: DEFAULT_NO_CHARGE_TEXT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for MotConfig {
    fn default() -> Self {
        MotConfig {
            endpoint: DEFAULT_MOT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}
