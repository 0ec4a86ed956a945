use super::defaults::{ENV_ENABLE_MILEAGE_RATE, ENV_MOT_API_KEY};
use super::types::Config;
use crate::checker::normalize_amount;
use crate::error::{CheckerError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from an explicit path, or the default location when none is given.
    /// Environment overrides are applied in both cases.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        Self::load_with(path, &Config::get_config_path(), |key| std::env::var(key).ok())
    }

    /// `load` with the default path and override source supplied by the
    /// caller. A missing default file means defaults; a missing explicit
    /// file is an error.
    pub fn load_with<F>(path: Option<&Path>, default_path: &Path, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None if default_path.exists() => Self::load_from_path(default_path)?,
            None => Config::default(),
        };
        config.apply_overrides(lookup);
        Ok(config)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CheckerError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CheckerError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Config> {
        ConfigLoader::load(None)
    }

    /// Apply overrides from any key/value source (the process environment in
    /// production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_MOT_API_KEY) {
            if !key.trim().is_empty() {
                self.mot.api_key = Some(key.trim().to_string());
            }
        }

        if let Some(flag) = lookup(ENV_ENABLE_MILEAGE_RATE) {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.enable_mileage_rate = true,
                "0" | "false" | "no" | "off" => self.enable_mileage_rate = false,
                other => tracing::warn!(
                    "ignoring {}={:?}, expected true or false",
                    ENV_ENABLE_MILEAGE_RATE,
                    other
                ),
            }
        }
    }

    /// The MOT API key, or `MissingApiKey` so callers fail before any
    /// upstream request is made.
    pub fn mot_api_key(&self) -> Result<&str> {
        self.mot
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(CheckerError::MissingApiKey)
    }

    /// Save configuration to default location
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::get_config_path())
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CheckerError::Config(format!("{}: {}", parent.display(), e)))?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| CheckerError::Config(e.to_string()))?;
        fs::write(path, content)
            .map_err(|e| CheckerError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Get the default config file path (~/.cazcheck/config.toml)
    pub fn get_config_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".cazcheck").join("config.toml")
        } else {
            PathBuf::from(".cazcheck/config.toml")
        }
    }

    /// Initialize config directory and create default config
    pub fn init() -> Result<()> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            Config::default().save_to(&config_path)?;
            println!("Created config at {}", config_path.display());
        } else {
            println!("Config already exists at {}", config_path.display());
        }

        Ok(())
    }

    /// Validate configuration
    pub fn check(&self) -> Result<()> {
        for (name, url) in [
            ("checker entry", self.checker.entry_url()),
            ("checker confirm", self.checker.confirm_url()),
            ("mot endpoint", self.mot.endpoint.clone()),
        ] {
            if reqwest::Url::parse(&url).is_err() {
                return Err(CheckerError::Config(format!("{} URL is invalid: {}", name, url)));
            }
        }

        if self.checker.zone.is_empty() {
            return Err(CheckerError::Config("checker.zone is empty".into()));
        }

        if normalize_amount(&self.checker.charge_amount).is_empty() {
            return Err(CheckerError::Config(format!(
                "checker.charge_amount has no amount: {:?}",
                self.checker.charge_amount
            )));
        }

        if self.checker.no_charge_text.trim().is_empty() {
            return Err(CheckerError::Config("checker.no_charge_text is empty".into()));
        }

        self.mot_api_key()?;

        Ok(())
    }

    /// Print configuration as TOML. The API key is masked.
    pub fn print(&self) -> Result<()> {
        let mut shown = self.clone();
        if let Some(key) = shown.mot.api_key.as_mut() {
            *key = "********".to_string();
        }
        let content =
            toml::to_string_pretty(&shown).map_err(|e| CheckerError::Config(e.to_string()))?;
        println!("{}", content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides_key_and_mileage_flag() {
        let env = overrides(&[
            (ENV_MOT_API_KEY, " secret "),
            (ENV_ENABLE_MILEAGE_RATE, "TRUE"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).cloned());

        assert_eq!(config.mot_api_key().unwrap(), "secret");
        assert!(config.enable_mileage_rate);
    }

    #[test]
    fn test_unrecognised_flag_leaves_setting() {
        let env = overrides(&[(ENV_ENABLE_MILEAGE_RATE, "maybe")]);
        let mut config = Config::default();
        config.enable_mileage_rate = true;
        config.apply_overrides(|k| env.get(k).cloned());
        assert!(config.enable_mileage_rate);
    }

    #[test]
    fn test_missing_or_blank_key_fails_fast() {
        let mut config = Config::default();
        assert!(matches!(
            config.mot_api_key(),
            Err(CheckerError::MissingApiKey)
        ));

        config.mot.api_key = Some("   ".to_string());
        assert!(matches!(
            config.mot_api_key(),
            Err(CheckerError::MissingApiKey)
        ));
        assert!(matches!(config.check(), Err(CheckerError::MissingApiKey)));
    }

    #[test]
    fn test_check_rejects_amount_without_digits() {
        let mut config = Config::default();
        config.mot.api_key = Some("k".to_string());
        assert!(config.check().is_ok());

        config.checker.charge_amount = "£".to_string();
        assert!(matches!(config.check(), Err(CheckerError::Config(_))));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.enable_mileage_rate = true;
        config.checker.zone = "Bath".to_string();
        config.save_to(&path).unwrap();

        let loaded = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_applies_overrides_on_top_of_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[checker]\nzone = \"Bath\"\n\n[mot]\napi_key = \"from-file\"\n",
        )
        .unwrap();

        let env = overrides(&[(ENV_MOT_API_KEY, "from-env"), (ENV_ENABLE_MILEAGE_RATE, "1")]);
        let unused_default = dir.path().join("unused.toml");
        let config =
            ConfigLoader::load_with(Some(&path), &unused_default, |k| env.get(k).cloned()).unwrap();

        assert_eq!(config.checker.zone, "Bath");
        assert_eq!(config.mot_api_key().unwrap(), "from-env");
        assert!(config.enable_mileage_rate);

        let config = ConfigLoader::load_with(Some(&path), &unused_default, |_| None).unwrap();
        assert_eq!(config.mot_api_key().unwrap(), "from-file");
        assert!(!config.enable_mileage_rate);
    }

    #[test]
    fn test_load_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");

        let config = ConfigLoader::load_with(None, &missing, |_| None).unwrap();
        assert_eq!(config, Config::default());

        assert!(matches!(
            ConfigLoader::load_with(Some(&missing), &missing, |_| None),
            Err(CheckerError::Config(_))
        ));
    }

    #[test]
    fn test_load_reads_default_path_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let default_path = dir.path().join("config.toml");
        fs::write(&default_path, "enable_mileage_rate = true\n").unwrap();

        let config = ConfigLoader::load_with(None, &default_path, |_| None).unwrap();
        assert!(config.enable_mileage_rate);
        assert_eq!(config.checker, Config::default().checker);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "enable_mileage_rate = \"sometimes\"").unwrap();

        assert!(matches!(
            ConfigLoader::load_from_path(&path),
            Err(CheckerError::Config(_))
        ));
    }
}
