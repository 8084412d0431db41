use harbor_hold::{HoldPolicy, HoldTier, PolicyError, STANDARD_HOLD_TIERS};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "harbor=info,harbor_booking=info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_hold_tiers")]
    pub hold_tiers: Vec<HoldTier>,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            hold_tiers: default_hold_tiers(),
        }
    }
}

fn default_hold_tiers() -> Vec<HoldTier> {
    STANDARD_HOLD_TIERS.to_vec()
}

impl BusinessRules {
    pub fn hold_policy(&self) -> Result<HoldPolicy, PolicyError> {
        HoldPolicy::new(self.hold_tiers.clone())
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. HARBOR_LOGGING__FILTER=debug
            .add_source(config::Environment::with_prefix("HARBOR").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_standard_policy() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.logging.filter, default_filter());
        assert_eq!(config.business_rules.hold_policy().unwrap(), HoldPolicy::default());
    }

    #[test]
    fn test_shipped_default_uses_standard_policy() {
        let config = Config::from_toml(include_str!("../config/default.toml")).unwrap();
        assert_eq!(config.business_rules.hold_tiers, STANDARD_HOLD_TIERS.to_vec());
        assert_eq!(config.business_rules.hold_policy().unwrap(), HoldPolicy::default());
    }

    #[test]
    fn test_configured_tiers() {
        let config = Config::from_toml(
            r#"
            [logging]
            filter = "debug"

            [[business_rules.hold_tiers]]
            max_nights = 10
            hold_days = 2

            [[business_rules.hold_tiers]]
            hold_days = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.filter, "debug");
        let policy = config.business_rules.hold_policy().unwrap();
        assert_eq!(policy.hold_days_for(10), 2);
        assert_eq!(policy.hold_days_for(11), 4);
    }

    #[test]
    fn test_table_without_catch_all_is_rejected() {
        let config = Config::from_toml(
            r#"
            [[business_rules.hold_tiers]]
            max_nights = 10
            hold_days = 2
            "#,
        )
        .unwrap();

        assert_eq!(
            config.business_rules.hold_policy(),
            Err(PolicyError::MissingCatchAll)
        );
    }
}
