use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_hold_ttl_minutes")]
    pub hold_ttl_minutes: u32,
    #[serde(default = "default_refresh_interval_minutes")]
    pub refresh_interval_minutes: u64,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    #[serde(default = "default_child_discount_percent")]
    pub child_discount_percent: f64,
    #[serde(default = "default_assistance_discount_percent")]
    pub assistance_discount_percent: f64,
    #[serde(default = "default_max_party")]
    pub max_party: usize,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_hold_ttl_minutes() -> u32 {
    10
}
fn default_refresh_interval_minutes() -> u64 {
    10
}
fn default_tax_rate() -> f64 {
    0.05
}
fn default_child_discount_percent() -> f64 {
    25.0
}
fn default_assistance_discount_percent() -> f64 {
    30.0
}
fn default_max_party() -> usize {
    6
}
fn default_currency() -> String {
    skyfare_shared::money::DEFAULT_CURRENCY.to_string()
}

impl Default for BusinessRules {
    fn default() -> Self {
        BusinessRules {
            hold_ttl_minutes: default_hold_ttl_minutes(),
            refresh_interval_minutes: default_refresh_interval_minutes(),
            tax_rate: default_tax_rate(),
            child_discount_percent: default_child_discount_percent(),
            assistance_discount_percent: default_assistance_discount_percent(),
            max_party: default_max_party(),
            currency: default_currency(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            business_rules: BusinessRules::default(),
        }
    }
}

impl EngineConfig {
    /// Layered load: `config/default` file, then an optional per-environment
    /// file, then `SKYFARE_*` environment overrides. All files are optional;
    /// absent keys fall back to the serde defaults above. A present but
    /// malformed value is an error, not a silent fallback.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("SKYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
