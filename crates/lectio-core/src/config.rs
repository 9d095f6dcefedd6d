use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_BIND: &str = "127.0.0.1";
/// Number of day slots in one reading plan.
pub const PLAN_DAYS: u32 = 365;
/// Size of the Westminster Shorter Catechism.
pub const CATECHISM_ITEMS: u32 = 107;
/// America/Sao_Paulo has observed a fixed UTC-3 since 2019.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -180;

/// Top-level config (lectio.toml + LECTIO_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LectioConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub catechism: CatechismConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            auth: AuthConfig::default(),
        }
    }
}

/// Static bearer tokens, each mapped to the user id it authenticates.
///
/// Token issuance lives outside this service; whatever issues tokens writes
/// them here (or into `LECTIO_GATEWAY__AUTH__TOKENS`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Offset applied to the wall clock before deriving day-of-year and weeks.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
    /// Week zero of the catechism rotation. Must be a Sunday.
    #[serde(default = "default_reference_sunday")]
    pub reference_sunday: NaiveDate,
    #[serde(default = "default_plan_days")]
    pub plan_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            reference_sunday: default_reference_sunday(),
            plan_days: PLAN_DAYS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatechismConfig {
    /// Highest question number accepted on import.
    #[serde(default = "default_max_items")]
    pub max_items: u32,
}

impl Default for CatechismConfig {
    fn default() -> Self {
        Self {
            max_items: CATECHISM_ITEMS,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_utc_offset() -> i32 {
    DEFAULT_UTC_OFFSET_MINUTES
}
fn default_reference_sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 7).unwrap_or(NaiveDate::MIN)
}
fn default_plan_days() -> u32 {
    PLAN_DAYS
}
fn default_max_items() -> u32 {
    CATECHISM_ITEMS
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.lectio/lectio.db", home)
}

impl LectioConfig {
    /// Load config from a TOML file with LECTIO_* env var overrides.
    ///
    /// Nested keys use a double underscore, e.g.
    /// `LECTIO_SCHEDULE__UTC_OFFSET_MINUTES=-240`.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);
        tracing::debug!(path = %path, "loading config");

        let config: LectioConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("LECTIO_").split("__"))
            .extract()
            .map_err(|e| crate::error::LectioError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the scheduler cannot work with.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::LectioError;

        if self.schedule.reference_sunday.weekday() != Weekday::Sun {
            return Err(LectioError::Config(format!(
                "schedule.reference_sunday {} is a {}, expected a Sunday",
                self.schedule.reference_sunday,
                self.schedule.reference_sunday.weekday()
            )));
        }
        if self.schedule.plan_days == 0 {
            return Err(LectioError::Config(
                "schedule.plan_days must be at least 1".to_string(),
            ));
        }
        // chrono::FixedOffset accepts strictly less than one day either way.
        if self.schedule.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(LectioError::Config(format!(
                "schedule.utc_offset_minutes {} is out of range",
                self.schedule.utc_offset_minutes
            )));
        }
        if self.catechism.max_items == 0 {
            return Err(LectioError::Config(
                "catechism.max_items must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.lectio/lectio.toml", home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_are_valid() {
        let cfg = LectioConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.schedule.plan_days, 365);
        assert_eq!(cfg.schedule.reference_sunday.to_string(), "2024-01-07");
        assert_eq!(cfg.gateway.port, DEFAULT_PORT);
    }

    #[test]
    fn load_merges_toml_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "lectio.toml",
                r#"
                [gateway]
                port = 9000

                [gateway.auth.tokens]
                "secret-1" = "alice"

                [schedule]
                reference_sunday = "2025-01-05"
                "#,
            )?;
            jail.set_env("LECTIO_SCHEDULE__UTC_OFFSET_MINUTES", "-240");

            let cfg = LectioConfig::load(Some("lectio.toml")).expect("load");
            assert_eq!(cfg.gateway.port, 9000);
            assert_eq!(cfg.gateway.auth.tokens.get("secret-1").map(String::as_str), Some("alice"));
            assert_eq!(cfg.schedule.utc_offset_minutes, -240);
            assert_eq!(cfg.schedule.reference_sunday.to_string(), "2025-01-05");
            assert_eq!(cfg.catechism.max_items, 107);
            Ok(())
        });
    }

    #[test]
    fn reference_must_be_a_sunday() {
        let mut cfg = LectioConfig::default();
        cfg.schedule.reference_sunday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        Jail::expect_with(|_jail| {
            let cfg = LectioConfig::load(Some("does-not-exist.toml")).expect("load");
            assert_eq!(cfg.schedule.utc_offset_minutes, DEFAULT_UTC_OFFSET_MINUTES);
            Ok(())
        });
    }
}
