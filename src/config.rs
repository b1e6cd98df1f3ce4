use crate::calendar;
use crate::clock::{Clock, FixedClock, SystemClock};
use chrono::NaiveDate;
use std::{env, fmt, sync::Arc};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub fixed_today: Option<NaiveDate>,
}

#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.key, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let fixed_today = match lookup("APP_FIXED_TODAY") {
            Some(value) if !value.trim().is_empty() => Some(
                calendar::parse_date(&value).ok_or(ConfigError {
                    key: "APP_FIXED_TODAY",
                    value,
                })?,
            ),
            _ => None,
        };

        Ok(Self { port, fixed_today })
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.fixed_today {
            Some(date) => Arc::new(FixedClock(date)),
            None => Arc::new(SystemClock),
        }
    }
}
