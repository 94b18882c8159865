use std::env;
use std::fmt;

use crate::workflows::tours::{NotificationSettings, MAX_PAYMENT_LEAD_DAYS};

/// Distinguishes runtime behavior for different stages of the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub notifications: NotificationSettings,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let defaults = NotificationSettings::default();

        let sender_address = env::var("TOUR_MAIL_FROM").unwrap_or(defaults.sender_address);
        if !sender_address.contains('@') {
            return Err(ConfigError::InvalidSender(sender_address));
        }

        let payment_lead_days = match env::var("TOUR_PAYMENT_LEAD_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidLeadDays)?,
            Err(_) => defaults.payment_lead_days,
        };
        if payment_lead_days > MAX_PAYMENT_LEAD_DAYS {
            return Err(ConfigError::LeadDaysOutOfRange(payment_lead_days));
        }

        let regulator_threshold = match env::var("TOUR_REGULATOR_THRESHOLD") {
            Ok(raw) => raw
                .trim()
                .replace('_', "")
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidThreshold)?,
            Err(_) => defaults.regulator_threshold,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            notifications: NotificationSettings {
                sender_address,
                payment_lead_days,
                regulator_threshold,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSender(String),
    InvalidLeadDays,
    LeadDaysOutOfRange(u32),
    InvalidThreshold,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSender(value) => {
                write!(f, "TOUR_MAIL_FROM must be a mail address, got '{}'", value)
            }
            ConfigError::InvalidLeadDays => {
                write!(f, "TOUR_PAYMENT_LEAD_DAYS must be a non-negative number of days")
            }
            ConfigError::LeadDaysOutOfRange(days) => write!(
                f,
                "TOUR_PAYMENT_LEAD_DAYS must be at most {} days, got {}",
                MAX_PAYMENT_LEAD_DAYS, days
            ),
            ConfigError::InvalidThreshold => {
                write!(f, "TOUR_REGULATOR_THRESHOLD must be a non-negative amount")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
