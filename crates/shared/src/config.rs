//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::money::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Reporting and alerting configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reporting configuration.
///
/// Thresholds are percentages compared with a strict `>`; a month at exactly
/// 90% utilization is still a warning, not critical.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Currency used when formatting amounts.
    #[serde(default = "default_currency")]
    pub currency: Currency,
    /// Utilization above this percentage is a warning.
    #[serde(default = "default_utilization_warning")]
    pub utilization_warning_percent: Decimal,
    /// Utilization above this percentage is critical.
    #[serde(default = "default_utilization_critical")]
    pub utilization_critical_percent: Decimal,
    /// Projected utilization above this percentage is a warning.
    #[serde(default = "default_projected_warning")]
    pub projected_warning_percent: Decimal,
    /// Projected utilization above this percentage is an overrun.
    #[serde(default = "default_projected_overrun")]
    pub projected_overrun_percent: Decimal,
}

fn default_currency() -> Currency {
    Currency::Xaf
}

fn default_utilization_warning() -> Decimal {
    Decimal::from(70)
}

fn default_utilization_critical() -> Decimal {
    Decimal::from(90)
}

fn default_projected_warning() -> Decimal {
    Decimal::from(90)
}

fn default_projected_overrun() -> Decimal {
    Decimal::ONE_HUNDRED
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            utilization_warning_percent: default_utilization_warning(),
            utilization_critical_percent: default_utilization_critical(),
            projected_warning_percent: default_projected_warning(),
            projected_overrun_percent: default_projected_overrun(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "cdc_budget=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env`, config files, and environment.
    ///
    /// Sources in increasing precedence: `config/default`,
    /// `config/{RUN_MODE}`, then `CDC_BUDGET__SECTION__KEY` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CDC_BUDGET").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.reporting.currency, Currency::Xaf);
        assert_eq!(config.reporting.utilization_warning_percent, dec!(70));
        assert_eq!(config.reporting.utilization_critical_percent, dec!(90));
        assert_eq!(config.reporting.projected_warning_percent, dec!(90));
        assert_eq!(config.reporting.projected_overrun_percent, dec!(100));
        assert_eq!(config.logging.filter, "cdc_budget=info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "CDC_BUDGET__REPORTING__CURRENCY",
                "CDC_BUDGET__REPORTING__UTILIZATION_WARNING_PERCENT",
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.reporting.currency, Currency::Xaf);
                assert_eq!(config.reporting.utilization_warning_percent, dec!(70));
            },
        );
    }

    #[test]
    fn test_load_accepts_fcfa_currency() {
        temp_env::with_var("CDC_BUDGET__REPORTING__CURRENCY", Some("FCFA"), || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.reporting.currency, Currency::Xaf);
        });
    }

    #[test]
    fn test_load_environment_overrides() {
        temp_env::with_vars(
            [
                ("CDC_BUDGET__REPORTING__CURRENCY", Some("EUR")),
                (
                    "CDC_BUDGET__REPORTING__UTILIZATION_WARNING_PERCENT",
                    Some("75.5"),
                ),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.reporting.currency, Currency::Eur);
                assert_eq!(config.reporting.utilization_warning_percent, dec!(75.5));
                assert_eq!(config.reporting.utilization_critical_percent, dec!(90));
            },
        );
    }
}
