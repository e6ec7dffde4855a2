//! Notification settings, read from TOML.
//!
//! ```toml
//! username = "shop"
//! password = "secret"
//! api_id = "3141592"
//! two_way_number = "15550001111"
//! phone_numbers = "+1 555 010 9999, +1 555 010 0100"
//! itemize = true
//!
//! [currency]
//! code = "USD"
//! position = "before"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{Credentials, Currency, CurrencyPosition, RecipientList, SenderNumber};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_id: Option<String>,
    /// Two-way number messages are sent from.
    pub two_way_number: Option<String>,
    /// Comma-separated recipients; sanitized before use.
    pub phone_numbers: Option<String>,
    pub itemize: bool,
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
    pub currency: CurrencySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CurrencySettings {
    pub code: String,
    pub position: CurrencyPosition,
    pub thousands_separator: String,
    pub decimal_separator: String,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            code: "USD".to_owned(),
            position: CurrencyPosition::Before,
            thousands_separator: ",".to_owned(),
            decimal_separator: ".".to_owned(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    /// Gateway credentials, or `None` unless all three are set and non-blank.
    pub fn credentials(&self) -> Option<Credentials> {
        let (username, password, api_id) = (
            self.username.as_deref()?,
            self.password.as_deref()?,
            self.api_id.as_deref()?,
        );
        Credentials::new(username, password, api_id).ok()
    }

    /// Recipients and sender, or `None` unless both are usable.
    pub fn outbound(&self) -> Option<(RecipientList, SenderNumber)> {
        let to = RecipientList::sanitize(self.phone_numbers.as_deref()?).ok()?;
        let from = SenderNumber::new(self.two_way_number.as_deref()?).ok()?;
        Some((to, from))
    }

    pub fn currency(&self) -> Currency {
        Currency::from_code(&self.currency.code)
            .with_position(self.currency.position)
            .with_separators(
                self.currency.thousands_separator.as_str(),
                self.currency.decimal_separator.as_str(),
            )
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::Money;

    use super::*;

    const FULL: &str = r#"
        username = "shop"
        password = "secret"
        api_id = "3141592"
        two_way_number = "15550001111"
        phone_numbers = "+1 555 010 9999, +1 555 010 0100"
        itemize = true
        timeout_secs = 10

        [currency]
        code = "EUR"
        position = "after"
        thousands_separator = "."
        decimal_separator = ","
    "#;

    #[test]
    fn parses_full_settings() {
        let settings = Settings::from_toml_str(FULL).unwrap();
        assert!(settings.itemize);
        assert_eq!(settings.timeout(), Some(Duration::from_secs(10)));

        let creds = settings.credentials().unwrap();
        assert_eq!(creds.username.as_str(), "shop");
        assert_eq!(creds.api_id.as_str(), "3141592");

        let (to, from) = settings.outbound().unwrap();
        assert_eq!(to.as_str(), "15550109999,15550100100");
        assert_eq!(from.as_str(), "15550001111");

        assert_eq!(settings.currency().format(Money::from_cents(123_450)), "1.234,50€");
    }

    #[test]
    fn empty_settings_use_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert!(!settings.itemize);
        assert!(settings.credentials().is_none());
        assert!(settings.outbound().is_none());
        assert_eq!(settings.timeout(), None);
        assert_eq!(settings.currency().format(Money::from_cents(850)), "$8.50");
    }

    #[test]
    fn blank_credentials_count_as_missing() {
        let settings = Settings::from_toml_str(
            r#"
            username = "shop"
            password = "secret"
            api_id = "  "
            "#,
        )
        .unwrap();
        assert!(settings.credentials().is_none());
    }

    #[test]
    fn outbound_requires_both_sender_and_recipients() {
        let settings = Settings::from_toml_str(r#"phone_numbers = "15550109999""#).unwrap();
        assert!(settings.outbound().is_none());

        let settings = Settings::from_toml_str(r#"two_way_number = "15550001111""#).unwrap();
        assert!(settings.outbound().is_none());

        let settings = Settings::from_toml_str(
            r#"
            two_way_number = "15550001111"
            phone_numbers = "n/a"
            "#,
        )
        .unwrap();
        assert!(settings.outbound().is_none());
    }

    #[test]
    fn rejects_wrongly_typed_values() {
        let err = Settings::from_toml_str(r#"itemize = "yes""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Settings::load("/nonexistent/clickatell.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
