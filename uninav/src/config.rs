//! Process configuration from environment variables.
//!
//! A `.env` file in the working directory is loaded first if present.

use std::env::VarError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

/// Name of the variable holding the SMTP login identity.
pub const SMTP_LOGIN_VAR: &str = "Serverlogin";
/// Name of the variable holding the SMTP app password.
pub const SMTP_PASSWORD_VAR: &str = "app_p";

const DEFAULT_PROVIDER_URL: &str = "https://graphhopper.com/api/1/";
const DEFAULT_LOCALE: &str = "en";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 15;
const DEFAULT_SESSION_TTL_SECS: u64 = 7200;

/// Geocoding/routing provider settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub locale: String,
    pub timeout: Duration,
}

/// SMTP login pair. Debug output never shows the password.
#[derive(Clone)]
pub struct SmtpCredentials {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Alert delivery settings.
#[derive(Clone)]
pub struct AlertConfig {
    pub relay: String,
    pub port: u16,
    pub login: Option<String>,
    pub password: Option<String>,
    /// Sender address; the SMTP login is used when unset.
    pub from: Option<String>,
    pub responder: Option<String>,
    pub timeout: Duration,
}

impl AlertConfig {
    /// Both secrets, or a message naming the missing ones.
    pub fn credentials(&self) -> Result<SmtpCredentials, String> {
        match (&self.login, &self.password) {
            (Some(login), Some(password)) => Ok(SmtpCredentials {
                login: login.clone(),
                password: password.clone(),
            }),
            (login, password) => {
                let missing: Vec<&str> = [
                    login.is_none().then_some(SMTP_LOGIN_VAR),
                    password.is_none().then_some(SMTP_PASSWORD_VAR),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(format!("{} not set", missing.join(" and ")))
            }
        }
    }
}

pub struct Config {
    pub provider: ProviderConfig,
    pub alerts: AlertConfig,
    /// Idle time after which a navigation session expires.
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env)
    }

    /// Build from any variable source. Unset and empty values count as absent.
    fn from_lookup(lookup: impl Fn(&str) -> Result<Option<String>>) -> Result<Self> {
        let get = |name: &str| -> Result<Option<String>> {
            Ok(lookup(name)?.filter(|v| !v.trim().is_empty()))
        };

        let provider = ProviderConfig {
            api_key: get("GRAPHHOPPER_API_KEY")?,
            base_url: get("GRAPHHOPPER_URL")?
                .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string()),
            locale: get("UNINAV_LOCALE")?.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            timeout: Duration::from_secs(parse_or(
                get("UNINAV_HTTP_TIMEOUT_SECS")?,
                "UNINAV_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        };

        let alerts = AlertConfig {
            relay: get("SMTP_HOST")?.unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port: parse_or(get("SMTP_PORT")?, "SMTP_PORT", DEFAULT_SMTP_PORT)?,
            login: get(SMTP_LOGIN_VAR)?,
            password: get(SMTP_PASSWORD_VAR)?,
            from: get("ALERT_FROM")?,
            responder: get("ALERT_RESPONDER")?,
            timeout: Duration::from_secs(parse_or(
                get("UNINAV_SMTP_TIMEOUT_SECS")?,
                "UNINAV_SMTP_TIMEOUT_SECS",
                DEFAULT_SMTP_TIMEOUT_SECS,
            )?),
        };

        let session_ttl = Duration::from_secs(parse_or(
            get("UNINAV_SESSION_TTL_SECS")?,
            "UNINAV_SESSION_TTL_SECS",
            DEFAULT_SESSION_TTL_SECS,
        )?);

        Ok(Self {
            provider,
            alerts,
            session_ttl,
        })
    }

    /// Log the effective configuration. Secrets are reported as set/unset only.
    pub fn log(&self) {
        let set = |v: &Option<String>| if v.is_some() { "set" } else { "NOT SET" };

        log::info!(
            "Provider: {} (locale {}, timeout {:?}, api key {})",
            self.provider.base_url,
            self.provider.locale,
            self.provider.timeout,
            set(&self.provider.api_key)
        );
        log::info!(
            "Alerts: {}:{} (timeout {:?}), {SMTP_LOGIN_VAR} {}, {SMTP_PASSWORD_VAR} {}, \
             responder {}",
            self.alerts.relay,
            self.alerts.port,
            self.alerts.timeout,
            set(&self.alerts.login),
            set(&self.alerts.password),
            self.alerts.responder.as_deref().unwrap_or("NOT SET")
        );

        log::info!("Sessions expire after {:?} idle", self.session_ttl);

        if self.provider.api_key.is_none() {
            log::warn!("GRAPHHOPPER_API_KEY is not set; geocoding and routing will likely fail");
        }
        if let Err(e) = self.alerts.credentials() {
            log::warn!("Panic alerts disabled: {e}");
        }
    }
}

fn env(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(anyhow!("{name} value is not valid unicode")),
    }
}

fn parse_or<T>(value: Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.map_or(Ok(default), |v| {
        v.trim()
            .parse()
            .with_context(|| format!("{name}={v} is not a valid number"))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|name| Ok(vars.get(name).cloned()))
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.provider.base_url, DEFAULT_PROVIDER_URL);
        assert_eq!(config.provider.locale, "en");
        assert_eq!(config.provider.timeout, Duration::from_secs(10));
        assert_eq!(config.provider.api_key, None);
        assert_eq!(config.alerts.relay, "smtp.gmail.com");
        assert_eq!(config.alerts.port, 587);
        assert_eq!(config.alerts.responder, None);
        assert_eq!(config.session_ttl, Duration::from_secs(7200));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("GRAPHHOPPER_API_KEY", "gh-key"),
            ("UNINAV_HTTP_TIMEOUT_SECS", " 3 "),
            ("SMTP_PORT", "2525"),
            ("ALERT_RESPONDER", "desk@example.edu"),
            ("UNINAV_SESSION_TTL_SECS", "900"),
        ])
        .unwrap();

        assert_eq!(config.provider.api_key.as_deref(), Some("gh-key"));
        assert_eq!(config.provider.timeout, Duration::from_secs(3));
        assert_eq!(config.alerts.port, 2525);
        assert_eq!(config.alerts.responder.as_deref(), Some("desk@example.edu"));
        assert_eq!(config.session_ttl, Duration::from_secs(900));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(config_from(&[("SMTP_PORT", "smtp")]).is_err());
        assert!(config_from(&[("UNINAV_HTTP_TIMEOUT_SECS", "-1")]).is_err());
    }

    #[test]
    fn credentials_name_missing_secrets() {
        let config =
            config_from(&[("Serverlogin", "alerts@example.com"), ("app_p", "  ")]).unwrap();
        assert_eq!(config.alerts.credentials().unwrap_err(), "app_p not set");

        let config = config_from(&[]).unwrap();
        assert_eq!(
            config.alerts.credentials().unwrap_err(),
            "Serverlogin and app_p not set"
        );

        let config = config_from(&[("Serverlogin", "a@example.com"), ("app_p", "pw")]).unwrap();
        let credentials = config.alerts.credentials().unwrap();
        assert_eq!(credentials.login, "a@example.com");
        assert!(!format!("{credentials:?}").contains("pw\""));
    }
}
