//! Settings consumed by [`crate::Sms::from_settings`].
//!
//! [`Settings`] deserializes from any serde source (the host application's
//! config file, for instance) or can be read from `GOSMS_*` environment
//! variables with [`Settings::from_env`].

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::simulator::SimulatorOptions;

const DEFAULT_BASE_URL: &str = "https://api.gosms.ge/api/";

pub const ENV_API_KEY: &str = "GOSMS_API_KEY";
pub const ENV_DEV_MODE: &str = "GOSMS_DEV_MODE";
pub const ENV_CLIENT: &str = "GOSMS_CLIENT";
pub const ENV_BASE_URL: &str = "GOSMS_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "GOSMS_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {name}")]
    MissingVar { name: &'static str },

    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },

    #[error("invalid endpoint URL {value:?}: {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Gateway operation, named by its endpoint key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SmsSend,
    SmsCheck,
    BalanceCheck,
    OtpSend,
    OtpVerify,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Self::SmsSend,
        Self::SmsCheck,
        Self::BalanceCheck,
        Self::OtpSend,
        Self::OtpVerify,
    ];

    /// Logical endpoint name (`sms_send`, `sms_check`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::SmsSend => "sms_send",
            Self::SmsCheck => "sms_check",
            Self::BalanceCheck => "balance_check",
            Self::OtpSend => "otp_send",
            Self::OtpVerify => "otp_verify",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Self::SmsSend => "sendsms",
            Self::SmsCheck => "checksms",
            Self::BalanceCheck => "sms-balance",
            Self::OtpSend => "otp/send",
            Self::OtpVerify => "otp/verify",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// One URL per gateway operation.
pub struct Endpoints {
    pub sms_send: String,
    pub sms_check: String,
    pub balance_check: String,
    pub otp_send: String,
    pub otp_verify: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            sms_send: format!("{DEFAULT_BASE_URL}sendsms"),
            sms_check: format!("{DEFAULT_BASE_URL}checksms"),
            balance_check: format!("{DEFAULT_BASE_URL}sms-balance"),
            otp_send: format!("{DEFAULT_BASE_URL}otp/send"),
            otp_verify: format!("{DEFAULT_BASE_URL}otp/verify"),
        }
    }
}

impl Endpoints {
    /// Derive all five endpoints from a base URL such as `https://api.gosms.ge/api/`.
    pub fn with_base(base: &str) -> Result<Self, ConfigError> {
        let mut url = Url::parse(base).map_err(|source| ConfigError::InvalidEndpoint {
            value: base.to_owned(),
            source,
        })?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let join = |operation: Operation| {
            url.join(operation.path())
                .map(String::from)
                .map_err(|source| ConfigError::InvalidEndpoint {
                    value: base.to_owned(),
                    source,
                })
        };

        Ok(Self {
            sms_send: join(Operation::SmsSend)?,
            sms_check: join(Operation::SmsCheck)?,
            balance_check: join(Operation::BalanceCheck)?,
            otp_send: join(Operation::OtpSend)?,
            otp_verify: join(Operation::OtpVerify)?,
        })
    }

    pub fn url(&self, operation: Operation) -> &str {
        match operation {
            Operation::SmsSend => &self.sms_send,
            Operation::SmsCheck => &self.sms_check,
            Operation::BalanceCheck => &self.balance_check,
            Operation::OtpSend => &self.otp_send,
            Operation::OtpVerify => &self.otp_verify,
        }
    }

    pub fn set_url(&mut self, operation: Operation, url: impl Into<String>) {
        let slot = match operation {
            Operation::SmsSend => &mut self.sms_send,
            Operation::SmsCheck => &mut self.sms_check,
            Operation::BalanceCheck => &mut self.balance_check,
            Operation::OtpSend => &mut self.otp_send,
            Operation::OtpVerify => &mut self.otp_verify,
        };
        *slot = url.into();
    }

    /// Reverse lookup used by the simulated gateway's HTTP face.
    pub fn operation_for(&self, url: &str) -> Option<Operation> {
        Operation::ALL
            .into_iter()
            .find(|operation| self.url(*operation) == url)
    }

    /// Check every endpoint is an absolute URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for operation in Operation::ALL {
            let value = self.url(operation);
            Url::parse(value).map_err(|source| ConfigError::InvalidEndpoint {
                value: value.to_owned(),
                source,
            })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which [`crate::GatewayClient`] implementation [`crate::Sms`] builds.
pub enum Backend {
    /// [`crate::RemoteClient`] talking to the real gateway.
    Remote,
    /// In-process [`crate::SimulatedGateway`].
    Simulated,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Simulated => "simulated",
        }
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "simulated" => Ok(Self::Simulated),
            _ => Err(ConfigError::InvalidVar {
                name: ENV_CLIENT,
                value: value.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_key: String,
    /// Use the simulated gateway unless `client` says otherwise.
    #[serde(default)]
    pub dev_mode: bool,
    /// Explicit backend; wins over `dev_mode`.
    #[serde(default)]
    pub client: Option<Backend>,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub simulator: SimulatorOptions,
}

impl Settings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            dev_mode: false,
            client: None,
            endpoints: Endpoints::default(),
            timeout_secs: None,
            simulator: SimulatorOptions::default(),
        }
    }

    /// Read settings from `GOSMS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(ENV_API_KEY).ok_or(ConfigError::MissingVar { name: ENV_API_KEY })?;
        let mut settings = Self::new(api_key);

        if let Some(value) = lookup(ENV_DEV_MODE) {
            settings.dev_mode = parse_bool(ENV_DEV_MODE, &value)?;
        }
        if let Some(value) = lookup(ENV_CLIENT) {
            settings.client = Some(value.parse()?);
        }
        if let Some(value) = lookup(ENV_BASE_URL) {
            settings.endpoints = Endpoints::with_base(&value)?;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidVar {
                    name: ENV_TIMEOUT_SECS,
                    value: value.clone(),
                })?;
            settings.timeout_secs = Some(secs);
        }

        Ok(settings)
    }

    /// Backend [`crate::Sms::from_settings`] will build.
    pub fn backend(&self) -> Backend {
        match (self.client, self.dev_mode) {
            (Some(backend), _) => backend,
            (None, true) => Backend::Simulated,
            (None, false) => Backend::Remote,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidVar {
            name,
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn default_endpoints_point_at_gosms() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.sms_send, "https://api.gosms.ge/api/sendsms");
        assert_eq!(endpoints.sms_check, "https://api.gosms.ge/api/checksms");
        assert_eq!(endpoints.balance_check, "https://api.gosms.ge/api/sms-balance");
        assert_eq!(endpoints.otp_send, "https://api.gosms.ge/api/otp/send");
        assert_eq!(endpoints.otp_verify, "https://api.gosms.ge/api/otp/verify");
        assert!(endpoints.validate().is_ok());
    }

    #[test]
    fn with_base_matches_defaults_and_tolerates_missing_slash() {
        assert_eq!(
            Endpoints::with_base("https://api.gosms.ge/api/").unwrap(),
            Endpoints::default()
        );
        let endpoints = Endpoints::with_base("http://localhost:8080/api").unwrap();
        assert_eq!(endpoints.otp_verify, "http://localhost:8080/api/otp/verify");
    }

    #[test]
    fn with_base_rejects_relative_urls() {
        assert!(matches!(
            Endpoints::with_base("api/"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn operation_for_reverses_url() {
        let endpoints = Endpoints::default();
        for operation in Operation::ALL {
            assert_eq!(
                endpoints.operation_for(endpoints.url(operation)),
                Some(operation)
            );
        }
        assert_eq!(endpoints.operation_for("https://example.invalid"), None);
    }

    #[test]
    fn backend_selection() {
        let mut settings = Settings::new("key");
        assert_eq!(settings.backend(), Backend::Remote);

        settings.dev_mode = true;
        assert_eq!(settings.backend(), Backend::Simulated);

        settings.client = Some(Backend::Remote);
        assert_eq!(settings.backend(), Backend::Remote);
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let settings = Settings::from_lookup(lookup_from(&[
            (ENV_API_KEY, "secret"),
            (ENV_DEV_MODE, "true"),
            (ENV_CLIENT, "Simulated"),
            (ENV_BASE_URL, "http://localhost:9000/"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert_eq!(settings.api_key, "secret");
        assert!(settings.dev_mode);
        assert_eq!(settings.client, Some(Backend::Simulated));
        assert_eq!(settings.endpoints.sms_send, "http://localhost:9000/sendsms");
        assert_eq!(settings.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn from_lookup_requires_api_key() {
        let err = Settings::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar { name: ENV_API_KEY }));
    }

    #[test]
    fn from_lookup_rejects_bad_values() {
        let err = Settings::from_lookup(lookup_from(&[
            (ENV_API_KEY, "secret"),
            (ENV_DEV_MODE, "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: ENV_DEV_MODE, .. }));

        let err = Settings::from_lookup(lookup_from(&[
            (ENV_API_KEY, "secret"),
            (ENV_CLIENT, "carrier-pigeon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: ENV_CLIENT, .. }));
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"api_key": "secret", "client": "simulated"}"#).unwrap();
        assert!(!settings.dev_mode);
        assert_eq!(settings.backend(), Backend::Simulated);
        assert_eq!(settings.endpoints, Endpoints::default());
        assert!(!settings.simulator.debit_on_send);
    }
}
