use std::fmt;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://catalog.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "password";

/// Trait for providing environment variable access
///
/// Injecting the variable source keeps settings testable without parallel
/// tests racing on the process-global environment.
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production environment provider that reads from the system environment
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("JWT_SECRET environment variable must be set")]
    MissingJwtSecret,

    #[error("Invalid value for {setting_name}: {reason}")]
    InvalidSetting { setting_name: String, reason: String },
}

impl SettingsError {
    fn invalid(setting_name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting_name: setting_name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Runtime configuration loaded from environment variables
///
/// Every setting except `JWT_SECRET` has a default. Blank values are
/// treated as unset.
pub struct Settings {
    database_url: String,
    host: String,
    port: u16,
    jwt_secret: String,
    jwt_expiration_hours: i64,
    request_timeout: Duration,
    admin_username: String,
    admin_password: String,
    seed_demo_catalog: bool,
}

impl Settings {
    /// Load settings from the given environment provider
    pub fn from_env_provider(provider: &dyn EnvironmentProvider) -> Result<Self, SettingsError> {
        let database_url = string_or(provider, "DATABASE_URL", DEFAULT_DATABASE_URL);
        let host = string_or(provider, "HOST", DEFAULT_HOST);
        let port = parse_port(provider, "PORT", DEFAULT_PORT)?;

        let jwt_secret = provider
            .get_var("JWT_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or(SettingsError::MissingJwtSecret)?;

        let jwt_expiration_hours = parse_positive_i64(
            provider,
            "JWT_EXPIRATION_HOURS",
            DEFAULT_JWT_EXPIRATION_HOURS,
        )?;
        let timeout_secs = parse_positive_u64(
            provider,
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        let admin_username = string_or(provider, "ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME);
        let admin_password = string_or(provider, "ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD);
        let seed_demo_catalog = parse_bool(provider, "SEED_DEMO_CATALOG", true)?;

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            jwt_expiration_hours,
            request_timeout: Duration::from_secs(timeout_secs),
            admin_username,
            admin_password,
            seed_demo_catalog,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn jwt_expiration_hours(&self) -> i64 {
        self.jwt_expiration_hours
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn admin_username(&self) -> &str {
        &self.admin_username
    }

    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    /// True when the bootstrap admin password was left at its default
    pub fn uses_default_admin_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }

    pub fn seed_demo_catalog(&self) -> bool {
        self.seed_demo_catalog
    }
}

fn string_or(provider: &dyn EnvironmentProvider, key: &str, default: &str) -> String {
    provider
        .get_var(key)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_port(
    provider: &dyn EnvironmentProvider,
    key: &str,
    default: u16,
) -> Result<u16, SettingsError> {
    let port = match provider.get_var(key).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|_| SettingsError::invalid(key, format!("expected a port number, got {:?}", raw)))?,
        None => default,
    };

    if port == 0 {
        return Err(SettingsError::invalid(key, "port 0 is not usable"));
    }

    Ok(port)
}

fn parse_positive_i64(
    provider: &dyn EnvironmentProvider,
    key: &str,
    default: i64,
) -> Result<i64, SettingsError> {
    let value = match provider.get_var(key).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| SettingsError::invalid(key, format!("expected an integer, got {:?}", raw)))?,
        None => default,
    };

    if value < 1 {
        return Err(SettingsError::invalid(key, "must be at least 1"));
    }

    Ok(value)
}

fn parse_positive_u64(
    provider: &dyn EnvironmentProvider,
    key: &str,
    default: u64,
) -> Result<u64, SettingsError> {
    let value = match provider.get_var(key).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| SettingsError::invalid(key, format!("expected an integer, got {:?}", raw)))?,
        None => default,
    };

    if value < 1 {
        return Err(SettingsError::invalid(key, "must be at least 1"));
    }

    Ok(value)
}

fn parse_bool(
    provider: &dyn EnvironmentProvider,
    key: &str,
    default: bool,
) -> Result<bool, SettingsError> {
    match provider.get_var(key).filter(|v| !v.is_empty()) {
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(SettingsError::invalid(
                key,
                format!("expected true or false, got {:?}", raw),
            )),
        },
        None => Ok(default),
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("request_timeout", &self.request_timeout)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .field("seed_demo_catalog", &self.seed_demo_catalog)
            .finish()
    }
}

/// Test environment provider with configurable variables
///
/// Lets tests provide specific variable values without touching the
/// global environment state.
#[cfg(test)]
pub struct MockEnvironment {
    vars: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn empty() -> Self {
        Self {
            vars: std::collections::HashMap::new(),
        }
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
