use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;
use std::time::Duration;

pub const MAIN_ADDRESS_REAL: &str = "wss://ws.xtb.com/real";
pub const MAIN_ADDRESS_DEMO: &str = "wss://ws.xtb.com/demo";
pub const STREAM_ADDRESS_REAL: &str = "wss://ws.xtb.com/realStream";
pub const STREAM_ADDRESS_DEMO: &str = "wss://ws.xtb.com/demoStream";

/// The server disconnects idle sessions, so the keep-alive ping has to fire
/// comfortably below the ten minute idle limit.
pub const DEFAULT_KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(300);

/// Deployment target. Demo and real accounts live on distinct endpoints for
/// both the main and the streaming socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMode {
    Demo,
    Real,
}

#[derive(Debug, Clone)]
pub struct XtbConfig {
    pub user_id: i64,
    pub password: Secret<String>,
    pub mode: ClientMode,
    pub main_url: Option<String>,
    pub stream_url: Option<String>,
    pub keep_alive_interval: Duration,
    pub streaming: bool,
}

// Custom Serialize implementation - never expose the password in serialization
impl Serialize for XtbConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("XtbConfig", 5)?;
        state.serialize_field("user_id", &self.user_id)?;
        state.serialize_field("password", "[REDACTED]")?;
        state.serialize_field("demo", &(self.mode == ClientMode::Demo))?;
        state.serialize_field("streaming", &self.streaming)?;
        state.serialize_field("keep_alive_secs", &self.keep_alive_interval.as_secs())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for XtbConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct XtbConfigHelper {
            user_id: i64,
            password: String,
            #[serde(default)]
            demo: bool,
            #[serde(default)]
            streaming: bool,
        }

        let helper = XtbConfigHelper::deserialize(deserializer)?;
        let mode = if helper.demo {
            ClientMode::Demo
        } else {
            ClientMode::Real
        };
        Ok(Self {
            user_id: helper.user_id,
            password: Secret::new(helper.password),
            mode,
            main_url: None,
            stream_url: None,
            keep_alive_interval: DEFAULT_KEEP_ALIVE_INTERVAL,
            streaming: helper.streaming,
        })
    }
}

impl XtbConfig {
    /// Create a new configuration with account credentials. Defaults to the
    /// demo endpoints with streaming disabled.
    #[must_use]
    pub fn new(user_id: i64, password: String) -> Self {
        Self {
            user_id,
            password: Secret::new(password),
            mode: ClientMode::Demo,
            main_url: None,
            stream_url: None,
            keep_alive_interval: DEFAULT_KEEP_ALIVE_INTERVAL,
            streaming: false,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_USER_ID` (e.g., `XTB_USER_ID`)
    /// - `{PREFIX}_PASSWORD` (e.g., `XTB_PASSWORD`)
    /// - `{PREFIX}_DEMO` (optional, defaults to true)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let user_id_var = format!("{}_USER_ID", prefix.to_uppercase());
        let password_var = format!("{}_PASSWORD", prefix.to_uppercase());
        let demo_var = format!("{}_DEMO", prefix.to_uppercase());

        let user_id = env::var(&user_id_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(user_id_var.clone()))?
            .parse::<i64>()
            .map_err(|e| {
                ConfigError::InvalidConfiguration(format!("{} is not an integer: {}", user_id_var, e))
            })?;

        let password =
            env::var(&password_var).map_err(|_| ConfigError::MissingEnvironmentVariable(password_var))?;

        let demo = env::var(&demo_var)
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .unwrap_or(true);

        let mut config = Self::new(user_id, password);
        config.mode = if demo { ClientMode::Demo } else { ClientMode::Real };
        Ok(config)
    }

    /// Create configuration from a .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(_) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // .env file doesn't exist, that's okay - continue with system env vars
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Select the deployment target.
    #[must_use]
    pub const fn mode(mut self, mode: ClientMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the main socket address. Primarily for tests against a local
    /// mock endpoint.
    #[must_use]
    pub fn main_url(mut self, url: impl Into<String>) -> Self {
        self.main_url = Some(url.into());
        self
    }

    /// Override the streaming socket address.
    #[must_use]
    pub fn stream_url(mut self, url: impl Into<String>) -> Self {
        self.stream_url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn keep_alive_interval(mut self, interval: Duration) -> Self {
        self.keep_alive_interval = interval;
        self
    }

    /// Enable the experimental push-subscription channel. Requires the server
    /// to hand out a stream session token at login.
    #[must_use]
    pub const fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub(crate) fn resolve_main_url(&self) -> String {
        self.main_url.clone().unwrap_or_else(|| {
            match self.mode {
                ClientMode::Demo => MAIN_ADDRESS_DEMO,
                ClientMode::Real => MAIN_ADDRESS_REAL,
            }
            .to_string()
        })
    }

    pub(crate) fn resolve_stream_url(&self) -> String {
        self.stream_url.clone().unwrap_or_else(|| {
            match self.mode {
                ClientMode::Demo => STREAM_ADDRESS_DEMO,
                ClientMode::Real => STREAM_ADDRESS_REAL,
            }
            .to_string()
        })
    }

    /// Get the account password (use carefully - exposes the secret)
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
