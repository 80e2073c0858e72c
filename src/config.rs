use std::net::SocketAddr;

use thiserror::Error;

const BIND: &str = "SAKURAGUIDE_BIND";
const SESSION_MINUTES: &str = "SAKURAGUIDE_SESSION_MINUTES";
const SECURE_COOKIES: &str = "SAKURAGUIDE_SECURE_COOKIES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is not a valid {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: SocketAddr,
    pub session_minutes: i64,
    pub secure_cookies: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            session_minutes: 30,
            secure_cookies: false,
        }
    }
}

impl Config {
    /// Reads `SAKURAGUIDE_*` variables, including ones from a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(value) = lookup(BIND) {
            config.bind = value.parse().map_err(|_| ConfigError::Invalid {
                key: BIND,
                value,
                expected: "socket address",
            })?;
        }

        if let Some(value) = lookup(SESSION_MINUTES) {
            config.session_minutes = match value.parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: SESSION_MINUTES,
                        value,
                        expected: "positive number of minutes",
                    })
                }
            };
        }

        if let Some(value) = lookup(SECURE_COOKIES) {
            config.secure_cookies = match value.as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: SECURE_COOKIES,
                        value,
                        expected: "boolean",
                    })
                }
            };
        }

        Ok(config)
    }
}
