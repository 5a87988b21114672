use std::{net::SocketAddr, time::Duration};

use crate::error::{config::ConfigError, AppError};

const DEFAULT_HISTORY_WINDOW: u16 = 200;
const MIN_HISTORY_WINDOW: u16 = 100;
const MAX_HISTORY_WINDOW: u16 = 1000;
const DEFAULT_PLATFORM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_NOTICE_TTL_SECS: u64 = 30;
const DEFAULT_COMMAND_PREFIX: &str = "!";
const DEFAULT_API_BIND_ADDR: &str = "127.0.0.1:8080";

pub struct Config {
    pub discord_bot_token: String,
    pub database_url: String,

    pub guild_id: u64,
    pub counting_channel_id: u64,
    pub count_voice_channel_id: Option<u64>,
    pub owner_user_id: Option<u64>,

    /// Number of most recent messages scanned when recovering the count.
    ///
    /// Larger windows cost more requests at startup but recover longer chains.
    pub history_window: u16,
    pub platform_timeout: Duration,
    pub notice_ttl: Duration,
    pub command_prefix: String,

    pub api_bind_addr: SocketAddr,
    pub admin_api_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Split from `from_env` so parsing can be tested without touching the process
    /// environment.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and all values valid
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let history_window = match optional("HISTORY_WINDOW") {
            Some(raw) => {
                let window: u16 = parse_value("HISTORY_WINDOW", &raw)?;
                if !(MIN_HISTORY_WINDOW..=MAX_HISTORY_WINDOW).contains(&window) {
                    return Err(ConfigError::InvalidEnvVar {
                        name: "HISTORY_WINDOW".to_string(),
                        value: raw,
                        reason: format!(
                            "must be between {} and {}",
                            MIN_HISTORY_WINDOW, MAX_HISTORY_WINDOW
                        ),
                    }
                    .into());
                }
                window
            }
            None => DEFAULT_HISTORY_WINDOW,
        };

        let platform_timeout_secs = optional("PLATFORM_TIMEOUT_SECS")
            .map(|raw| parse_value::<u64>("PLATFORM_TIMEOUT_SECS", &raw))
            .transpose()?
            .unwrap_or(DEFAULT_PLATFORM_TIMEOUT_SECS);
        let notice_ttl_secs = optional("NOTICE_TTL_SECS")
            .map(|raw| parse_value::<u64>("NOTICE_TTL_SECS", &raw))
            .transpose()?
            .unwrap_or(DEFAULT_NOTICE_TTL_SECS);

        let api_bind_addr = optional("API_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_API_BIND_ADDR.to_string());

        Ok(Self {
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            guild_id: parse_value("GUILD_ID", &required("GUILD_ID")?)?,
            counting_channel_id: parse_value(
                "COUNTING_CHANNEL_ID",
                &required("COUNTING_CHANNEL_ID")?,
            )?,
            count_voice_channel_id: optional("COUNT_VOICE_CHANNEL_ID")
                .map(|raw| parse_value("COUNT_VOICE_CHANNEL_ID", &raw))
                .transpose()?,
            owner_user_id: optional("ADMIN_USER_ID")
                .map(|raw| parse_value("ADMIN_USER_ID", &raw))
                .transpose()?,
            history_window,
            platform_timeout: Duration::from_secs(platform_timeout_secs),
            notice_ttl: Duration::from_secs(notice_ttl_secs),
            command_prefix: optional("COMMAND_PREFIX")
                .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string()),
            api_bind_addr: parse_value("API_BIND_ADDR", &api_bind_addr)?,
            admin_api_token: optional("ADMIN_API_TOKEN"),
        })
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
