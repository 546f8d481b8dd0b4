//! Application configuration from the environment.
//!
//! Read once at startup. Credentials and stop ids are required; everything
//! else has a default. A value that is present but unparseable is an error
//! rather than a silent fallback.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::departures::{BoardConfig, DisplayConfig, StopQuery};
use crate::domain::{DirectionId, RouteType, StopId};
use crate::ptv::PtvConfig;

/// Provider-side cap on departures per request.
const DEFAULT_MAX_RESULTS: u32 = 15;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors from loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ptv: PtvConfig,
    pub display: DisplayConfig,
    pub board: BoardConfig,
    pub bind_addr: SocketAddr,
    /// Serve fixture files from this directory instead of calling PTV.
    pub mock_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env { lookup };

        let mock_dir = env.get("PTV_MOCK_DIR").map(PathBuf::from);

        // Credentials are only optional when serving fixtures.
        let (dev_id, api_key) = if mock_dir.is_some() {
            (
                env.get("PTV_DEV_ID").unwrap_or_default(),
                env.get("PTV_API_KEY").unwrap_or_default(),
            )
        } else {
            (env.require("PTV_DEV_ID")?, env.require("PTV_API_KEY")?)
        };

        let mut ptv = PtvConfig::new(dev_id, api_key);
        if let Some(url) = env.get("PTV_BASE_URL") {
            ptv = ptv.with_base_url(url.trim_end_matches('/'));
        }
        if let Some(secs) = env.parse::<u64>("PTV_TIMEOUT_SECS")? {
            ptv = ptv.with_timeout(secs);
        }

        let mut display = DisplayConfig::default();
        if let Some(tz) = env.parse::<Tz>("DISPLAY_TIMEZONE")? {
            display = display.with_timezone(tz);
        }
        if let Some(cap) = env.parse::<usize>("DISPLAY_CAP")? {
            display = display.with_display_cap(cap);
        }

        let max_results = env
            .parse::<u32>("PTV_MAX_RESULTS")?
            .unwrap_or(DEFAULT_MAX_RESULTS);

        let board = BoardConfig {
            train: env.stop_query(RouteType::TRAIN, "TRAIN_STOP_ID", "TRAIN_DIRECTION_ID", max_results)?,
            tram: env.stop_query(RouteType::TRAM, "TRAM_STOP_ID", "TRAM_DIRECTION_ID", max_results)?,
        };

        let bind_addr = env
            .parse::<SocketAddr>("BIND_ADDR")?
            .map_or_else(|| DEFAULT_BIND_ADDR.parse(), Ok)
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: DEFAULT_BIND_ADDR.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            ptv,
            display,
            board,
            bind_addr,
            mock_dir,
        })
    }
}

struct Env<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Non-empty value of `name`.
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.trim().is_empty())
    }

    fn require(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::Missing(name))
    }

    fn parse<T>(&self, name: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: ToString,
    {
        self.get(name)
            .map(|value| {
                value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                    name,
                    reason: e.to_string(),
                    value,
                })
            })
            .transpose()
    }

    fn stop_query(
        &self,
        route_type: RouteType,
        stop_var: &'static str,
        direction_var: &'static str,
        max_results: u32,
    ) -> Result<StopQuery, ConfigError> {
        let stop_id = self
            .parse::<u32>(stop_var)?
            .ok_or(ConfigError::Missing(stop_var))?;

        let mut query = StopQuery::new(route_type, StopId(stop_id)).with_max_results(max_results);
        if let Some(direction) = self.parse::<u32>(direction_var)? {
            query = query.with_direction(DirectionId(direction));
        }

        Ok(query)
    }
}
