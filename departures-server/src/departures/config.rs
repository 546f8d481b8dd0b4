//! Display configuration for departure boards.

use chrono_tz::Tz;

/// How departures are presented.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Civil time zone for labels. Independent of the host's zone.
    pub timezone: Tz,

    /// Maximum number of departures shown per stop, applied after filtering.
    /// Separate from the provider-side `max_results`.
    pub display_cap: usize,
}

impl DisplayConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(timezone: Tz, display_cap: usize) -> Self {
        Self {
            timezone,
            display_cap,
        }
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_display_cap(mut self, cap: usize) -> Self {
        self.display_cap = cap;
        self
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Australia::Melbourne,
            display_cap: 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DisplayConfig::default();
        assert_eq!(config.timezone, chrono_tz::Australia::Melbourne);
        assert_eq!(config.display_cap, 12);
    }

    #[test]
    fn custom_config() {
        let config = DisplayConfig::default()
            .with_timezone(chrono_tz::Pacific::Auckland)
            .with_display_cap(4);
        assert_eq!(config.timezone, chrono_tz::Pacific::Auckland);
        assert_eq!(config.display_cap, 4);

        let config = DisplayConfig::new(chrono_tz::UTC, 1);
        assert_eq!(config.timezone, chrono_tz::UTC);
        assert_eq!(config.display_cap, 1);
    }
}
