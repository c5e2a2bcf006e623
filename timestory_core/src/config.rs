use std::time::Duration;

use serde::Deserialize;

use crate::error::{TimestoryError, TimestoryResult};

fn default_month_width() -> f64 {
    120.0
}

fn default_buffer_months() -> u32 {
    1
}

fn default_recent_anchor() -> f64 {
    0.8
}

fn default_dropdown_close_delay_ms() -> u64 {
    200
}

/// Layout constants for the timeline and the event form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimelineConfig {
    /// Width of a single month column on the timeline track, in pixels.
    #[serde(default = "default_month_width")]
    pub month_width: f64,
    /// Number of empty months shown before the earliest and after the latest
    /// event.
    #[serde(default = "default_buffer_months")]
    pub buffer_months: u32,
    /// Where the most recent event lands after an automatic scroll, as a
    /// fraction of the viewport width measured from its left edge.
    #[serde(default = "default_recent_anchor")]
    pub recent_anchor: f64,
    /// How long the category dropdown stays open after the search field loses
    /// focus, so that a click on a suggestion still registers.
    #[serde(default = "default_dropdown_close_delay_ms")]
    pub dropdown_close_delay_ms: u64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        TimelineConfig {
            month_width: default_month_width(),
            buffer_months: default_buffer_months(),
            recent_anchor: default_recent_anchor(),
            dropdown_close_delay_ms: default_dropdown_close_delay_ms(),
        }
    }
}

impl TimelineConfig {
    /// Parses a configuration from TOML. Missing keys take their default
    /// values. The result is validated before being returned.
    pub fn from_toml_str(source: &str) -> TimestoryResult<Self> {
        let config: TimelineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TimestoryResult<()> {
        if !(self.month_width.is_finite() && self.month_width > 0.0) {
            return Err(TimestoryError::InvalidConfig(format!(
                "month_width must be a positive number, got {}",
                self.month_width
            )));
        }
        if self.buffer_months == 0 {
            return Err(TimestoryError::InvalidConfig(
                "buffer_months must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.recent_anchor) {
            return Err(TimestoryError::InvalidConfig(format!(
                "recent_anchor must be between 0 and 1, got {}",
                self.recent_anchor
            )));
        }
        Ok(())
    }

    pub fn dropdown_close_delay(&self) -> Duration {
        Duration::from_millis(self.dropdown_close_delay_ms)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = TimelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, TimelineConfig::default());
        assert_eq!(config.month_width, 120.0);
        assert_eq!(config.buffer_months, 1);
        assert_eq!(config.dropdown_close_delay(), Duration::from_millis(200));
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let config = TimelineConfig::from_toml_str("month_width = 80.0\nbuffer_months = 2").unwrap();
        assert_eq!(config.month_width, 80.0);
        assert_eq!(config.buffer_months, 2);
        assert_eq!(config.recent_anchor, 0.8);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            TimelineConfig::from_toml_str("month_width = 0.0"),
            Err(TimestoryError::InvalidConfig(_))
        ));
        assert!(matches!(
            TimelineConfig::from_toml_str("buffer_months = 0"),
            Err(TimestoryError::InvalidConfig(_))
        ));
        assert!(matches!(
            TimelineConfig::from_toml_str("recent_anchor = 1.5"),
            Err(TimestoryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            TimelineConfig::from_toml_str("month_width = \"wide\""),
            Err(TimestoryError::Config(_))
        ));
        assert!(matches!(
            TimelineConfig::from_toml_str("unknown_key = 1"),
            Err(TimestoryError::Config(_))
        ));
    }
}
