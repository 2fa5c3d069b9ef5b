//! Engine tuning parsed from environment variables.

use std::time::Duration;

use crate::consts::{BULK_ADD_MAX, MIN_CANVAS_DIM, PICKER_TICK_MS, PICKER_TICKS};

/// Knobs for the interaction engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Interval between picker highlight ticks, in milliseconds.
    pub picker_tick_ms: u64,
    /// Ticks per pick animation; the last one commits the winner.
    pub picker_ticks: u32,
    /// Upper bound on items created by one bulk add.
    pub bulk_max: usize,
    /// Floor applied to each canvas dimension before running a generator.
    pub min_canvas_dim: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            picker_tick_ms: PICKER_TICK_MS,
            picker_ticks: PICKER_TICKS,
            bulk_max: BULK_ADD_MAX,
            min_canvas_dim: MIN_CANVAS_DIM,
        }
    }
}

impl EngineConfig {
    /// Build engine config from environment variables.
    ///
    /// Optional:
    /// - `SEATING_PICKER_TICK_MS`: default 100
    /// - `SEATING_PICKER_TICKS`: default 16
    /// - `SEATING_BULK_MAX`: default 50
    /// - `SEATING_MIN_CANVAS_DIM`: default 200
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            picker_tick_ms: env_parse("SEATING_PICKER_TICK_MS", PICKER_TICK_MS).max(1),
            picker_ticks: env_parse("SEATING_PICKER_TICKS", PICKER_TICKS).max(1),
            bulk_max: env_parse("SEATING_BULK_MAX", BULK_ADD_MAX).max(1),
            min_canvas_dim: env_parse("SEATING_MIN_CANVAS_DIM", MIN_CANVAS_DIM),
        }
    }

    #[must_use]
    pub fn picker_interval(&self) -> Duration {
        Duration::from_millis(self.picker_tick_ms)
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
