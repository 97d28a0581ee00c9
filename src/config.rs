//! Tunables for the kaleidoscope. There are only a handful; the page that
//! hosts the effect is expected to match the element ids below.

use crate::error::{Error, Result};

/// Side length of the square source pattern, in pixels.
pub const PATTERN_SIDE: u32 = 150;

/// Timer period between ticks (20 ticks per second).
pub const TICK_INTERVAL_MS: u32 = 50;

/// The scroll offset wraps at this value.
pub const OFFSET_MODULUS: u32 = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct KaleidoscopeConfig {
    pub pattern_side: u32,
    pub tick_interval_ms: u32,
    pub offset_modulus: u32,
    pub canvas_id: &'static str,
    pub base_image_id: &'static str,
    pub reflected_image_id: &'static str,
    pub log_level: log::LevelFilter,
}

impl Default for KaleidoscopeConfig {
    fn default() -> Self {
        Self {
            pattern_side: PATTERN_SIDE,
            tick_interval_ms: TICK_INTERVAL_MS,
            offset_modulus: OFFSET_MODULUS,
            canvas_id: "c",
            base_image_id: "base",
            reflected_image_id: "baseR",
            log_level: log::LevelFilter::Info,
        }
    }
}

impl KaleidoscopeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.pattern_side == 0 {
            return Err(Error::InvalidConfig("pattern side must be non-zero".into()));
        }
        if self.offset_modulus == 0 {
            return Err(Error::InvalidConfig("offset modulus must be non-zero".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::InvalidConfig("tick interval must be non-zero".into()));
        }
        Ok(())
    }

    /// Ticks per second implied by the timer period.
    pub fn ticks_per_second(&self) -> f64 {
        1000.0 / f64::from(self.tick_interval_ms)
    }
}
