#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Animated, seamlessly tiling triangular kaleidoscope for a 2d canvas.
//!
//! The platform-neutral core draws one super-tile from two pattern fans and
//! stamps it over the surface. The browser glue lives in `wasm` and is only
//! compiled for wasm32.

pub mod blit;
pub mod config;
pub mod driver;
pub mod error;
pub mod fan;
pub mod geometry;
pub mod recording;
pub mod surface;

pub use config::{KaleidoscopeConfig, OFFSET_MODULUS, PATTERN_SIDE, TICK_INTERVAL_MS};
pub use driver::{DriverPhase, FlowState, Kaleidoscope, TickDriver, TickReport};
pub use error::{Error, Result};
pub use surface::{BrushKind, Brushes, Saved, Surface};

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::KaleidoscopeConfig;

    pub mod canvas;
    mod logger;
    mod render;

    pub use canvas::CanvasSurface;
    pub use render::start;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let config = KaleidoscopeConfig::default();
        logger::init(config.log_level);
        render::start_when_loaded(config)?;
        Ok(())
    }
}
