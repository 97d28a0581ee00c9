use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Document, HtmlCanvasElement, HtmlImageElement, Window};

use super::canvas::CanvasSurface;
use crate::config::KaleidoscopeConfig;
use crate::driver::TickDriver;
use crate::error::{Error, Result};
use crate::surface::Brushes;

fn page() -> Result<(Window, Document)> {
    let window = window().ok_or(Error::ContextUnavailable)?;
    let document = window.document().ok_or(Error::ContextUnavailable)?;
    Ok((window, document))
}

fn element<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| Error::MissingElement { id: id.to_owned() })?
        .dyn_into::<T>()
        .map_err(|_| Error::WrongElementType { id: id.to_owned(), expected })
}

/// Look up the canvas and both images, and start once the images are
/// decoded. If they are still loading, wait for the window `load` event.
pub fn start_when_loaded(config: KaleidoscopeConfig) -> Result<()> {
    let (window, document) = page()?;
    let canvas: HtmlCanvasElement = element(&document, config.canvas_id, "canvas")?;
    let base: HtmlImageElement = element(&document, config.base_image_id, "image")?;
    let reflected: HtmlImageElement = element(&document, config.reflected_image_id, "image")?;

    if base.complete() && reflected.complete() {
        return start(canvas, &base, &reflected, config);
    }

    log::debug!("pattern images still loading, waiting for window load");
    let on_load = Closure::once_into_js(move || {
        if let Err(err) = start(canvas, &base, &reflected, config) {
            log::error!("kaleidoscope failed to start: {err}");
        }
    });
    window
        .add_event_listener_with_callback("load", on_load.unchecked_ref())
        .map_err(Error::from)
}

fn check_patterns(base: &HtmlImageElement, reflected: &HtmlImageElement, side: u32) -> Result<()> {
    let b = (base.natural_width(), base.natural_height());
    let r = (reflected.natural_width(), reflected.natural_height());
    if b != r || b.0 != b.1 {
        return Err(Error::PatternMismatch { base: b, reflected: r });
    }
    if b.0 != side {
        log::warn!("pattern images are {}px, expected {side}px", b.0);
    }
    Ok(())
}

/// Build both brushes, start the driver and tick it on a fixed-rate timer
/// for the rest of the page's life.
pub fn start(
    canvas: HtmlCanvasElement,
    base: &HtmlImageElement,
    reflected: &HtmlImageElement,
    config: KaleidoscopeConfig,
) -> Result<()> {
    check_patterns(base, reflected, config.pattern_side)?;

    let surface = CanvasSurface::new(canvas)?;
    let brushes = Brushes::new(surface.pattern(base)?, surface.pattern(reflected)?);
    let mut driver = TickDriver::new(surface, &config, brushes)?;
    driver.start()?;

    let driver = Rc::new(RefCell::new(driver));
    let tick = Closure::wrap(Box::new(move || {
        if let Err(err) = driver.borrow_mut().tick() {
            log::error!("tick failed: {err}");
        }
    }) as Box<dyn FnMut()>);

    let (window, _) = page()?;
    window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            config.tick_interval_ms as i32,
        )
        .map_err(Error::from)?;
    // Runs until the page goes away.
    tick.forget();

    log::info!("ticking every {}ms", config.tick_interval_ms);
    Ok(())
}
