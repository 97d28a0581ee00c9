use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasPattern, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, ImageData};

use crate::error::Error;
use crate::geometry::Point;
use crate::surface::Surface;

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        let message = value
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{value:?}"));
        Error::Surface(message)
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// The page canvas, driven through its 2d context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, Error> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(Error::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }

    /// Repeating pattern brush from an already-decoded image.
    pub fn pattern(&self, image: &HtmlImageElement) -> Result<CanvasPattern, Error> {
        self.ctx
            .create_pattern_with_html_image_element(image, "repeat")?
            .ok_or_else(|| Error::PatternUnavailable { id: image.id() })
    }
}

impl Surface for CanvasSurface {
    type Brush = CanvasPattern;
    type Block = ImageData;

    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) -> Result<(), Error> {
        Ok(self.ctx.translate(dx, dy)?)
    }

    fn rotate(&mut self, angle: f64) -> Result<(), Error> {
        Ok(self.ctx.rotate(angle)?)
    }

    fn scale(&mut self, sx: f64, sy: f64) -> Result<(), Error> {
        Ok(self.ctx.scale(sx, sy)?)
    }

    fn set_brush(&mut self, brush: &CanvasPattern) {
        self.ctx.set_fill_style_canvas_pattern(brush);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn capture(&mut self, width: u32, height: u32) -> Result<ImageData, Error> {
        Ok(self.ctx.get_image_data(0.0, 0.0, f64::from(width), f64::from(height))?)
    }

    fn stamp(&mut self, block: &ImageData, x: f64, y: f64) -> Result<(), Error> {
        Ok(self.ctx.put_image_data(block, x, y)?)
    }
}
