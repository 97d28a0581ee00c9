//! The drawing surface the kaleidoscope paints on, and the save/restore
//! guard every localized transform sequence runs under.

use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::geometry::{FrameOp, Point};

/// Which of the two pattern images fills a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrushKind {
    Normal,
    Reflected,
}

/// The pair of repeating-pattern fills, built once at startup.
#[derive(Debug, Clone)]
pub struct Brushes<B> {
    pub normal: B,
    pub reflected: B,
}

impl<B> Brushes<B> {
    pub fn new(normal: B, reflected: B) -> Self {
        Self { normal, reflected }
    }

    pub fn get(&self, kind: BrushKind) -> &B {
        match kind {
            BrushKind::Normal => &self.normal,
            BrushKind::Reflected => &self.reflected,
        }
    }
}

/// A 2d drawing context: transform stack, path fill with a pattern brush,
/// and raw pixel-block copies that ignore the transform.
pub trait Surface {
    type Brush;
    type Block;

    /// Pixel size of the visible surface.
    fn size(&self) -> (u32, u32);

    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64) -> Result<()>;
    fn rotate(&mut self, angle: f64) -> Result<()>;
    fn scale(&mut self, sx: f64, sy: f64) -> Result<()>;

    fn set_brush(&mut self, brush: &Self::Brush);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn close_path(&mut self);
    fn fill(&mut self);

    /// Read back the `width x height` block at the surface origin.
    fn capture(&mut self, width: u32, height: u32) -> Result<Self::Block>;

    /// Write a captured block with its top-left corner at `(x, y)`.
    fn stamp(&mut self, block: &Self::Block, x: f64, y: f64) -> Result<()>;

    fn apply(&mut self, op: FrameOp) -> Result<()> {
        match op {
            FrameOp::Translate(dx, dy) => self.translate(dx, dy),
            FrameOp::Rotate(angle) => self.rotate(angle),
            FrameOp::Scale(sx, sy) => self.scale(sx, sy),
        }
    }

    fn apply_all(&mut self, ops: &[FrameOp]) -> Result<()> {
        ops.iter().try_for_each(|op| self.apply(*op))
    }

    fn fill_triangle(&mut self, vertices: &[Point; 3]) {
        self.begin_path();
        self.move_to(vertices[0]);
        self.line_to(vertices[1]);
        self.line_to(vertices[2]);
        self.close_path();
        self.fill();
    }
}

/// Holds a `save()` on the wrapped surface and issues the matching
/// `restore()` when dropped, on every exit path.
pub struct Saved<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> Saved<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for Saved<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for Saved<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.surface
    }
}

impl<S: Surface + ?Sized> Drop for Saved<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
