//! A surface that draws nothing and remembers everything: transforms, the
//! save stack, every filled triangle in device coordinates, and every pixel
//! block read or written. Backs the host dry run and the tests.

use crate::error::Result;
use crate::geometry::{Affine, Point};
use crate::surface::{BrushKind, Surface};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledTriangle {
    pub brush: BrushKind,
    pub vertices: [Point; 3],
    /// Where the pattern's origin lands, i.e. the frame origin at fill time.
    pub anchor: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedBlock {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Fill(BrushKind),
    Capture(CapturedBlock),
    Stamp { x: f64, y: f64 },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    transform: Affine,
    stack: Vec<(Affine, Option<BrushKind>)>,
    max_depth: usize,
    brush: Option<BrushKind>,
    path: Vec<Point>,
    fills: Vec<FilledTriangle>,
    ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            transform: Affine::IDENTITY,
            stack: Vec::new(),
            max_depth: 0,
            brush: None,
            path: Vec::new(),
            fills: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Current save-stack depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn fills(&self) -> &[FilledTriangle] {
        &self.fills
    }

    pub fn fills_with(&self, brush: BrushKind) -> impl Iterator<Item = &FilledTriangle> + '_ {
        self.fills.iter().filter(move |f| f.brush == brush)
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn stamps(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            Op::Stamp { x, y } => Some((*x, *y)),
            _ => None,
        })
    }

    /// Forget recorded draws, keeping transform and stack.
    pub fn clear_log(&mut self) {
        self.fills.clear();
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    type Brush = BrushKind;
    type Block = CapturedBlock;

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn save(&mut self) {
        self.stack.push((self.transform, self.brush));
        self.max_depth = self.max_depth.max(self.stack.len());
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some((transform, brush)) => {
                self.transform = transform;
                self.brush = brush;
            }
            None => log::warn!("restore without matching save"),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.transform = self.transform.translate(dx, dy);
        Ok(())
    }

    fn rotate(&mut self, angle: f64) -> Result<()> {
        self.transform = self.transform.rotate(angle);
        Ok(())
    }

    fn scale(&mut self, sx: f64, sy: f64) -> Result<()> {
        self.transform = self.transform.scale(sx, sy);
        Ok(())
    }

    fn set_brush(&mut self, brush: &BrushKind) {
        self.brush = Some(*brush);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Point) {
        self.path.clear();
        self.path.push(self.transform.apply(p));
    }

    fn line_to(&mut self, p: Point) {
        self.path.push(self.transform.apply(p));
    }

    fn close_path(&mut self) {}

    fn fill(&mut self) {
        let Some(brush) = self.brush else {
            log::warn!("fill with no brush set");
            return;
        };
        if let [a, b, c] = self.path[..] {
            self.fills.push(FilledTriangle {
                brush,
                vertices: [a, b, c],
                anchor: self.transform.apply(Point::default()),
            });
            self.ops.push(Op::Fill(brush));
        }
    }

    fn capture(&mut self, width: u32, height: u32) -> Result<CapturedBlock> {
        let block = CapturedBlock { width, height };
        self.ops.push(Op::Capture(block));
        Ok(block)
    }

    fn stamp(&mut self, _block: &CapturedBlock, x: f64, y: f64) -> Result<()> {
        self.ops.push(Op::Stamp { x, y });
        Ok(())
    }
}
