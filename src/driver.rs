//! Per-tick orchestration: advance the flow, draw the super-tile, tile it.

use crate::blit::{blit, TileBlock};
use crate::config::KaleidoscopeConfig;
use crate::error::{Error, Result};
use crate::fan::{draw_row, RowStats};
use crate::geometry::Triangle;
use crate::surface::{Brushes, Surface};

/// Vertical phase of the pattern flow. Stays in `[0, modulus)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowState {
    offset: u32,
    modulus: u32,
}

impl FlowState {
    pub fn new(modulus: u32) -> Self {
        Self { offset: 0, modulus }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// One step back, wrapping at the modulus.
    #[must_use]
    pub fn advance(self) -> Self {
        let offset = (i64::from(self.offset) - 1).rem_euclid(i64::from(self.modulus)) as u32;
        Self { offset, ..self }
    }
}

/// What one tick drew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub offset: u32,
    pub plain_row: RowStats,
    pub alternate_row: RowStats,
    pub block: TileBlock,
    pub stamps: usize,
}

impl TickReport {
    pub fn normal_fills(&self) -> usize {
        self.plain_row.normal.fills + self.alternate_row.normal.fills
    }

    pub fn reflected_fills(&self) -> usize {
        self.plain_row.mirrored.fills + self.alternate_row.mirrored.fills
    }
}

/// Renders one frame of the kaleidoscope for a given flow state.
pub struct Kaleidoscope<B> {
    tri: Triangle,
    block: TileBlock,
    brushes: Brushes<B>,
}

impl<B> Kaleidoscope<B> {
    pub fn new(config: &KaleidoscopeConfig, brushes: Brushes<B>) -> Result<Self> {
        config.validate()?;
        let tri = Triangle::new(f64::from(config.pattern_side));
        Ok(Self {
            tri,
            block: TileBlock::for_triangle(&tri),
            brushes,
        })
    }

    pub fn triangle(&self) -> &Triangle {
        &self.tri
    }

    pub fn block(&self) -> TileBlock {
        self.block
    }

    /// Working origin sits half a triangle left of the surface origin so
    /// the fans line up with the stamp grid. Applied once, at startup.
    pub fn prepare<S>(&self, surface: &mut S) -> Result<()>
    where
        S: Surface<Brush = B> + ?Sized,
    {
        surface.translate(-0.5 * self.tri.side(), 0.0)
    }

    /// Both rows of the super-tile, then the tiling pass. Capture happens
    /// only after both rows are on the surface.
    pub fn render<S>(&self, surface: &mut S, flow: FlowState) -> Result<TickReport>
    where
        S: Surface<Brush = B> + ?Sized,
    {
        let offset = f64::from(flow.offset());
        let (dx, dy) = (1.5 * self.tri.side(), self.tri.height());

        let plain_row = draw_row(surface, &self.brushes, &self.tri, offset, false)?;
        surface.translate(dx, dy)?;
        let alternate_row = draw_row(surface, &self.brushes, &self.tri, offset, true);
        surface.translate(-dx, -dy)?;
        let alternate_row = alternate_row?;

        let stamps = blit(surface, self.block, &self.tri)?;
        Ok(TickReport {
            offset: flow.offset(),
            plain_row,
            alternate_row,
            block: self.block,
            stamps,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Idle,
    Running(FlowState),
}

/// Owns the surface, the renderer and the flow state between ticks.
pub struct TickDriver<S: Surface> {
    surface: S,
    kaleidoscope: Kaleidoscope<S::Brush>,
    modulus: u32,
    phase: DriverPhase,
}

impl<S: Surface> TickDriver<S> {
    pub fn new(surface: S, config: &KaleidoscopeConfig, brushes: Brushes<S::Brush>) -> Result<Self> {
        Ok(Self {
            surface,
            kaleidoscope: Kaleidoscope::new(config, brushes)?,
            modulus: config.offset_modulus,
            phase: DriverPhase::Idle,
        })
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn kaleidoscope(&self) -> &Kaleidoscope<S::Brush> {
        &self.kaleidoscope
    }

    pub fn start(&mut self) -> Result<()> {
        if self.phase != DriverPhase::Idle {
            return Err(Error::AlreadyRunning);
        }
        self.kaleidoscope.prepare(&mut self.surface)?;
        self.phase = DriverPhase::Running(FlowState::new(self.modulus));
        let (w, h) = self.surface.size();
        log::info!("kaleidoscope running on {w}x{h} surface");
        Ok(())
    }

    pub fn tick(&mut self) -> Result<TickReport> {
        let DriverPhase::Running(flow) = self.phase else {
            return Err(Error::NotStarted);
        };
        let flow = flow.advance();
        self.phase = DriverPhase::Running(flow);
        let report = self.kaleidoscope.render(&mut self.surface, flow)?;
        log::debug!(
            "tick offset={} fills={}+{} stamps={}",
            report.offset,
            report.normal_fills(),
            report.reflected_fills(),
            report.stamps
        );
        Ok(report)
    }
}
