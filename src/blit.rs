//! Replicates the rendered super-tile across the whole surface by pixel copy
//! instead of re-running the fan geometry once per visible tile.

use crate::error::Result;
use crate::geometry::Triangle;
use crate::surface::Surface;

/// Footprint of one super-tile: three triangle widths by two triangle heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileBlock {
    pub width: u32,
    pub height: u32,
}

impl TileBlock {
    pub fn for_triangle(tri: &Triangle) -> Self {
        Self {
            width: (3.0 * tri.side()) as u32,
            height: (2.0 * tri.height()).floor() as u32,
        }
    }
}

/// Top-left corners for every stamp needed to cover a `width x height`
/// surface, row by row.
///
/// Columns advance by one block width (three triangle sides) and run while
/// the column start is left of `width + side`; rows advance by one block
/// height and run while the row start is above `height + triangle height`.
#[derive(Debug, Clone)]
pub struct StampOrigins {
    block: TileBlock,
    col_limit: f64,
    row_limit: f64,
    col: u32,
    row: u32,
}

pub fn stamp_origins(block: TileBlock, tri: &Triangle, width: u32, height: u32) -> StampOrigins {
    StampOrigins {
        block,
        col_limit: f64::from(width) + tri.side(),
        row_limit: f64::from(height) + tri.height(),
        col: 0,
        row: 0,
    }
}

impl Iterator for StampOrigins {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        if self.block.width == 0 || self.block.height == 0 {
            return None;
        }
        let y = self.row * self.block.height;
        if f64::from(y) >= self.row_limit {
            return None;
        }
        let x = self.col * self.block.width;
        if f64::from(x) < self.col_limit {
            self.col += 1;
            return Some((x, y));
        }
        self.col = 0;
        self.row += 1;
        self.next()
    }
}

/// Captures the block at the origin once, then stamps it over the surface.
/// Returns the number of stamps written.
pub fn blit<S: Surface + ?Sized>(surface: &mut S, block: TileBlock, tri: &Triangle) -> Result<usize> {
    let pixels = surface.capture(block.width, block.height)?;
    let (width, height) = surface.size();

    let mut stamps = 0;
    for (x, y) in stamp_origins(block, tri, width, height) {
        surface.stamp(&pixels, f64::from(x), f64::from(y))?;
        stamps += 1;
    }
    log::trace!("stamped {stamps} blocks of {}x{}", block.width, block.height);
    Ok(stamps)
}
