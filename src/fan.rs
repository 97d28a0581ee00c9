//! Fans of pattern-filled triangles around shared vertices.
//!
//! A row of the kaleidoscope is two fans: the normal pass lays down
//! triangles with gaps between them, and the mirrored pass, drawn in a
//! frame flipped by half a turn, fills those gaps with the reflected
//! pattern. Both passes are one operation, [`draw_fan`], parameterized by a
//! [`FanSpec`].

use crate::error::Result;
use crate::geometry::{
    alternate_shift, mirror_entry, turn_about, FrameOp, Pivot, Triangle, FAN_ANGLE,
};
use crate::surface::{BrushKind, Brushes, Saved, Surface};

/// How a pass moves from the caller's frame into its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// Shift down by the scroll offset.
    Lift,
    /// Flip both axes, then line up with the end of the preceding normal pass.
    Mirror,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanSpec {
    pub brush: BrushKind,
    pub entry: Entry,
    /// Vertex to turn around after position `k`, indexed by `k % 3`.
    pub pivots: [Pivot; 3],
    /// Cycle slot that takes the alternate-row shift before its turn.
    pub alternate_shift_slot: Option<usize>,
    /// Leave the first position unfilled in alternate mode. Its frame
    /// steps still run.
    pub skip_first_on_alternate: bool,
}

/// Pass A.
pub const NORMAL_FAN: FanSpec = FanSpec {
    brush: BrushKind::Normal,
    entry: Entry::Lift,
    pivots: [Pivot::Right, Pivot::Apex, Pivot::Left],
    alternate_shift_slot: Some(1),
    skip_first_on_alternate: false,
};

/// Pass B.
pub const MIRRORED_FAN: FanSpec = FanSpec {
    brush: BrushKind::Reflected,
    entry: Entry::Mirror,
    pivots: [Pivot::Left, Pivot::Right, Pivot::Apex],
    alternate_shift_slot: None,
    skip_first_on_alternate: true,
};

/// Triangles in the normal pass.
pub const NORMAL_POSITIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FanStats {
    /// Positions the frame walked through.
    pub positions: usize,
    /// Triangles actually filled.
    pub fills: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowStats {
    pub normal: FanStats,
    pub mirrored: FanStats,
}

impl FanSpec {
    /// Frame operations applied after filling position `k`.
    pub fn step_ops(&self, k: usize, tri: &Triangle, offset: f64, alternate: bool) -> Vec<FrameOp> {
        let slot = k % 3;
        let mut ops = Vec::with_capacity(6);
        if alternate && self.alternate_shift_slot == Some(slot) {
            ops.extend(alternate_shift(tri));
        }
        ops.extend(turn_about(tri, self.pivots[slot], offset, -FAN_ANGLE));
        ops
    }

    /// Frame operations run before the first position. `lead` is the number
    /// of positions visited by the preceding normal pass.
    pub fn entry_ops(&self, tri: &Triangle, offset: f64, lead: usize) -> Vec<FrameOp> {
        match self.entry {
            Entry::Lift => vec![FrameOp::Translate(0.0, offset)],
            Entry::Mirror => mirror_entry(tri, lead, offset).to_vec(),
        }
    }

    pub fn fills_position(&self, k: usize, alternate: bool) -> bool {
        !(k == 0 && alternate && self.skip_first_on_alternate)
    }
}

/// Draws `positions` triangles of one fan in the current frame. The caller
/// owns the save/restore bracket.
#[allow(clippy::too_many_arguments)]
pub fn draw_fan<S: Surface + ?Sized>(
    surface: &mut S,
    brush: &S::Brush,
    spec: &FanSpec,
    tri: &Triangle,
    offset: f64,
    alternate: bool,
    positions: usize,
    lead: usize,
) -> Result<FanStats> {
    surface.set_brush(brush);
    surface.apply_all(&spec.entry_ops(tri, offset, lead))?;

    let vertices = tri.vertices(offset);
    let mut stats = FanStats { positions, fills: 0 };
    for k in 0..positions {
        if spec.fills_position(k, alternate) {
            surface.fill_triangle(&vertices);
            stats.fills += 1;
        }
        surface.apply_all(&spec.step_ops(k, tri, offset, alternate))?;
    }
    Ok(stats)
}

/// One kaleidoscope row: the normal pass, then the mirrored pass with one
/// more position than the normal pass visited. Each pass runs in its own
/// save/restore bracket, so the caller's frame is untouched.
pub fn draw_row<S: Surface + ?Sized>(
    surface: &mut S,
    brushes: &Brushes<S::Brush>,
    tri: &Triangle,
    offset: f64,
    alternate: bool,
) -> Result<RowStats> {
    let normal = {
        let mut s = Saved::new(surface);
        draw_fan(
            &mut *s,
            brushes.get(NORMAL_FAN.brush),
            &NORMAL_FAN,
            tri,
            offset,
            alternate,
            NORMAL_POSITIONS,
            0,
        )?
    };

    let mirrored = {
        let mut s = Saved::new(surface);
        draw_fan(
            &mut *s,
            brushes.get(MIRRORED_FAN.brush),
            &MIRRORED_FAN,
            tri,
            offset,
            alternate,
            normal.positions + 1,
            normal.positions,
        )?
    };

    log::trace!(
        "row alternate={alternate} offset={offset}: {} normal, {} mirrored fills",
        normal.fills,
        mirrored.fills
    );
    Ok(RowStats { normal, mirrored })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::recording::RecordingSurface;

    const EPS: f64 = 1e-6;

    fn brushes() -> Brushes<BrushKind> {
        Brushes::new(BrushKind::Normal, BrushKind::Reflected)
    }

    #[test]
    fn plain_row_counts() {
        let mut surface = RecordingSurface::new(600, 400);
        let stats = draw_row(&mut surface, &brushes(), &Triangle::new(150.0), 3.0, false).unwrap();
        assert_eq!(stats.normal, FanStats { positions: 4, fills: 4 });
        assert_eq!(stats.mirrored, FanStats { positions: 5, fills: 5 });
        assert_eq!(surface.fills_with(BrushKind::Normal).count(), 4);
        assert_eq!(surface.fills_with(BrushKind::Reflected).count(), 5);
    }

    #[test]
    fn alternate_row_skips_first_mirrored_fill() {
        let mut surface = RecordingSurface::new(600, 400);
        let stats = draw_row(&mut surface, &brushes(), &Triangle::new(150.0), 3.0, true).unwrap();
        assert_eq!(stats.normal.fills, 4);
        assert_eq!(stats.mirrored, FanStats { positions: 5, fills: 4 });
    }

    #[test]
    fn skipping_keeps_later_triangles_in_place() {
        let tri = Triangle::new(150.0);
        let mut plain = RecordingSurface::new(600, 400);
        let mut skip = RecordingSurface::new(600, 400);
        let run = |s: &mut RecordingSurface, alternate: bool| {
            draw_fan(s, &BrushKind::Reflected, &MIRRORED_FAN, &tri, 9.0, alternate, 5, 4).unwrap()
        };
        run(&mut plain, false);
        run(&mut skip, true);

        let plain: Vec<_> = plain.fills().iter().skip(1).map(|f| f.vertices).collect();
        let skip: Vec<_> = skip.fills().iter().map(|f| f.vertices).collect();
        assert_eq!(plain.len(), skip.len());
        for (a, b) in plain.iter().zip(&skip) {
            for (p, q) in a.iter().zip(b) {
                assert!(p.approx_eq(*q, EPS));
            }
        }
    }

    #[test]
    fn normal_pass_neighbours_share_pivot_vertex() {
        let mut surface = RecordingSurface::new(600, 400);
        draw_row(&mut surface, &brushes(), &Triangle::new(150.0), 0.0, false).unwrap();
        let normal: Vec<[Point; 3]> =
            surface.fills_with(BrushKind::Normal).map(|f| f.vertices).collect();
        for pair in normal.windows(2) {
            let shared = pair[0]
                .iter()
                .filter(|p| pair[1].iter().any(|q| p.approx_eq(*q, EPS)))
                .count();
            assert_eq!(shared, 1, "{pair:?}");
        }
    }

    #[test]
    fn step_ops_include_shift_only_in_alternate_slot() {
        let tri = Triangle::new(150.0);
        assert_eq!(NORMAL_FAN.step_ops(1, &tri, 0.0, false).len(), 3);
        assert_eq!(NORMAL_FAN.step_ops(1, &tri, 0.0, true).len(), 6);
        assert_eq!(NORMAL_FAN.step_ops(4, &tri, 0.0, true).len(), 6);
        assert_eq!(NORMAL_FAN.step_ops(2, &tri, 0.0, true).len(), 3);
        assert_eq!(MIRRORED_FAN.step_ops(1, &tri, 0.0, true).len(), 3);
    }
}
