#![cfg(not(target_arch = "wasm32"))]

use kaleido_wasm::blit::{stamp_origins, TileBlock};
use kaleido_wasm::geometry::{contains, Affine, Point, Triangle};
use kaleido_wasm::recording::{FilledTriangle, Op, RecordingSurface};
use kaleido_wasm::{BrushKind, Brushes, FlowState, KaleidoscopeConfig, TickDriver};
use proptest::prelude::*;

const EPS: f64 = 1e-6;

fn running(width: u32, height: u32) -> TickDriver<RecordingSurface> {
    let mut driver = TickDriver::new(
        RecordingSurface::new(width, height),
        &KaleidoscopeConfig::default(),
        Brushes::new(BrushKind::Normal, BrushKind::Reflected),
    )
    .unwrap();
    driver.start().unwrap();
    driver
}

fn shares_edge(a: &[Point; 3], b: &[Point; 3]) -> bool {
    a.iter().filter(|p| b.iter().any(|q| p.approx_eq(*q, EPS))).count() == 2
}

#[test]
fn first_tick_on_page_sized_canvas() {
    let mut driver = running(1000, 600);
    let report = driver.tick().unwrap();

    assert_eq!(report.offset, 1023);
    assert_eq!(report.block, TileBlock { width: 450, height: 259 });

    let stamps: Vec<_> = driver.surface().stamps().collect();
    let mut expected = Vec::new();
    for y in [0.0, 259.0, 518.0] {
        for x in [0.0, 450.0, 900.0] {
            expected.push((x, y));
        }
    }
    assert_eq!(stamps, expected);
    assert_eq!(report.stamps, 9);
}

#[test]
fn fill_counts_per_tick() {
    let mut driver = running(800, 600);
    let report = driver.tick().unwrap();

    assert_eq!(report.plain_row.normal.fills, 4);
    assert_eq!(report.plain_row.mirrored.positions, 5);
    assert_eq!(report.plain_row.mirrored.fills, 5);
    assert_eq!(report.alternate_row.normal.fills, 4);
    assert_eq!(report.alternate_row.mirrored.positions, 5);
    assert_eq!(report.alternate_row.mirrored.fills, 4);

    let surface = driver.surface();
    assert_eq!(surface.fills_with(BrushKind::Normal).count(), 8);
    assert_eq!(surface.fills_with(BrushKind::Reflected).count(), 9);
}

#[test]
fn every_triangle_is_congruent_to_the_first() {
    let mut driver = running(800, 600);
    driver.tick().unwrap();

    let fills = driver.surface().fills();
    let first = fills[0].vertices;
    let side = first[0].distance(first[1]);
    assert!((side - 150.0).abs() < EPS);
    for f in fills {
        let [a, b, c] = f.vertices;
        for d in [a.distance(b), b.distance(c), c.distance(a)] {
            assert!((d - side).abs() < EPS, "{f:?}");
        }
    }
}

#[test]
fn mirrored_triangles_close_the_gaps_of_the_normal_pass() {
    let mut driver = running(800, 600);
    driver.tick().unwrap();

    // plain row: 4 normal fills followed by 5 mirrored fills
    let fills = driver.surface().fills();
    let normal: Vec<_> = fills[..4].iter().map(|f| f.vertices).collect();
    let mirrored = &fills[4..9];
    assert!(mirrored.iter().all(|f| f.brush == BrushKind::Reflected));

    let block_width = 450.0;
    for m in mirrored {
        let cx = m.vertices.iter().map(|p| p.x).sum::<f64>() / 3.0;
        if !(0.0..=block_width).contains(&cx) {
            continue;
        }
        assert!(
            normal.iter().any(|n| shares_edge(n, &m.vertices)),
            "mirrored triangle {m:?} shares no edge with the normal pass"
        );
    }
}

#[test]
fn super_tile_covers_the_captured_block() {
    let mut driver = running(450, 259);
    driver.tick().unwrap();

    let triangles: Vec<[Point; 3]> = driver.surface().fills().iter().map(|f| f.vertices).collect();
    for y in (0..259).step_by(3) {
        for x in (0..450).step_by(3) {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            assert!(
                triangles.iter().any(|t| contains(t, p, EPS)),
                "gap at {p:?}"
            );
        }
    }
}

#[test]
fn geometry_holds_still_while_pattern_flows() {
    let mut driver = running(800, 600);
    driver.tick().unwrap();
    let first: Vec<FilledTriangle> = driver.surface().fills().to_vec();

    let mut driver = running(800, 600);
    for _ in 0..7 {
        driver.tick().unwrap();
    }
    let seventh_start = driver.surface().fills().len() - first.len();
    let seventh = &driver.surface().fills()[seventh_start..];

    for (a, b) in first.iter().zip(seventh) {
        for (p, q) in a.vertices.iter().zip(&b.vertices) {
            assert!(p.approx_eq(*q, EPS));
        }
    }
    // the pattern of the first triangle is anchored at the offset
    assert!(first[0].anchor.approx_eq(Point::new(-75.0, 1023.0), EPS));
    assert!(seventh[0].anchor.approx_eq(Point::new(-75.0, 1017.0), EPS));
}

#[test]
fn ticks_leave_stack_and_frame_unchanged() {
    let mut driver = running(640, 480);
    let before = driver.surface().transform();
    assert_eq!(driver.surface().depth(), 0);

    driver.tick().unwrap();
    driver.tick().unwrap();

    assert_eq!(driver.surface().depth(), 0);
    assert!(driver.surface().transform().approx_eq(&before, 1e-9));
    assert!(before.approx_eq(&Affine::IDENTITY.translate(-75.0, 0.0), 1e-12));
    assert!(driver.surface().max_depth() >= 1);
}

#[test]
fn capture_follows_draws_and_precedes_stamps() {
    let mut driver = running(1200, 900);
    driver.tick().unwrap();

    let ops = driver.surface().ops();
    let capture = ops
        .iter()
        .position(|op| matches!(op, Op::Capture(_)))
        .expect("one capture per tick");
    assert!(ops[..capture].iter().all(|op| matches!(op, Op::Fill(_))));
    assert!(ops[capture + 1..].iter().all(|op| matches!(op, Op::Stamp { .. })));
}

proptest! {
    #[test]
    fn offset_after_n_ticks(n in 0u32..5000) {
        let mut flow = FlowState::new(1024);
        for _ in 0..n {
            flow = flow.advance();
        }
        prop_assert_eq!(flow.offset(), (1024 - n % 1024) % 1024);
        prop_assert!(flow.offset() < 1024);
    }

    #[test]
    fn stamps_cover_any_canvas(width in 0u32..5000, height in 0u32..5000) {
        let tri = Triangle::new(150.0);
        let block = TileBlock::for_triangle(&tri);
        let origins: Vec<_> = stamp_origins(block, &tri, width, height).collect();

        let mut xs: Vec<u32> = origins.iter().map(|o| o.0).collect();
        let mut ys: Vec<u32> = origins.iter().map(|o| o.1).collect();
        xs.sort_unstable();
        xs.dedup();
        ys.sort_unstable();
        ys.dedup();

        prop_assert_eq!(xs[0], 0);
        prop_assert_eq!(ys[0], 0);
        prop_assert!(xs.windows(2).all(|w| w[1] - w[0] == block.width));
        prop_assert!(ys.windows(2).all(|w| w[1] - w[0] == block.height));
        prop_assert!(xs[xs.len() - 1] + block.width >= width);
        prop_assert!(ys[ys.len() - 1] + block.height >= height);
        prop_assert_eq!(origins.len(), xs.len() * ys.len());
    }

    #[test]
    fn block_size_ignores_canvas(width in 1u32..3000, height in 1u32..3000) {
        let mut driver = running(width, height);
        let report = driver.tick().unwrap();
        prop_assert_eq!(report.block, TileBlock { width: 450, height: 259 });
        let captured = driver.surface().ops().iter().filter_map(|op| match op {
            Op::Capture(b) => Some((b.width, b.height)),
            _ => None,
        }).collect::<Vec<_>>();
        prop_assert_eq!(captured, vec![(450, 259)]);
    }
}
