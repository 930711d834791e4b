mod common;

use common::{rng, Op, RecordingSurface};
use glam::DVec2;
use lava_wasm::blob::FALLOFF;
use lava_wasm::surface::{BlendMode, Paint};
use lava_wasm::{Blob, BlobKind, BoundaryPolicy, Viewport};

const EPS: f64 = 1e-9;

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0)
}

/// A blob parked at `position` with no motion and its radius at base.
fn parked(kind: BlobKind, position: DVec2) -> Blob {
    let mut blob = Blob::spawn(kind, viewport(), &mut rng(3));
    blob.position = position;
    blob.velocity = DVec2::ZERO;
    blob.radius = blob.base_radius;
    blob
}

#[test]
fn seeded_spawn_is_reproducible() {
    for kind in [BlobKind::Base, BlobKind::Highlight] {
        let a = Blob::spawn(kind, viewport(), &mut rng(42));
        let b = Blob::spawn(kind, viewport(), &mut rng(42));
        assert_eq!(a, b);
    }
}

#[test]
fn spawn_respects_kind_tables() {
    let vp = viewport();
    let mut r = rng(11);
    for _ in 0..500 {
        for kind in [BlobKind::Base, BlobKind::Highlight] {
            let blob = Blob::spawn(kind, vp, &mut r);
            let params = kind.params();
            assert!(vp.contains(blob.position), "{:?}", blob.position);
            assert!(blob.base_radius >= params.radius.0 * vp.min_extent() - EPS);
            assert!(blob.base_radius <= params.radius.1 * vp.min_extent() + EPS);
            assert!(blob.velocity.x.abs() <= params.drift.x + EPS);
            assert!(blob.velocity.y.abs() <= params.drift.y + EPS);
            assert!(blob.speed() <= kind.max_speed());
            assert!((0.0..=1.0).contains(&blob.opacity()));
        }
    }
}

#[test]
fn highlights_are_smaller_and_faster_than_base() {
    let base = BlobKind::Base.params();
    let highlight = BlobKind::Highlight.params();
    assert!(highlight.radius.1 <= base.radius.0);
    assert!(highlight.drift.length() > base.drift.length());
    assert!(highlight.max_speed > base.max_speed);
    assert_eq!(BlobKind::Base.blend(), BlendMode::SourceOver);
    assert_eq!(BlobKind::Highlight.blend(), BlendMode::Overlay);
}

#[test]
fn tiny_viewport_still_gives_positive_radius() {
    let vp = Viewport::new(0.0, 0.0);
    let blob = Blob::spawn(BlobKind::Highlight, vp, &mut rng(5));
    assert!(blob.radius > 0.0);
    assert!(vp.contains(blob.position));
}

#[test]
fn radius_stays_positive_and_near_base() {
    let vp = viewport();
    let mut r = rng(9);
    for policy in [BoundaryPolicy::SoftBounce, BoundaryPolicy::Wrap] {
        let mut blobs: Vec<Blob> = (0..20)
            .map(|i| {
                let kind = if i % 3 == 0 { BlobKind::Highlight } else { BlobKind::Base };
                Blob::spawn(kind, vp, &mut r)
            })
            .collect();
        for clock in 1..=5_000 {
            for blob in &mut blobs {
                blob.update(clock, vp, policy, &mut r);
                assert!(blob.radius > 0.0);
                assert!((blob.radius - blob.base_radius).abs() <= blob.amplitude() + EPS);
            }
        }
    }
}

#[test]
fn update_clamps_speed() {
    for kind in [BlobKind::Base, BlobKind::Highlight] {
        for policy in [BoundaryPolicy::SoftBounce, BoundaryPolicy::Wrap] {
            let mut blob = parked(kind, DVec2::new(400.0, 300.0));
            blob.velocity = DVec2::new(50.0, -50.0);
            blob.update(1, viewport(), policy, &mut rng(1));
            assert!(blob.speed() <= kind.max_speed() + EPS, "{}", blob.speed());
        }
    }
}

#[test]
fn calm_blob_keeps_its_velocity() {
    let mut blob = parked(BlobKind::Base, DVec2::new(400.0, 300.0));
    blob.velocity = DVec2::new(0.2, -0.1);
    blob.update(1, viewport(), BoundaryPolicy::SoftBounce, &mut rng(1));
    assert_eq!(blob.velocity, DVec2::new(0.2, -0.1));
    assert!((blob.position - DVec2::new(400.2, 299.9)).length() < EPS);
}

#[test]
fn fast_blob_slows_back_towards_cruise() {
    let mut blob = parked(BlobKind::Base, DVec2::new(400.0, 300.0));
    let cruise = BlobKind::Base.params().drift.length();
    blob.velocity = DVec2::new(1.0, 0.0);
    let mut r = rng(1);
    for clock in 1..=500 {
        blob.update(clock, viewport(), BoundaryPolicy::SoftBounce, &mut r);
        blob.position = DVec2::new(400.0, 300.0);
    }
    assert!((blob.speed() - cruise).abs() < 1e-6);
}

/// Where a wrapped blob re-enters: just outside the edge at its largest radius.
fn entry(blob: &Blob) -> f64 {
    blob.base_radius + blob.amplitude()
}

#[test]
fn wrap_moves_blob_below_viewport_to_top() {
    let vp = viewport();
    let mut blob = parked(BlobKind::Base, DVec2::ZERO);
    blob.position = DVec2::new(120.0, vp.height + 2.0 * blob.base_radius);
    blob.velocity = DVec2::new(0.0, 0.1);
    blob.update(1, vp, BoundaryPolicy::Wrap, &mut rng(2));
    assert_eq!(blob.position.y, -entry(&blob));
    assert!((0.0..vp.width).contains(&blob.position.x));
}

#[test]
fn wrap_moves_blob_above_viewport_to_bottom() {
    let vp = viewport();
    let mut blob = parked(BlobKind::Highlight, DVec2::ZERO);
    blob.position = DVec2::new(500.0, -2.0 * blob.base_radius);
    blob.velocity = DVec2::new(0.0, -0.1);
    blob.update(1, vp, BoundaryPolicy::Wrap, &mut rng(2));
    assert_eq!(blob.position.y, vp.height + entry(&blob));
    assert!((0.0..vp.width).contains(&blob.position.x));
}

#[test]
fn wrap_moves_blob_left_of_viewport_to_right() {
    let vp = viewport();
    let mut blob = parked(BlobKind::Base, DVec2::ZERO);
    blob.position = DVec2::new(-2.0 * blob.base_radius, 300.0);
    blob.velocity = DVec2::new(-0.1, 0.0);
    blob.update(1, vp, BoundaryPolicy::Wrap, &mut rng(4));
    assert_eq!(blob.position.x, vp.width + entry(&blob));
    assert!((0.0..vp.height).contains(&blob.position.y));
}

#[test]
fn wrap_moves_blob_right_of_viewport_to_left() {
    let vp = viewport();
    let mut blob = parked(BlobKind::Highlight, DVec2::ZERO);
    blob.position = DVec2::new(vp.width + 2.0 * blob.base_radius, 300.0);
    blob.velocity = DVec2::new(0.1, 0.0);
    blob.update(1, vp, BoundaryPolicy::Wrap, &mut rng(4));
    assert_eq!(blob.position.x, -entry(&blob));
    assert!((0.0..vp.height).contains(&blob.position.y));
}

#[test]
fn wrap_ignores_blob_heading_back_inward() {
    let vp = viewport();
    let mut blob = parked(BlobKind::Base, DVec2::ZERO);
    let start = DVec2::new(120.0, vp.height + 2.0 * blob.base_radius);
    blob.position = start;
    blob.velocity = DVec2::new(0.0, -0.1);
    blob.update(1, vp, BoundaryPolicy::Wrap, &mut rng(2));
    assert!((blob.position - (start + blob.velocity)).length() < EPS);
}

#[test]
fn shrinking_pulse_does_not_bounce_a_wrapped_blob_back() {
    let vp = viewport();
    let mut blob = parked(BlobKind::Base, DVec2::ZERO);
    blob.position = DVec2::new(400.0, vp.height + 1.5 * blob.base_radius);
    blob.velocity = DVec2::new(0.0, 0.05);
    blob.pulse_speed = 0.03;
    blob.phase = std::f64::consts::FRAC_PI_2;

    let mut r = rng(12);
    let mut wraps = 0;
    for clock in 1..=40 {
        let before = blob.position;
        blob.update(clock, vp, BoundaryPolicy::Wrap, &mut r);
        if (blob.position.y - before.y).abs() > vp.height / 2.0 {
            wraps += 1;
        }
    }
    assert_eq!(wraps, 1, "ended at {:?}", blob.position);
}

#[test]
fn wrapped_blobs_cross_the_viewport_before_wrapping_again() {
    let vp = Viewport::new(200.0, 150.0);
    let mut r = rng(13);
    let mut blobs: Vec<Blob> = (0..24)
        .map(|i| {
            let kind = if i % 2 == 0 { BlobKind::Highlight } else { BlobKind::Base };
            Blob::spawn(kind, vp, &mut r)
        })
        .collect();
    // Per blob and axis: whether the center has been inside since the last wrap.
    let mut crossed = vec![[true, true]; blobs.len()];

    for clock in 1..=5_000 {
        for (blob, crossed) in blobs.iter_mut().zip(&mut crossed) {
            blob.update(clock, vp, BoundaryPolicy::Wrap, &mut r);
            let edge = entry(blob);
            let landed = [
                (blob.position.x, vp.width),
                (blob.position.y, vp.height),
            ]
            .map(|(v, extent)| v == -edge || v == extent + edge);
            for axis in 0..2 {
                if landed[axis] {
                    assert!(crossed[axis], "blob wrapped twice on axis {axis} at clock {clock}");
                    crossed[axis] = false;
                }
            }
            if (0.0..vp.width).contains(&blob.position.x) {
                crossed[0] = true;
            }
            if (0.0..vp.height).contains(&blob.position.y) {
                crossed[1] = true;
            }
        }
    }
}

#[test]
fn wrap_leaves_partially_visible_blob_alone() {
    let vp = viewport();
    let mut blob = parked(BlobKind::Base, DVec2::new(-1.0, 300.0));
    blob.update(1, vp, BoundaryPolicy::Wrap, &mut rng(4));
    assert_eq!(blob.position, DVec2::new(-1.0, 300.0));
}

#[test]
fn soft_bounce_steers_back_inward() {
    let vp = viewport();
    let cases = [
        (DVec2::new(-1.0, 0.0), DVec2::new(-0.3, 0.0)),
        (DVec2::new(1.0, 0.0), DVec2::new(0.3, 0.0)),
        (DVec2::new(0.0, -1.0), DVec2::new(0.0, -0.3)),
        (DVec2::new(0.0, 1.0), DVec2::new(0.0, 0.3)),
    ];
    for (outward, velocity) in cases {
        let mut blob = parked(BlobKind::Base, DVec2::ZERO);
        let center = vp.extent() / 2.0;
        blob.position = center + outward * (center + DVec2::splat(2.0 * blob.base_radius));
        blob.velocity = velocity;
        let before = blob.velocity.dot(outward);

        blob.update(1, vp, BoundaryPolicy::SoftBounce, &mut rng(6));

        let after = blob.velocity.dot(outward);
        assert!(after < before, "{outward:?}: {before} -> {after}");
        assert!(blob.speed() <= BlobKind::Base.max_speed() + EPS);
    }
}

#[test]
fn soft_bounce_ignores_blob_within_margin() {
    let vp = viewport();
    let mut blob = parked(BlobKind::Base, DVec2::ZERO);
    blob.position = DVec2::new(-0.25 * blob.radius, 300.0);
    blob.velocity = DVec2::new(-0.1, 0.0);
    blob.update(1, vp, BoundaryPolicy::SoftBounce, &mut rng(6));
    assert_eq!(blob.velocity, DVec2::new(-0.1, 0.0));
}

#[test]
fn draw_uses_soft_gradient_and_restores_blend() {
    let blob = Blob::spawn(BlobKind::Highlight, viewport(), &mut rng(8));
    let mut surface = RecordingSurface::new(800, 600);
    blob.draw(&mut surface, BlendMode::Overlay).unwrap();

    assert_eq!(surface.ops.len(), 3);
    assert_eq!(surface.ops[0], Op::Blend(BlendMode::Overlay));
    assert_eq!(surface.ops[2], Op::Blend(BlendMode::SourceOver));
    let Op::FillCircle {
        center,
        radius,
        paint,
        blend,
        ..
    } = &surface.ops[1]
    else {
        panic!("expected a circle, got {:?}", surface.ops[1]);
    };
    assert_eq!(*center, blob.position);
    assert_eq!(*radius, blob.radius);
    assert_eq!(*blend, BlendMode::Overlay);

    let Paint::Radial { stops, radius: outer, .. } = paint else {
        panic!("expected radial paint");
    };
    assert_eq!(*outer, blob.radius);
    assert_eq!(stops.len(), FALLOFF.len());
    assert!(stops.len() >= 3);
    assert_eq!(stops[0].offset, 0.0);
    assert_eq!(stops[0].color.a, blob.opacity());
    let last = stops.last().unwrap();
    assert_eq!(last.offset, 1.0);
    assert_eq!(last.color.a, 0.0);
    for pair in stops.windows(2) {
        assert!(pair[0].offset < pair[1].offset);
        assert!(pair[0].color.a > pair[1].color.a);
        assert_eq!(
            (pair[0].color.r, pair[0].color.g, pair[0].color.b),
            (pair[1].color.r, pair[1].color.g, pair[1].color.b)
        );
    }
}
