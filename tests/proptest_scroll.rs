//! Property-based invariant tests for the scroll-driven effects.
//!
//! Verifies:
//! 1. Adjusted progress is always inside `[0, 1]`, whatever the raw progress.
//! 2. Adjusted progress never decreases as progress grows.
//! 3. Element offsets shrink to zero as elements are revealed.
//! 4. Container progress is clamped and monotonic in scroll position.
//! 5. Disintegration particles stay on their origin inside the dead zone.
//! 6. Disintegration displacement never exceeds the particle's maximum.
//! 7. Carousel slots: exactly one active slide for any ring.

use glam::Vec2;
use glasscape::carousel::slot_transform;
use glasscape::config::DisintegrationConfig;
use glasscape::disintegration::DisintegrationField;
use glasscape::scroll::{
    adjusted_progress, container_progress, Container, Direction, ScrollAnimated, Viewport,
};
use image::RgbaImage;
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn arb_element() -> impl Strategy<Value = ScrollAnimated> {
    (arb_direction(), 0.0f32..500.0, 0.0f32..1.0)
        .prop_map(|(direction, intensity, delay)| ScrollAnimated::new(direction, intensity, delay))
}

fn small_field(seed: u64) -> DisintegrationField {
    let image = RgbaImage::from_pixel(24, 24, image::Rgba([255, 255, 255, 255]));
    let config = DisintegrationConfig::default()
        .with_canvas_size(24, 24)
        .with_seed(seed);
    DisintegrationField::from_image(&image, config).unwrap_or_default()
}

// ── Scroll transforms ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn adjusted_progress_is_clamped(progress in -10.0f32..10.0, delay in 0.0f32..1.0) {
        let adjusted = adjusted_progress(progress, delay);
        prop_assert!((0.0..=1.0).contains(&adjusted));
    }

    #[test]
    fn adjusted_progress_is_monotonic(
        a in -1.0f32..2.0,
        b in -1.0f32..2.0,
        delay in 0.0f32..1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(adjusted_progress(lo, delay) <= adjusted_progress(hi, delay));
    }

    #[test]
    fn offset_shrinks_as_element_reveals(
        element in arb_element(),
        a in 0.0f32..1.0,
        b in 0.0f32..1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let early = element.transform(lo);
        let late = element.transform(hi);
        prop_assert!(late.translate.length() <= early.translate.length() + 1e-3);
        prop_assert!(late.opacity >= early.opacity);
    }

    #[test]
    fn fully_revealed_elements_rest_in_place(element in arb_element()) {
        // Past delay + 1 / 1.5 every element is fully revealed.
        let t = element.transform(2.0);
        prop_assert_eq!(t.opacity, 1.0);
        prop_assert_eq!(t.translate, Vec2::ZERO);
    }

    #[test]
    fn container_progress_is_clamped_and_monotonic(
        top in 0.0f32..5000.0,
        height in 1.0f32..2000.0,
        viewport_height in 1.0f32..1500.0,
        a in -2000.0f32..8000.0,
        b in -2000.0f32..8000.0,
    ) {
        let container = Container::new(top, height);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = container_progress(Viewport { scroll_y: lo, height: viewport_height }, container);
        let p_hi = container_progress(Viewport { scroll_y: hi, height: viewport_height }, container);
        prop_assert!((0.0..=1.0).contains(&p_lo));
        prop_assert!((0.0..=1.0).contains(&p_hi));
        prop_assert!(p_lo <= p_hi);
    }
}

// ── Disintegration ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn dead_zone_keeps_particles_home(seed in any::<u64>(), progress in -5.0f32..=0.2) {
        let mut field = small_field(seed);
        field.tick(0.9);
        field.tick(progress);
        for p in field.particles() {
            prop_assert_eq!(p.position, p.origin());
        }
    }

    #[test]
    fn displacement_is_bounded(seed in any::<u64>(), progress in -1.0f32..3.0) {
        let mut field = small_field(seed);
        field.tick(progress);
        for p in field.particles() {
            let moved = p.position.distance(p.origin());
            prop_assert!(moved <= p.max_distance() + 1e-3);
            prop_assert!(p.size >= 0.0);
        }
    }
}

// ── Carousel ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn exactly_one_active_slide(len in 1usize..12, active in 0usize..12) {
        let active = active % len;
        let front = (0..len)
            .filter(|&i| slot_transform(i, active, len).z_index == 10)
            .count();
        prop_assert_eq!(front, 1);
    }
}
