//! Property-based invariant tests for the slider engine.
//!
//! 1. Offset then drag-by-zero recovers the value (LTR and RTL).
//! 2. RTL offsets mirror LTR offsets over the travel distance.
//! 3. Every drag-produced value sits on the step grid, even next to
//!    off-grid neighbors.
//! 4. Thumbs never cross, whatever the drag sequence.
//! 5. The highlighted range always spans the thumb values.
//! 6. A disabled slider never reports changes or moves, and every gesture
//!    on it still closes.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use proptest::prelude::*;
use slidekit_components::slider::{
    GesturePhase, LayoutTarget, Slider, SliderArgs, SliderValue, TouchId, ValueRange,
    pixel_offset_of, value_of_pixel_delta,
};
use slidekit_ui::{Px, PxPosition, PxSize};

// ── Helpers ─────────────────────────────────────────────────────────────

const TRACK: f32 = 300.0;
const THUMB: f32 = 20.0;

fn measured(args: SliderArgs) -> Slider {
    let mut slider = Slider::new(args).expect("valid args");
    slider.record_layout(LayoutTarget::Container, PxSize::new(Px(TRACK), Px(40.0)));
    slider.record_layout(LayoutTarget::Track, PxSize::new(Px(TRACK), Px(4.0)));
    slider.record_layout(LayoutTarget::Thumb, PxSize::new(Px(THUMB), Px(THUMB)));
    slider
}

/// Touch point at the center of thumb `index`'s touch target.
fn thumb_center(slider: &Slider, index: usize) -> PxPosition {
    let layout = slider.render_layout();
    let rect = layout.touch_rects[index];
    PxPosition::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

/// One drag: which thumb to grab and the cumulative moves applied to it.
fn drags(max_thumb: usize) -> impl Strategy<Value = Vec<(usize, Vec<f32>)>> {
    proptest::collection::vec(
        (
            0..max_thumb,
            proptest::collection::vec(-400.0f32..400.0, 1..6),
        ),
        1..12,
    )
}

/// Runs each drag to completion. `check` sees the slider and the index of
/// the grabbed thumb after every move and after the release.
fn run_drags(
    slider: &mut Slider,
    drags: &[(usize, Vec<f32>)],
    mut check: impl FnMut(&Slider, usize),
) {
    for (touch, (thumb, moves)) in drags.iter().enumerate() {
        let thumb = thumb % slider.values().len();
        let touch = TouchId(touch as u64);
        let point = thumb_center(slider, thumb);
        if !slider.start(touch, point) {
            continue;
        }
        let grabbed = (0..slider.values().len())
            .find(|index| slider.is_thumb_active(*index))
            .unwrap_or(thumb);
        for dx in moves {
            slider.move_by(touch, Px(*dx), Px::ZERO);
            check(slider, grabbed);
        }
        let last = moves.last().copied().unwrap_or_default();
        slider.end(touch, Px(last), Px::ZERO);
        check(slider, grabbed);
    }
}

/// A step over `[0, 10]`, not always dividing the span, and `len` sorted
/// values that mostly sit off its grid.
fn step_and_values(len: usize) -> impl Strategy<Value = (f32, Vec<f32>)> {
    (
        prop::sample::select(vec![0.25f32, 0.3, 0.5, 0.7, 1.5, 2.0]),
        proptest::collection::vec(
            prop_oneof![Just(0.0f32), Just(10.0f32), 0.0f32..=10.0],
            len,
        ),
    )
        .prop_map(|(step, mut values)| {
            values.sort_by(f32::total_cmp);
            (step, values)
        })
}

fn on_grid(value: f32, step: f32) -> bool {
    let k = value / step;
    (k - k.round()).abs() <= 1e-3
}

/// Whether any grid point lies between the neighbors of thumb `index`.
fn grid_fits_between_neighbors(values: &[f32], index: usize, step: f32) -> bool {
    let lower = index.checked_sub(1).map_or(0.0, |i| values[i]);
    let upper = values.get(index + 1).copied().unwrap_or(10.0).min(10.0);
    (lower / step).ceil() <= (upper / step).floor()
}

// ── Mapping ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn offset_round_trips(
        minimum in -1000.0f32..1000.0,
        span in 0.5f32..1000.0,
        ratio in 0.0f32..=1.0,
        track in 60.0f32..1200.0,
        thumb in 0.0f32..40.0,
        rtl in any::<bool>(),
    ) {
        let range = ValueRange::new(minimum, minimum + span).expect("valid range");
        let value = range.clamp(minimum + ratio * span);
        let offset = pixel_offset_of(value, range, Px(track), Px(thumb), rtl);
        let back = value_of_pixel_delta(offset, Px::ZERO, range, Px(track), Px(thumb), rtl, 0.0);
        let scale = span + minimum.abs().max((minimum + span).abs());
        prop_assert!((back - value).abs() <= scale * 1e-4, "{value} -> {offset:?} -> {back}");
    }

    #[test]
    fn rtl_mirrors_ltr(
        ratio in 0.0f32..=1.0,
        track in 60.0f32..1200.0,
        thumb in 0.0f32..40.0,
    ) {
        let range = ValueRange::default();
        let travel = track - thumb;
        let ltr = pixel_offset_of(ratio, range, Px(track), Px(thumb), false);
        let rtl = pixel_offset_of(ratio, range, Px(track), Px(thumb), true);
        prop_assert!((ltr.0 + rtl.0 - travel).abs() <= travel * 1e-5);

        let rtl_min = pixel_offset_of(range.minimum, range, Px(track), Px(thumb), true);
        let ltr_max = pixel_offset_of(range.maximum, range, Px(track), Px(thumb), false);
        prop_assert_eq!(rtl_min, ltr_max);
    }
}

// ── Gestures ────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn drag_values_stay_on_step_grid(
        (step, initial) in step_and_values(3),
        drags in drags(3),
    ) {
        let mut slider = measured(
            SliderArgs::default()
                .maximum_value(10.0)
                .step(step)
                .value(SliderValue::Vector(initial)),
        );
        let mut off_grid = Vec::new();
        run_drags(&mut slider, &drags, |slider, grabbed| {
            let values = slider.values();
            let value = values[grabbed];
            if grid_fits_between_neighbors(&values, grabbed, step) && !on_grid(value, step) {
                off_grid.push((grabbed, value));
            }
        });
        prop_assert!(off_grid.is_empty(), "off-grid values: {off_grid:?}");
    }

    #[test]
    fn thumbs_never_cross(
        count in 2usize..5,
        raw in proptest::collection::vec(0.0f32..=1.0, 5),
        drags in drags(5),
    ) {
        let mut initial: Vec<f32> = raw.into_iter().take(count).collect();
        initial.sort_by(f32::total_cmp);
        let mut slider = measured(SliderArgs::default().value(SliderValue::Vector(initial)));

        let mut crossed = false;
        let mut range_mismatch = false;
        run_drags(&mut slider, &drags, |slider, _| {
            let values = slider.values();
            if values.windows(2).any(|pair| pair[0] > pair[1]) {
                crossed = true;
            }
            let min = values.iter().copied().fold(f32::INFINITY, f32::min);
            let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            let bounds = slider.active_range();
            if bounds.min != min || bounds.max != max {
                range_mismatch = true;
            }
        });
        prop_assert!(!crossed, "thumbs crossed: {:?}", slider.values());
        prop_assert!(!range_mismatch);
    }

    #[test]
    fn disabled_slider_stays_silent(
        initial in proptest::collection::vec(0.0f32..=1.0, 1..4),
        drags in drags(4),
    ) {
        let mut initial = initial;
        initial.sort_by(f32::total_cmp);
        let notifications = Arc::new(AtomicUsize::new(0));
        let (change, complete) = (notifications.clone(), notifications.clone());
        let args = SliderArgs::default()
            .value(SliderValue::Vector(initial))
            .track_clickable(true)
            .disabled(true)
            .on_value_change(move |_| {
                change.fetch_add(1, Ordering::SeqCst);
            })
            .on_sliding_complete(move |_| {
                complete.fetch_add(1, Ordering::SeqCst);
            });
        let mut slider = measured(args);
        let before = slider.values();

        run_drags(&mut slider, &drags, |_, _| {});
        prop_assert_eq!(notifications.load(Ordering::SeqCst), 0);
        prop_assert_eq!(slider.values(), before);
        prop_assert_eq!(slider.phase(), GesturePhase::Idle);
    }
}
