use std::sync::Arc;

use parking_lot::RwLock;
use slidekit_ui::{AnimatedValue, ListenerId, Orientation, PxPosition, PxRect};
use smallvec::SmallVec;
use tracing::warn;

use super::{
    SliderValue,
    mapping::{ValueRange, grid_bounds},
};

/// Default separation between adjacent thumbs in continuous mode, as a
/// fraction of the range span.
pub(super) const DEFAULT_SEPARATION_RATIO: f32 = 0.1;

/// Snapshot of every thumb value, in thumb order.
pub type ThumbValues = SmallVec<[f32; 2]>;

/// Result of resolving a touch against the thumbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbHit {
    /// The touch landed inside this thumb's touch rectangle.
    Thumb(usize),
    /// The touch landed on the track; this is the nearest thumb.
    Track(usize),
    /// The touch does not target any thumb.
    Miss,
}

impl ThumbHit {
    /// The targeted thumb, if any.
    pub fn index(self) -> Option<usize> {
        match self {
            ThumbHit::Thumb(index) | ThumbHit::Track(index) => Some(index),
            ThumbHit::Miss => None,
        }
    }
}

/// Bounds of the highlighted part of the track, in domain units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveRange {
    /// Lower end of the highlighted segment.
    pub min: f32,
    /// Upper end of the highlighted segment.
    pub max: f32,
}

struct ActiveRangeTracker {
    range: ValueRange,
    bounds: ActiveRange,
}

fn compute_bounds(values: &[f32], range: ValueRange) -> ActiveRange {
    match values {
        [single] => ActiveRange {
            min: range.minimum,
            max: *single,
        },
        _ => ActiveRange {
            min: values.iter().copied().fold(f32::INFINITY, f32::min),
            max: values.iter().copied().fold(f32::NEG_INFINITY, f32::max),
        },
    }
}

/// One draggable handle.
pub struct Thumb {
    value: AnimatedValue,
    active: bool,
    listener: ListenerId,
}

impl Thumb {
    /// Current domain value.
    pub fn value(&self) -> f32 {
        self.value.get()
    }

    /// The reactive value backing this thumb.
    pub fn animated_value(&self) -> &AnimatedValue {
        &self.value
    }

    /// Whether a gesture currently targets this thumb.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Ordered thumb values with the non-crossing constraint.
///
/// Thumb values live in [`AnimatedValue`]s so that animated external updates
/// keep the highlighted range current between gestures.
pub struct ThumbModel {
    thumbs: SmallVec<[Thumb; 2]>,
    tracker: Arc<RwLock<ActiveRangeTracker>>,
}

impl ThumbModel {
    /// Builds a model from already-normalized values. `values` must not be
    /// empty.
    pub fn new(values: &[f32], range: ValueRange) -> Self {
        let tracker = Arc::new(RwLock::new(ActiveRangeTracker {
            range,
            bounds: compute_bounds(values, range),
        }));
        let thumbs = Self::bind(values, &tracker);
        Self { thumbs, tracker }
    }

    fn bind(values: &[f32], tracker: &Arc<RwLock<ActiveRangeTracker>>) -> SmallVec<[Thumb; 2]> {
        let handles: SmallVec<[AnimatedValue; 2]> =
            values.iter().copied().map(AnimatedValue::new).collect();

        handles
            .iter()
            .map(|handle| {
                let peers = handles.clone();
                let tracker = Arc::clone(tracker);
                let listener = handle.add_listener(move |_: f32| {
                    let current: ThumbValues = peers.iter().map(AnimatedValue::get).collect();
                    let mut tracker = tracker.write();
                    tracker.bounds = compute_bounds(&current, tracker.range);
                });
                Thumb {
                    value: handle.clone(),
                    active: false,
                    listener,
                }
            })
            .collect()
    }

    fn detach(&mut self) {
        for thumb in &self.thumbs {
            thumb.value.remove_listener(thumb.listener);
        }
    }

    fn refresh_bounds(&self) {
        let current = self.values();
        let mut tracker = self.tracker.write();
        tracker.bounds = compute_bounds(&current, tracker.range);
    }

    /// Discards every thumb and rebuilds the model with `values`.
    ///
    /// Used when the number of thumbs changes.
    pub fn reset(&mut self, values: &[f32]) {
        self.detach();
        self.thumbs = Self::bind(values, &self.tracker);
        self.refresh_bounds();
    }

    /// Switches to a new range, clamping every thumb into it.
    pub fn set_range(&mut self, range: ValueRange) {
        self.tracker.write().range = range;
        for thumb in &self.thumbs {
            thumb.value.set(range.clamp(thumb.value.get()));
        }
        self.refresh_bounds();
    }

    /// The range values are clamped into.
    pub fn range(&self) -> ValueRange {
        self.tracker.read().range
    }

    /// Number of thumbs.
    pub fn len(&self) -> usize {
        self.thumbs.len()
    }

    /// Always `false`; a model holds at least one thumb.
    pub fn is_empty(&self) -> bool {
        self.thumbs.is_empty()
    }

    /// The thumb at `index`.
    pub fn thumb(&self, index: usize) -> Option<&Thumb> {
        self.thumbs.get(index)
    }

    /// Current value of every thumb.
    pub fn values(&self) -> ThumbValues {
        self.thumbs.iter().map(Thumb::value).collect()
    }

    /// Current value of the thumb at `index`.
    pub fn value(&self, index: usize) -> Option<f32> {
        self.thumbs.get(index).map(Thumb::value)
    }

    /// Writes a value without any constraint checks.
    pub fn set_value(&mut self, index: usize, value: f32) {
        if let Some(thumb) = self.thumbs.get(index) {
            thumb.value.set(value);
        }
    }

    /// Marks the thumb at `index` as targeted (or not) by a gesture.
    pub fn set_active(&mut self, index: usize, active: bool) {
        if let Some(thumb) = self.thumbs.get_mut(index) {
            thumb.active = active;
        }
    }

    /// Whether the thumb at `index` is targeted by a gesture.
    pub fn is_active(&self, index: usize) -> bool {
        self.thumbs.get(index).is_some_and(Thumb::is_active)
    }

    /// Limits `candidate` so the thumb at `index` stays `buffer` away from
    /// its neighbors.
    ///
    /// With a non-zero `step` the limits are pulled inward onto the step
    /// grid, so an on-grid candidate stays on the grid even when a neighbor
    /// sits between grid points. When the buffer cannot be honored the thumb
    /// is still kept between its neighbors and inside the range.
    pub fn clamp_against_neighbors(
        &self,
        index: usize,
        candidate: f32,
        buffer: f32,
        step: f32,
    ) -> f32 {
        let range = self.range();
        let previous = index.checked_sub(1).and_then(|i| self.value(i));
        let next = self.value(index + 1);

        let lower = previous.map_or(range.minimum, |p| p.max(range.minimum));
        let upper = next.map_or(range.maximum, |n| n.min(range.maximum));
        let spaced_lower = previous.map_or(lower, |p| (p + buffer).max(lower));
        let spaced_upper = next.map_or(upper, |n| (n - buffer).min(upper));

        let (lower, upper) = grid_bounds(spaced_lower, spaced_upper, range, step)
            .or_else(|| grid_bounds(lower, upper, range, step))
            .unwrap_or((lower, upper));
        candidate.max(lower).min(upper)
    }

    /// Bounds of the highlighted segment.
    ///
    /// With a single thumb the segment starts at the range minimum.
    pub fn active_range_bounds(&self) -> ActiveRange {
        self.tracker.read().bounds
    }

}

impl Drop for ThumbModel {
    fn drop(&mut self) {
        // Listeners hold handles to every thumb; removing them breaks the cycle.
        self.detach();
    }
}

/// Resolves which thumb a touch at `point` targets.
///
/// The first rectangle containing the point wins. Otherwise, when the track
/// is clickable, the thumb whose rectangle is nearest along the track axis is
/// chosen, the lower index winning ties.
pub fn hit_test(
    point: PxPosition,
    touch_rects: &[PxRect],
    orientation: Orientation,
    track_clickable: bool,
) -> ThumbHit {
    if let Some(index) = touch_rects.iter().position(|rect| rect.contains(point)) {
        return ThumbHit::Thumb(index);
    }
    if !track_clickable {
        return ThumbHit::Miss;
    }

    let coord = point.along(orientation);
    let mut nearest: Option<(usize, f32)> = None;
    for (index, rect) in touch_rects.iter().enumerate() {
        let distance = rect.distance_along(orientation, coord);
        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((index, distance));
        }
    }
    nearest.map_or(ThumbHit::Miss, |(index, _)| ThumbHit::Track(index))
}

/// Clamps every supplied value into `range`.
///
/// Non-finite entries are replaced by the value at the same index in
/// `previous`, or by the range minimum when there is none. Order is left
/// untouched.
pub fn normalize_input(value: &SliderValue, range: ValueRange, previous: &[f32]) -> ThumbValues {
    value
        .as_slice()
        .iter()
        .enumerate()
        .map(|(index, &raw)| {
            if raw.is_finite() {
                return range.clamp(raw);
            }
            let fallback = previous
                .get(index)
                .copied()
                .filter(|p| p.is_finite())
                .map_or(range.minimum, |p| range.clamp(p));
            warn!(index, ?raw, fallback, "replacing non-finite slider value");
            fallback
        })
        .collect()
}

/// Minimum distance kept between adjacent thumbs.
pub fn separation_buffer(range: ValueRange, step: f32, separation: Option<f32>) -> f32 {
    separation.unwrap_or(if step > 0.0 {
        step
    } else {
        range.span() * DEFAULT_SEPARATION_RATIO
    })
}
