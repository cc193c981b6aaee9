use slidekit_ui::Px;

use super::SliderError;

/// Fraction of a step added before flooring so that values sitting exactly
/// on a step boundary are not pushed one step down by f32 rounding.
const STEP_EPSILON: f32 = 1e-4;

/// The domain of all thumb values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    /// Lower bound (inclusive).
    pub minimum: f32,
    /// Upper bound (inclusive).
    pub maximum: f32,
}

impl ValueRange {
    /// Creates a range, rejecting non-finite or empty bounds and spans that
    /// overflow `f32`.
    pub fn new(minimum: f32, maximum: f32) -> Result<Self, SliderError> {
        if !minimum.is_finite() {
            return Err(SliderError::NonFinite {
                field: "minimum_value",
                value: minimum,
            });
        }
        if !maximum.is_finite() {
            return Err(SliderError::NonFinite {
                field: "maximum_value",
                value: maximum,
            });
        }
        if maximum <= minimum {
            return Err(SliderError::InvalidRange { minimum, maximum });
        }
        if !(maximum - minimum).is_finite() {
            return Err(SliderError::SpanOverflow { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    /// `maximum - minimum`.
    pub fn span(&self) -> f32 {
        self.maximum - self.minimum
    }

    /// Clamps `value` into the range.
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.minimum).min(self.maximum)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 1.0,
        }
    }
}

/// Position of `value` within `range`, normalized to `[0, 1]`.
pub fn ratio_of(value: f32, range: ValueRange) -> f32 {
    ((value - range.minimum) / range.span()).clamp(0.0, 1.0)
}

/// Pixel offset of a thumb's leading edge for `value`.
///
/// The thumb travels `track_extent - thumb_extent` pixels. Under RTL the
/// ratio is mirrored before scaling. Unmeasured extents yield `Px::ZERO`.
pub fn pixel_offset_of(
    value: f32,
    range: ValueRange,
    track_extent: Px,
    thumb_extent: Px,
    rtl: bool,
) -> Px {
    let travel = track_extent.0 - thumb_extent.0;
    if travel.is_nan() || travel <= 0.0 {
        return Px::ZERO;
    }
    let ratio = ratio_of(value, range);
    let ratio = if rtl { 1.0 - ratio } else { ratio };
    Px(ratio * travel)
}

/// Inverse of [`pixel_offset_of`] for a drag that started at `anchor` and
/// has moved `delta` pixels along the track.
///
/// The result is quantized with [`quantize`] and clamped into `range`.
/// Neighbor constraints are not applied here.
pub fn value_of_pixel_delta(
    anchor: Px,
    delta: Px,
    range: ValueRange,
    track_extent: Px,
    thumb_extent: Px,
    rtl: bool,
    step: f32,
) -> f32 {
    let travel = track_extent.0 - thumb_extent.0;
    if travel.is_nan() || travel <= 0.0 {
        return range.minimum;
    }
    let raw = (anchor.0 + delta.0) / travel;
    let ratio = if rtl { 1.0 - raw } else { raw };
    quantize(range.minimum + ratio * range.span(), range, step)
}

/// Snaps `value` down to the step grid and clamps it into `range`.
///
/// With `step == 0.0` the value is only clamped. Otherwise the result is
/// `minimum + k * step` for the largest `k` with that value not above
/// `value`, limited to the steps that fit inside the range.
pub fn quantize(value: f32, range: ValueRange, step: f32) -> f32 {
    if step <= 0.0 {
        return range.clamp(value);
    }
    let max_steps = (range.span() / step + STEP_EPSILON).floor();
    let steps = ((value - range.minimum) / step + STEP_EPSILON)
        .floor()
        .clamp(0.0, max_steps);
    range.clamp(range.minimum + steps * step)
}

/// Narrows `[lower, upper]` to the step grid points it contains.
///
/// Returns the first grid value at or above `lower` and the last one at or
/// below `upper`, or `None` when no grid value lies between them. With
/// `step == 0.0` the bounds are returned as-is when they are ordered.
pub(super) fn grid_bounds(
    lower: f32,
    upper: f32,
    range: ValueRange,
    step: f32,
) -> Option<(f32, f32)> {
    if step <= 0.0 {
        return (lower <= upper).then_some((lower, upper));
    }
    let max_steps = (range.span() / step + STEP_EPSILON).floor();
    let low = ((lower - range.minimum) / step - STEP_EPSILON).ceil().max(0.0);
    let high = ((upper - range.minimum) / step + STEP_EPSILON)
        .floor()
        .min(max_steps);
    (low <= high).then(|| {
        (
            range.clamp(range.minimum + low * step),
            range.clamp(range.minimum + high * step),
        )
    })
}
