//! A touch slider with one or more thumbs on a linear track.
//!
//! ## Usage
//!
//! Build a [`Slider`] from [`SliderArgs`], report the measured container,
//! track and thumb sizes with [`Slider::record_layout`], then forward touch
//! samples through [`Slider::start`], [`Slider::move_by`] and
//! [`Slider::end`]. Passing a vector value creates one thumb per entry;
//! thumbs never cross each other.
use std::sync::Arc;

use derive_setters::Setters;
use slidekit_ui::{
    AnimatedValue, AnimationConfig, AnimationType, Animator, CallbackWith, ImmediateAnimator,
    Orientation, Px, PxPosition, PxSize,
};
use thiserror::Error;
use tracing::{debug, trace, warn};

use interaction::GestureContext;

pub use interaction::{GestureController, GesturePhase, GestureSession, TouchId};
pub use layout::{
    DEFAULT_THUMB_TOUCH_SIZE, LayoutCache, LayoutMetrics, LayoutTarget, SliderGeometry,
    SliderRenderLayout, TrackSegment,
};
pub use mapping::{ValueRange, pixel_offset_of, quantize, ratio_of, value_of_pixel_delta};
pub use thumbs::{
    ActiveRange, Thumb, ThumbHit, ThumbModel, ThumbValues, hit_test, normalize_input,
    separation_buffer,
};

mod interaction;
mod layout;
mod mapping;
mod thumbs;

/// Configuration errors reported by [`Slider::new`] and
/// [`Slider::update_args`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliderError {
    /// `maximum_value` is not greater than `minimum_value`.
    #[error("maximum_value ({maximum}) must be greater than minimum_value ({minimum})")]
    InvalidRange {
        /// The configured minimum.
        minimum: f32,
        /// The configured maximum.
        maximum: f32,
    },
    /// A numeric setting is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// `maximum_value - minimum_value` does not fit in an `f32`.
    #[error("range {minimum}..={maximum} is too wide to represent")]
    SpanOverflow {
        /// The configured minimum.
        minimum: f32,
        /// The configured maximum.
        maximum: f32,
    },
    /// `step` is below zero.
    #[error("step must not be negative, got {0}")]
    NegativeStep(f32),
    /// `step` is larger than the whole range.
    #[error("step ({step}) exceeds the range span ({span})")]
    StepExceedsRange {
        /// The configured step.
        step: f32,
        /// `maximum_value - minimum_value`.
        span: f32,
    },
    /// A vector value with no entries.
    #[error("value must contain at least one thumb")]
    EmptyValue,
    /// `thumb_separation` is below zero.
    #[error("thumb_separation must not be negative, got {0}")]
    NegativeSeparation(f32),
}

/// A slider value: one number per thumb.
///
/// Notifications carry the same variant the slider was configured with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum SliderValue {
    /// A single thumb.
    Scalar(f32),
    /// One thumb per entry, in track order.
    Vector(Vec<f32>),
}

impl SliderValue {
    /// The thumb values as a slice.
    pub fn as_slice(&self) -> &[f32] {
        match self {
            SliderValue::Scalar(value) => std::slice::from_ref(value),
            SliderValue::Vector(values) => values,
        }
    }

    /// Number of thumbs this value describes.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether this is an empty vector.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Which variant this is.
    pub fn shape(&self) -> ValueShape {
        match self {
            SliderValue::Scalar(_) => ValueShape::Scalar,
            SliderValue::Vector(_) => ValueShape::Vector,
        }
    }

    /// The first thumb value, if any.
    pub fn first(&self) -> Option<f32> {
        self.as_slice().first().copied()
    }
}

impl Default for SliderValue {
    fn default() -> Self {
        SliderValue::Scalar(0.0)
    }
}

impl From<f32> for SliderValue {
    fn from(value: f32) -> Self {
        SliderValue::Scalar(value)
    }
}

impl From<Vec<f32>> for SliderValue {
    fn from(values: Vec<f32>) -> Self {
        SliderValue::Vector(values)
    }
}

impl<const N: usize> From<[f32; N]> for SliderValue {
    fn from(values: [f32; N]) -> Self {
        SliderValue::Vector(values.to_vec())
    }
}

/// The variant of [`SliderValue`] a slider reports.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Report [`SliderValue::Scalar`].
    #[default]
    Scalar,
    /// Report [`SliderValue::Vector`].
    Vector,
}

impl ValueShape {
    /// Wraps thumb values in this shape.
    pub fn wrap(self, values: &[f32]) -> SliderValue {
        match self {
            ValueShape::Scalar => SliderValue::Scalar(values.first().copied().unwrap_or_default()),
            ValueShape::Vector => SliderValue::Vector(values.to_vec()),
        }
    }
}

/// What an external value update does while a thumb is being dragged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExternalUpdatePolicy {
    /// Remember the update but leave the thumbs to the gesture.
    #[default]
    Ignore,
    /// Apply the update right away, without animation.
    Override,
}

/// Arguments for [`Slider`].
#[derive(PartialEq, Clone, Debug, Setters)]
pub struct SliderArgs {
    /// Lower end of the value range.
    pub minimum_value: f32,
    /// Upper end of the value range.
    pub maximum_value: f32,
    /// Distance between selectable values; `0.0` is continuous.
    pub step: f32,
    /// Initial value; its length sets the number of thumbs.
    #[setters(into)]
    pub value: SliderValue,
    /// Freeze drag movement and releases while set. Touches are still
    /// grabbed so a drag resumes if the slider is re-enabled mid-gesture.
    pub disabled: bool,
    /// Let touches on the track grab the nearest thumb.
    pub track_clickable: bool,
    /// Animate external value changes.
    pub animate_transitions: bool,
    /// Animation used when `animate_transitions` is set.
    pub animation_type: AnimationType,
    /// Overrides for the animation parameters.
    pub animation_config: AnimationConfig,
    /// Mirror a horizontal track so the minimum sits on the right.
    pub rtl: bool,
    /// Track axis.
    pub orientation: Orientation,
    /// Size of the touch target centered on each thumb.
    pub thumb_touch_size: PxSize,
    /// Values at which the host draws marks along the track.
    #[setters(into)]
    pub track_marks: Vec<f32>,
    /// Minimum distance kept between adjacent thumbs. Defaults to `step`,
    /// or a tenth of the range when continuous.
    #[setters(strip_option)]
    pub thumb_separation: Option<f32>,
    /// Handling of external updates during a drag.
    pub external_update_policy: ExternalUpdatePolicy,
    /// Highlight a single thumb's track from the thumb to the far end
    /// instead of from the start.
    pub inverse: bool,
    /// Called once when a gesture grabs a thumb.
    #[setters(skip)]
    pub on_sliding_start: CallbackWith<SliderValue>,
    /// Called on every drag movement.
    #[setters(skip)]
    pub on_value_change: CallbackWith<SliderValue>,
    /// Called when a gesture releases its thumb.
    #[setters(skip)]
    pub on_sliding_complete: CallbackWith<SliderValue>,
}

impl SliderArgs {
    /// Sets the on_sliding_start handler.
    pub fn on_sliding_start<F>(mut self, on_sliding_start: F) -> Self
    where
        F: Fn(SliderValue) + Send + Sync + 'static,
    {
        self.on_sliding_start = CallbackWith::new(on_sliding_start);
        self
    }

    /// Sets the on_sliding_start handler using a shared callback.
    pub fn on_sliding_start_shared(
        mut self,
        on_sliding_start: impl Into<CallbackWith<SliderValue>>,
    ) -> Self {
        self.on_sliding_start = on_sliding_start.into();
        self
    }

    /// Sets the on_value_change handler.
    pub fn on_value_change<F>(mut self, on_value_change: F) -> Self
    where
        F: Fn(SliderValue) + Send + Sync + 'static,
    {
        self.on_value_change = CallbackWith::new(on_value_change);
        self
    }

    /// Sets the on_value_change handler using a shared callback.
    pub fn on_value_change_shared(
        mut self,
        on_value_change: impl Into<CallbackWith<SliderValue>>,
    ) -> Self {
        self.on_value_change = on_value_change.into();
        self
    }

    /// Sets the on_sliding_complete handler.
    pub fn on_sliding_complete<F>(mut self, on_sliding_complete: F) -> Self
    where
        F: Fn(SliderValue) + Send + Sync + 'static,
    {
        self.on_sliding_complete = CallbackWith::new(on_sliding_complete);
        self
    }

    /// Sets the on_sliding_complete handler using a shared callback.
    pub fn on_sliding_complete_shared(
        mut self,
        on_sliding_complete: impl Into<CallbackWith<SliderValue>>,
    ) -> Self {
        self.on_sliding_complete = on_sliding_complete.into();
        self
    }

    /// Checks the configuration and returns the value range.
    pub fn validate(&self) -> Result<ValueRange, SliderError> {
        let range = ValueRange::new(self.minimum_value, self.maximum_value)?;

        if !self.step.is_finite() {
            return Err(SliderError::NonFinite {
                field: "step",
                value: self.step,
            });
        }
        if self.step < 0.0 {
            return Err(SliderError::NegativeStep(self.step));
        }
        if self.step > range.span() {
            return Err(SliderError::StepExceedsRange {
                step: self.step,
                span: range.span(),
            });
        }
        if self.value.is_empty() {
            return Err(SliderError::EmptyValue);
        }
        if let Some(separation) = self.thumb_separation {
            if !separation.is_finite() {
                return Err(SliderError::NonFinite {
                    field: "thumb_separation",
                    value: separation,
                });
            }
            if separation < 0.0 {
                return Err(SliderError::NegativeSeparation(separation));
            }
        }
        for px in [self.thumb_touch_size.width, self.thumb_touch_size.height] {
            if !px.is_finite() {
                return Err(SliderError::NonFinite {
                    field: "thumb_touch_size",
                    value: px.0,
                });
            }
        }
        if let Some(mark) = self.track_marks.iter().find(|m| !m.is_finite()) {
            return Err(SliderError::NonFinite {
                field: "track_marks",
                value: *mark,
            });
        }
        Ok(range)
    }

    fn separation(&self, range: ValueRange) -> f32 {
        separation_buffer(range, self.step, self.thumb_separation)
    }
}

impl Default for SliderArgs {
    fn default() -> Self {
        Self {
            minimum_value: 0.0,
            maximum_value: 1.0,
            step: 0.0,
            value: SliderValue::default(),
            disabled: false,
            track_clickable: false,
            animate_transitions: false,
            animation_type: AnimationType::default(),
            animation_config: AnimationConfig::default(),
            rtl: false,
            orientation: Orientation::default(),
            thumb_touch_size: DEFAULT_THUMB_TOUCH_SIZE,
            track_marks: Vec::new(),
            thumb_separation: None,
            external_update_policy: ExternalUpdatePolicy::default(),
            inverse: false,
            on_sliding_start: CallbackWith::default(),
            on_value_change: CallbackWith::default(),
            on_sliding_complete: CallbackWith::default(),
        }
    }
}

/// The slider engine.
///
/// Owns the thumb values, the measured layout and the open gestures. All
/// methods run synchronously; only animations started for external updates
/// continue afterwards, on the configured [`Animator`].
pub struct Slider {
    args: SliderArgs,
    range: ValueRange,
    shape: ValueShape,
    model: ThumbModel,
    last_external: ThumbValues,
    layout: LayoutCache,
    gestures: GestureController,
    animator: Arc<dyn Animator>,
}

impl Slider {
    /// Creates a slider whose animated updates apply immediately.
    pub fn new(args: SliderArgs) -> Result<Self, SliderError> {
        Self::with_animator(args, Arc::new(ImmediateAnimator))
    }

    /// Creates a slider that runs animated updates on `animator`.
    pub fn with_animator(
        args: SliderArgs,
        animator: Arc<dyn Animator>,
    ) -> Result<Self, SliderError> {
        let range = args.validate()?;
        let values = normalize_input(&args.value, range, &[]);
        warn_if_unsorted(&values);
        debug!(thumbs = values.len(), ?range, "creating slider");

        Ok(Self {
            shape: args.value.shape(),
            model: ThumbModel::new(&values, range),
            last_external: values,
            range,
            args,
            layout: LayoutCache::default(),
            gestures: GestureController::default(),
            animator,
        })
    }

    /// Replaces the configuration.
    ///
    /// A changed range re-clamps every thumb; a changed value goes through
    /// the same path as [`Slider::set_value`]. On error the previous
    /// configuration stays in effect.
    pub fn update_args(&mut self, args: SliderArgs) -> Result<(), SliderError> {
        let range = args.validate()?;
        let value_changed = args.value != self.args.value;
        let value = args.value.clone();
        self.args = args;

        if range != self.range {
            debug!(?range, "slider range changed");
            self.range = range;
            self.model.set_range(range);
            self.last_external = self.last_external.iter().map(|v| range.clamp(*v)).collect();
        }
        if value_changed {
            self.apply_external(&value);
        }
        Ok(())
    }

    /// Applies a value supplied by the host.
    ///
    /// Only thumbs whose supplied value differs from the previous external
    /// value move. A different number of entries rebuilds the thumbs.
    pub fn set_value(&mut self, value: impl Into<SliderValue>) {
        let value = value.into();
        self.args.value = value.clone();
        self.apply_external(&value);
    }

    fn apply_external(&mut self, value: &SliderValue) {
        if value.is_empty() {
            warn!("ignoring empty slider value");
            return;
        }
        let values = normalize_input(value, self.range, &self.last_external);
        warn_if_unsorted(&values);
        self.shape = value.shape();

        if values.len() != self.model.len() {
            debug!(from = self.model.len(), to = values.len(), "thumb count changed");
            self.gestures.reset(&mut self.model);
            self.model.reset(&values);
            self.last_external = values;
            return;
        }

        let dragging = self.gestures.phase() == GesturePhase::Dragging;
        if dragging && self.args.external_update_policy == ExternalUpdatePolicy::Ignore {
            trace!(?values, "deferring external value during drag");
            self.last_external = values;
            return;
        }

        let animate = self.args.animate_transitions && !dragging;
        let profile = self.args.animation_config.profile(self.args.animation_type);
        for (index, (new, old)) in values.iter().zip(self.last_external.iter()).enumerate() {
            if new.to_bits() == old.to_bits() {
                continue;
            }
            let Some(thumb) = self.model.thumb(index) else {
                continue;
            };
            if animate {
                thumb
                    .animated_value()
                    .animate_to(*new, &profile, self.animator.as_ref());
            } else {
                self.animator.stop(thumb.animated_value());
                thumb.animated_value().set(*new);
            }
        }
        self.last_external = values;
    }

    /// Records a measured size. Returns whether the layout is ready.
    pub fn record_layout(&mut self, target: LayoutTarget, size: PxSize) -> bool {
        self.layout.record(target, size)
    }

    /// Whether container, track and thumb have all been measured.
    pub fn is_ready(&self) -> bool {
        self.layout.is_ready()
    }

    /// Measured geometry, once ready.
    pub fn geometry(&self) -> Option<SliderGeometry> {
        self.layout.metrics().map(|metrics| SliderGeometry {
            metrics,
            range: self.range,
            orientation: self.args.orientation,
            rtl: self.args.rtl,
            touch_size: self.args.thumb_touch_size,
        })
    }

    fn gesture_parts(&mut self) -> (&mut GestureController, GestureContext<'_>) {
        let geometry = self.geometry();
        let buffer = self.args.separation(self.range);
        let ctx = GestureContext {
            model: &mut self.model,
            geometry,
            step: self.args.step,
            buffer,
            disabled: self.args.disabled,
            track_clickable: self.args.track_clickable,
        };
        (&mut self.gestures, ctx)
    }

    fn axis_delta(&self, dx: Px, dy: Px) -> Px {
        match self.args.orientation {
            Orientation::Horizontal => dx,
            Orientation::Vertical => dy,
        }
    }

    fn emit(&self, callback: &CallbackWith<SliderValue>) {
        callback.call(self.value());
    }

    /// Starts a gesture for a touch at `point`, in container coordinates.
    ///
    /// Returns whether a thumb was grabbed.
    pub fn start(&mut self, touch: TouchId, point: PxPosition) -> bool {
        let accepted = {
            let (gestures, mut ctx) = self.gesture_parts();
            gestures.start(touch, point, &mut ctx)
        };
        if accepted {
            if let Some(thumb) = self
                .gestures
                .session(touch)
                .and_then(|session| self.model.thumb(session.thumb_index))
            {
                self.animator.stop(thumb.animated_value());
            }
            self.emit(&self.args.on_sliding_start);
        }
        accepted
    }

    /// Moves a gesture by the cumulative delta since its start.
    ///
    /// Returns whether a value-change notification was sent.
    pub fn move_by(&mut self, touch: TouchId, dx: Px, dy: Px) -> bool {
        let delta = self.axis_delta(dx, dy);
        let moved = {
            let (gestures, mut ctx) = self.gesture_parts();
            gestures.move_by(touch, delta, &mut ctx)
        };
        if moved {
            self.emit(&self.args.on_value_change);
        }
        moved
    }

    /// Ends a gesture with its final cumulative delta.
    ///
    /// Returns whether a sliding-complete notification was sent.
    pub fn end(&mut self, touch: TouchId, dx: Px, dy: Px) -> bool {
        let delta = self.axis_delta(dx, dy);
        let completed = {
            let (gestures, mut ctx) = self.gesture_parts();
            gestures.end(touch, delta, &mut ctx)
        };
        if completed {
            self.emit(&self.args.on_sliding_complete);
        }
        completed
    }

    /// Ends a gesture that the platform cancelled, using its last delta.
    pub fn cancel(&mut self, touch: TouchId) -> bool {
        let completed = {
            let (gestures, mut ctx) = self.gesture_parts();
            gestures.cancel(touch, &mut ctx)
        };
        if completed {
            self.emit(&self.args.on_sliding_complete);
        }
        completed
    }

    /// Answers a request to hand an open gesture to another responder.
    pub fn request_termination(&self, touch: TouchId) -> bool {
        self.gestures.request_termination(touch)
    }

    /// Current gesture phase.
    pub fn phase(&self) -> GesturePhase {
        self.gestures.phase()
    }

    /// Current value, in the shape the slider was configured with.
    pub fn value(&self) -> SliderValue {
        self.shape.wrap(&self.model.values())
    }

    /// Current value of every thumb.
    pub fn values(&self) -> ThumbValues {
        self.model.values()
    }

    /// Current value of one thumb.
    pub fn thumb_value(&self, index: usize) -> Option<f32> {
        self.model.value(index)
    }

    /// The reactive value behind one thumb, for hosts that render from it.
    pub fn thumb_animated_value(&self, index: usize) -> Option<AnimatedValue> {
        self.model
            .thumb(index)
            .map(|thumb| thumb.animated_value().clone())
    }

    /// Whether a gesture currently targets the thumb at `index`.
    pub fn is_thumb_active(&self, index: usize) -> bool {
        self.model.is_active(index)
    }

    /// Bounds of the highlighted segment.
    pub fn active_range(&self) -> ActiveRange {
        self.model.active_range_bounds()
    }

    /// Which thumb a touch at `point` would grab. [`ThumbHit::Miss`] until
    /// the layout is measured.
    pub fn hit_test(&self, point: PxPosition) -> ThumbHit {
        let Some(geometry) = self.geometry() else {
            return ThumbHit::Miss;
        };
        let rects: Vec<_> = self
            .model
            .values()
            .iter()
            .map(|value| geometry.touch_rect(*value))
            .collect();
        hit_test(
            point,
            &rects,
            geometry.orientation,
            self.args.track_clickable,
        )
    }

    /// Offsets and segments for drawing the current state.
    pub fn render_layout(&self) -> SliderRenderLayout {
        match self.geometry() {
            Some(geometry) => SliderRenderLayout::measured(
                &geometry,
                &self.model.values(),
                self.model.active_range_bounds(),
                &self.args.track_marks,
                self.args.inverse,
            ),
            None => SliderRenderLayout::hidden(self.args.orientation, self.model.len()),
        }
    }

    /// The active configuration.
    pub fn args(&self) -> &SliderArgs {
        &self.args
    }

    /// The validated value range.
    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Minimum distance kept between adjacent thumbs.
    pub fn separation(&self) -> f32 {
        self.args.separation(self.range)
    }
}

impl std::fmt::Debug for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("range", &self.range)
            .field("values", &self.model.values())
            .field("phase", &self.gestures.phase())
            .field("ready", &self.layout.is_ready())
            .finish()
    }
}

fn warn_if_unsorted(values: &[f32]) {
    if values.windows(2).any(|pair| pair[0] > pair[1]) {
        warn!(?values, "slider values are not in ascending order");
    }
}
