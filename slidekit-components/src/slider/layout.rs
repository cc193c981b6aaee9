use slidekit_ui::{Orientation, Px, PxPosition, PxRect, PxSize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use super::{
    mapping::{ValueRange, pixel_offset_of, value_of_pixel_delta},
    thumbs::ActiveRange,
};

/// Default size of the invisible touch target around each thumb.
pub const DEFAULT_THUMB_TOUCH_SIZE: PxSize = PxSize::new(Px(40.0), Px(40.0));

/// Which measured element a layout report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutTarget {
    /// The outer slider container; touch coordinates are relative to it.
    Container,
    /// The track the thumbs travel along.
    Track,
    /// A thumb. All thumbs share one size.
    Thumb,
}

impl LayoutTarget {
    const fn slot(self) -> usize {
        match self {
            LayoutTarget::Container => 0,
            LayoutTarget::Track => 1,
            LayoutTarget::Thumb => 2,
        }
    }
}

/// Snapshot of the three measured sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Container size.
    pub container: PxSize,
    /// Track size.
    pub track: PxSize,
    /// Thumb size.
    pub thumb: PxSize,
}

/// Collects measurements and publishes them once all three are known.
///
/// Readiness never reverts. Later measurements replace the published
/// snapshot as a whole.
#[derive(Debug, Default, Clone)]
pub struct LayoutCache {
    pending: [Option<PxSize>; 3],
    metrics: Option<LayoutMetrics>,
}

impl LayoutCache {
    /// Records a measurement and returns whether the layout is ready.
    ///
    /// Repeating the last size for a target is a no-op. Non-finite or
    /// negative sizes are dropped.
    pub fn record(&mut self, target: LayoutTarget, size: PxSize) -> bool {
        let valid = [size.width, size.height]
            .iter()
            .all(|px| px.is_finite() && px.0 >= 0.0);
        if !valid {
            warn!(?target, ?size, "ignoring invalid slider measurement");
            return self.is_ready();
        }

        let slot = &mut self.pending[target.slot()];
        if *slot == Some(size) {
            return self.is_ready();
        }
        *slot = Some(size);

        if let [Some(container), Some(track), Some(thumb)] = self.pending {
            if self.metrics.is_none() {
                debug!(?container, ?track, ?thumb, "slider layout ready");
            }
            self.metrics = Some(LayoutMetrics {
                container,
                track,
                thumb,
            });
        }
        self.is_ready()
    }

    /// Whether container, track and thumb have all been measured.
    pub fn is_ready(&self) -> bool {
        self.metrics.is_some()
    }

    /// The published snapshot, if ready.
    pub fn metrics(&self) -> Option<LayoutMetrics> {
        self.metrics
    }
}

/// Measured geometry combined with the settings that affect pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderGeometry {
    /// Measured sizes.
    pub metrics: LayoutMetrics,
    /// Value domain.
    pub range: ValueRange,
    /// Track axis.
    pub orientation: Orientation,
    /// Right-to-left layout direction.
    pub rtl: bool,
    /// Size of each thumb's touch target.
    pub touch_size: PxSize,
}

impl SliderGeometry {
    /// Whether the value axis runs against the pixel axis.
    ///
    /// Only horizontal tracks are mirrored.
    pub fn mirrored(&self) -> bool {
        self.rtl && self.orientation == Orientation::Horizontal
    }

    /// Track length along the axis.
    pub fn track_extent(&self) -> Px {
        self.metrics.track.along(self.orientation)
    }

    /// Thumb length along the axis.
    pub fn thumb_extent(&self) -> Px {
        self.metrics.thumb.along(self.orientation)
    }

    /// Leading-edge offset of a thumb holding `value`.
    pub fn thumb_offset(&self, value: f32) -> Px {
        pixel_offset_of(
            value,
            self.range,
            self.track_extent(),
            self.thumb_extent(),
            self.mirrored(),
        )
    }

    /// Center of a thumb holding `value`, along the axis.
    pub fn thumb_center(&self, value: f32) -> Px {
        self.thumb_offset(value) + self.thumb_extent() / 2.0
    }

    /// Value for a thumb anchored at `anchor` and dragged `delta` pixels.
    pub fn value_at(&self, anchor: Px, delta: Px, step: f32) -> f32 {
        value_of_pixel_delta(
            anchor,
            delta,
            self.range,
            self.track_extent(),
            self.thumb_extent(),
            self.mirrored(),
            step,
        )
    }

    /// Anchor offset that centers the thumb under a touch at `point`.
    pub fn anchor_under(&self, point: PxPosition) -> Px {
        point.along(self.orientation) - self.thumb_extent() / 2.0
    }

    /// Touch target of a thumb holding `value`, in container coordinates.
    ///
    /// The target is centered on the thumb along the axis and on the
    /// container across it.
    pub fn touch_rect(&self, value: f32) -> PxRect {
        let orientation = self.orientation;
        let touch_main = self.touch_size.along(orientation);
        let touch_cross = self.touch_size.across(orientation);
        let main = self.thumb_offset(value) + (self.thumb_extent() - touch_main) / 2.0;
        let cross = (self.metrics.container.across(orientation) - touch_cross) / 2.0;
        PxRect::from_position_size(
            PxPosition::from_axes(orientation, main, cross),
            PxSize::from_axes(orientation, touch_main, touch_cross),
        )
    }

    /// How far the touch target extends past the thumb width and the
    /// container height.
    ///
    /// Hosts expand the touchable area by half of each component on both
    /// sides.
    pub fn touch_overflow(&self) -> PxSize {
        PxSize::new(
            (self.touch_size.width - self.metrics.thumb.width).positive(),
            (self.touch_size.height - self.metrics.container.height).positive(),
        )
    }
}

/// A span along the track axis.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TrackSegment {
    /// Offset of the segment start from the track start.
    pub start: Px,
    /// Length of the segment.
    pub length: Px,
}

impl TrackSegment {
    fn between(a: Px, b: Px) -> Self {
        let start = a.min(b);
        Self {
            start,
            length: a.max(b) - start,
        }
    }
}

/// Everything a host needs to draw the slider.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderRenderLayout {
    /// `false` until the layout has been measured; hosts draw the thumbs and
    /// the highlighted segment fully transparent until then.
    pub visible: bool,
    /// Track axis.
    pub orientation: Orientation,
    /// Leading-edge offset of each thumb.
    pub thumb_offsets: SmallVec<[Px; 2]>,
    /// Highlighted part of the track.
    pub active_segment: TrackSegment,
    /// Center offset of each track mark.
    pub track_marks: Vec<Px>,
    /// Touch target of each thumb.
    pub touch_rects: SmallVec<[PxRect; 2]>,
    /// See [`SliderGeometry::touch_overflow`].
    pub touch_overflow: PxSize,
}

impl SliderRenderLayout {
    /// Layout for a slider that has not been measured yet.
    pub fn hidden(orientation: Orientation, thumb_count: usize) -> Self {
        Self {
            visible: false,
            orientation,
            thumb_offsets: std::iter::repeat_n(Px::ZERO, thumb_count).collect(),
            active_segment: TrackSegment::default(),
            track_marks: Vec::new(),
            touch_rects: SmallVec::new(),
            touch_overflow: PxSize::ZERO,
        }
    }

    /// Computes the layout for measured `geometry`.
    ///
    /// A single thumb highlights from the start edge to its center, or from
    /// its center to the far edge when `inverse` is set.
    pub fn measured(
        geometry: &SliderGeometry,
        values: &[f32],
        bounds: ActiveRange,
        marks: &[f32],
        inverse: bool,
    ) -> Self {
        let active_segment = match values {
            [single] => {
                let center = geometry.thumb_center(*single);
                let edge = if geometry.mirrored() != inverse {
                    geometry.track_extent()
                } else {
                    Px::ZERO
                };
                TrackSegment::between(edge, center)
            }
            _ => TrackSegment::between(
                geometry.thumb_center(bounds.min),
                geometry.thumb_center(bounds.max),
            ),
        };

        Self {
            visible: true,
            orientation: geometry.orientation,
            thumb_offsets: values.iter().map(|v| geometry.thumb_offset(*v)).collect(),
            active_segment,
            track_marks: marks.iter().map(|m| geometry.thumb_center(*m)).collect(),
            touch_rects: values.iter().map(|v| geometry.touch_rect(*v)).collect(),
            touch_overflow: geometry.touch_overflow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: f32, h: f32) -> PxSize {
        PxSize::new(Px(w), Px(h))
    }

    fn geometry(orientation: Orientation, rtl: bool) -> SliderGeometry {
        let (container, track, thumb) = match orientation {
            Orientation::Horizontal => (size(300.0, 40.0), size(300.0, 4.0), size(20.0, 20.0)),
            Orientation::Vertical => (size(40.0, 300.0), size(4.0, 300.0), size(20.0, 20.0)),
        };
        SliderGeometry {
            metrics: LayoutMetrics {
                container,
                track,
                thumb,
            },
            range: ValueRange::default(),
            orientation,
            rtl,
            touch_size: DEFAULT_THUMB_TOUCH_SIZE,
        }
    }

    #[test]
    fn cache_is_ready_after_all_three() {
        let mut cache = LayoutCache::default();
        assert!(!cache.record(LayoutTarget::Container, size(300.0, 40.0)));
        assert!(!cache.record(LayoutTarget::Track, size(300.0, 4.0)));
        assert!(cache.metrics().is_none());
        assert!(cache.record(LayoutTarget::Thumb, size(20.0, 20.0)));
        assert_eq!(
            cache.metrics(),
            Some(LayoutMetrics {
                container: size(300.0, 40.0),
                track: size(300.0, 4.0),
                thumb: size(20.0, 20.0),
            })
        );
    }

    #[test]
    fn cache_repeated_measurement_is_noop() {
        let mut cache = LayoutCache::default();
        cache.record(LayoutTarget::Track, size(300.0, 4.0));
        let before = cache.clone();
        cache.record(LayoutTarget::Track, size(300.0, 4.0));
        assert_eq!(cache.pending, before.pending);
        assert!(!cache.is_ready());
    }

    #[test]
    fn cache_updates_snapshot_and_stays_ready() {
        let mut cache = LayoutCache::default();
        cache.record(LayoutTarget::Container, size(300.0, 40.0));
        cache.record(LayoutTarget::Track, size(300.0, 4.0));
        cache.record(LayoutTarget::Thumb, size(20.0, 20.0));

        assert!(cache.record(LayoutTarget::Track, size(200.0, 4.0)));
        assert_eq!(cache.metrics().map(|m| m.track), Some(size(200.0, 4.0)));
    }

    #[test]
    fn cache_drops_invalid_sizes() {
        let mut cache = LayoutCache::default();
        cache.record(LayoutTarget::Container, size(f32::NAN, 40.0));
        cache.record(LayoutTarget::Track, size(-1.0, 4.0));
        assert_eq!(cache.pending, [None, None, None]);
    }

    #[test]
    fn touch_rect_is_centered_on_thumb() {
        let geometry = geometry(Orientation::Horizontal, false);
        // Value 0.5 puts the thumb at 140..160.
        assert_eq!(
            geometry.touch_rect(0.5),
            PxRect::new(Px(130.0), Px(0.0), Px(40.0), Px(40.0))
        );
    }

    #[test]
    fn vertical_touch_rect_swaps_axes() {
        let geometry = geometry(Orientation::Vertical, false);
        assert_eq!(
            geometry.touch_rect(0.5),
            PxRect::new(Px(0.0), Px(130.0), Px(40.0), Px(40.0))
        );
    }

    #[test]
    fn vertical_ignores_rtl() {
        let geometry = geometry(Orientation::Vertical, true);
        assert!(!geometry.mirrored());
        assert_eq!(geometry.thumb_offset(1.0), Px(280.0));
    }

    #[test]
    fn touch_overflow_uses_thumb_width_and_container_height() {
        let mut geometry = geometry(Orientation::Horizontal, false);
        assert_eq!(geometry.touch_overflow(), size(20.0, 0.0));
        geometry.metrics.container.height = Px(30.0);
        assert_eq!(geometry.touch_overflow(), size(20.0, 10.0));
    }

    #[test]
    fn anchor_centers_thumb_under_touch() {
        let geometry = geometry(Orientation::Horizontal, false);
        let anchor = geometry.anchor_under(PxPosition::new(Px(150.0), Px(20.0)));
        assert_eq!(anchor, Px(140.0));
        assert!((geometry.value_at(anchor, Px::ZERO, 0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn single_thumb_segment_runs_from_start_edge() {
        let ltr = geometry(Orientation::Horizontal, false);
        let bounds = ActiveRange { min: 0.0, max: 0.5 };
        let layout = SliderRenderLayout::measured(&ltr, &[0.5], bounds, &[], false);
        assert_eq!(
            layout.active_segment,
            TrackSegment {
                start: Px(0.0),
                length: Px(150.0)
            }
        );

        let rtl = geometry(Orientation::Horizontal, true);
        let layout = SliderRenderLayout::measured(&rtl, &[0.5], bounds, &[], false);
        assert_eq!(
            layout.active_segment,
            TrackSegment {
                start: Px(150.0),
                length: Px(150.0)
            }
        );
    }

    #[test]
    fn inverse_segment_runs_to_far_edge() {
        let bounds = ActiveRange { min: 0.0, max: 0.25 };
        let ltr = geometry(Orientation::Horizontal, false);
        let layout = SliderRenderLayout::measured(&ltr, &[0.25], bounds, &[], true);
        assert_eq!(
            layout.active_segment,
            TrackSegment {
                start: Px(80.0),
                length: Px(220.0)
            }
        );

        // Under RTL the far edge is the left one.
        let rtl = geometry(Orientation::Horizontal, true);
        let layout = SliderRenderLayout::measured(&rtl, &[0.25], bounds, &[], true);
        assert_eq!(
            layout.active_segment,
            TrackSegment {
                start: Px(0.0),
                length: Px(220.0)
            }
        );
    }

    #[test]
    fn multi_thumb_segment_spans_thumb_centers() {
        let geometry = geometry(Orientation::Horizontal, false);
        let bounds = ActiveRange { min: 0.25, max: 0.75 };
        let layout =
            SliderRenderLayout::measured(&geometry, &[0.25, 0.75], bounds, &[0.0, 1.0], false);

        assert!(layout.visible);
        assert_eq!(layout.thumb_offsets.as_slice(), &[Px(70.0), Px(210.0)]);
        assert_eq!(
            layout.active_segment,
            TrackSegment {
                start: Px(80.0),
                length: Px(140.0)
            }
        );
        assert_eq!(layout.track_marks, vec![Px(10.0), Px(290.0)]);
        assert_eq!(layout.touch_rects.len(), 2);
    }

    #[test]
    fn hidden_layout_has_zero_offsets() {
        let layout = SliderRenderLayout::hidden(Orientation::Horizontal, 2);
        assert!(!layout.visible);
        assert_eq!(layout.thumb_offsets.as_slice(), &[Px::ZERO, Px::ZERO]);
    }
}
