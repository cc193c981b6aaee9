use std::collections::HashMap;

use slidekit_ui::{Px, PxPosition, PxRect};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use super::{
    layout::SliderGeometry,
    thumbs::{ThumbHit, ThumbModel, hit_test},
};

/// Host-assigned identifier of one touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

/// Whether any gesture is in progress.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No open sessions.
    #[default]
    Idle,
    /// At least one session is open.
    Dragging,
}

/// State kept for one touch between start and end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// The thumb this touch drags.
    pub thumb_index: usize,
    /// Thumb leading-edge offset the cumulative deltas are applied to.
    pub anchor_offset: Px,
    /// The most recent cumulative delta along the track axis.
    pub last_delta: Px,
}

/// Everything a gesture step needs from the slider.
pub(super) struct GestureContext<'a> {
    pub model: &'a mut ThumbModel,
    pub geometry: Option<SliderGeometry>,
    pub step: f32,
    pub buffer: f32,
    pub disabled: bool,
    pub track_clickable: bool,
}

impl GestureContext<'_> {
    fn touch_rects(&self, geometry: &SliderGeometry) -> SmallVec<[PxRect; 2]> {
        self.model
            .values()
            .iter()
            .map(|value| geometry.touch_rect(*value))
            .collect()
    }

    /// Moves `session`'s thumb to the position given by `delta`.
    fn apply(&mut self, session: &GestureSession, delta: Px) -> bool {
        let Some(geometry) = self.geometry else {
            return false;
        };
        let candidate = geometry.value_at(session.anchor_offset, delta, self.step);
        let value = self.model.clamp_against_neighbors(
            session.thumb_index,
            candidate,
            self.buffer,
            self.step,
        );
        self.model.set_value(session.thumb_index, value);
        true
    }
}

/// Routes touches to thumbs and turns cumulative deltas into values.
///
/// Each open session writes only its own thumb. Notifications are left to
/// the caller: every method returns whether the matching notification should
/// fire.
#[derive(Debug, Default)]
pub struct GestureController {
    sessions: HashMap<TouchId, GestureSession>,
}

impl GestureController {
    /// Current phase.
    pub fn phase(&self) -> GesturePhase {
        if self.sessions.is_empty() {
            GesturePhase::Idle
        } else {
            GesturePhase::Dragging
        }
    }

    /// The open session for `touch`.
    pub fn session(&self, touch: TouchId) -> Option<&GestureSession> {
        self.sessions.get(&touch)
    }

    /// Number of open sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn owner_of(&self, thumb_index: usize) -> Option<TouchId> {
        self.sessions
            .iter()
            .find(|(_, session)| session.thumb_index == thumb_index)
            .map(|(touch, _)| *touch)
    }

    /// Tries to open a session for a touch at `point`.
    ///
    /// Returns `true` when the touch was accepted and the sliding-start
    /// notification should fire. `disabled` is not consulted here; it only
    /// freezes moves and the release, so a host can re-enable the slider
    /// mid-gesture.
    pub(super) fn start(
        &mut self,
        touch: TouchId,
        point: PxPosition,
        ctx: &mut GestureContext<'_>,
    ) -> bool {
        let Some(geometry) = ctx.geometry else {
            trace!(?touch, "refusing gesture before layout is measured");
            return false;
        };
        if self.sessions.contains_key(&touch) {
            warn!(?touch, "touch id already has an open gesture");
            return false;
        }

        let rects = ctx.touch_rects(&geometry);
        let hit = hit_test(point, &rects, geometry.orientation, ctx.track_clickable);
        let (thumb_index, anchor_offset) = match hit {
            ThumbHit::Thumb(index) => {
                let value = ctx.model.value(index).unwrap_or(geometry.range.minimum);
                (index, geometry.thumb_offset(value))
            }
            ThumbHit::Track(index) => (index, geometry.anchor_under(point)),
            ThumbHit::Miss => {
                trace!(?touch, ?point, "gesture missed every thumb");
                return false;
            }
        };
        if let Some(owner) = self.owner_of(thumb_index) {
            trace!(?touch, ?owner, thumb_index, "thumb already dragged by another touch");
            return false;
        }

        debug!(?touch, ?hit, anchor = anchor_offset.0, "gesture started");
        ctx.model.set_active(thumb_index, true);
        self.sessions.insert(
            touch,
            GestureSession {
                thumb_index,
                anchor_offset,
                last_delta: Px::ZERO,
            },
        );
        true
    }

    /// Applies a cumulative drag delta.
    ///
    /// Returns `true` when the value-change notification should fire.
    pub(super) fn move_by(
        &mut self,
        touch: TouchId,
        delta: Px,
        ctx: &mut GestureContext<'_>,
    ) -> bool {
        if ctx.disabled {
            trace!(?touch, "ignoring move on disabled slider");
            return false;
        }
        let Some(session) = self.sessions.get_mut(&touch) else {
            trace!(?touch, "move without an open gesture");
            return false;
        };
        session.last_delta = delta;
        let session = *session;
        ctx.apply(&session, delta)
    }

    /// Closes the session for `touch` with a final cumulative delta.
    ///
    /// Returns `true` when the sliding-complete notification should fire.
    pub(super) fn end(
        &mut self,
        touch: TouchId,
        delta: Px,
        ctx: &mut GestureContext<'_>,
    ) -> bool {
        let Some(session) = self.sessions.remove(&touch) else {
            trace!(?touch, "end without an open gesture");
            return false;
        };
        ctx.model.set_active(session.thumb_index, false);
        if ctx.disabled {
            trace!(?touch, "gesture ended on disabled slider");
            return false;
        }
        debug!(?touch, thumb_index = session.thumb_index, "gesture ended");
        ctx.apply(&session, delta)
    }

    /// Closes the session for `touch` using the last delta it reported.
    pub(super) fn cancel(&mut self, touch: TouchId, ctx: &mut GestureContext<'_>) -> bool {
        let Some(delta) = self.sessions.get(&touch).map(|s| s.last_delta) else {
            trace!(?touch, "cancel without an open gesture");
            return false;
        };
        self.end(touch, delta, ctx)
    }

    /// Drops every session without touching values.
    pub(super) fn reset(&mut self, model: &mut ThumbModel) {
        for session in self.sessions.values() {
            model.set_active(session.thumb_index, false);
        }
        self.sessions.clear();
    }

    /// Whether another responder may take over an in-progress gesture.
    ///
    /// Always refused; an open drag keeps its touch until it ends.
    pub fn request_termination(&self, touch: TouchId) -> bool {
        trace!(?touch, "refusing gesture termination request");
        false
    }
}
