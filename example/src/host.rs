//! A scripted host that replays layout and touch events into a slider.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use slidekit_components::slider::{
    LayoutTarget, Slider, SliderArgs, SliderError, SliderRenderLayout, SliderValue, TouchId,
};
use slidekit_ui::{FrameAnimator, Px, PxPosition, PxSize};
use tracing::info;

/// One input the host forwards to the slider.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// A layout pass measured an element.
    Layout(LayoutTarget, PxSize),
    /// A finger touched down at container coordinates.
    Down { touch: u64, x: f32, y: f32 },
    /// A finger moved; deltas are cumulative since touch down.
    Move { touch: u64, dx: f32, dy: f32 },
    /// A finger lifted.
    Up { touch: u64, dx: f32, dy: f32 },
    /// The platform cancelled the touch.
    Cancel { touch: u64 },
    /// The app pushed a new value.
    SetValue(SliderValue),
    /// A frame elapsed.
    Frame(Duration),
}

/// Notifications received from the slider, in order.
pub type Transcript = Arc<Mutex<Vec<(&'static str, SliderValue)>>>;

/// Owns a slider and the animator that drives its transitions.
pub struct ScriptedHost {
    name: &'static str,
    slider: Slider,
    animator: Arc<FrameAnimator>,
    now: Instant,
    transcript: Transcript,
}

impl ScriptedHost {
    /// Wraps `args` with callbacks that record every notification.
    pub fn new(name: &'static str, args: SliderArgs) -> Result<Self, SliderError> {
        let transcript = Transcript::default();
        let (start, change, complete) = (
            Arc::clone(&transcript),
            Arc::clone(&transcript),
            Arc::clone(&transcript),
        );
        let args = args
            .on_sliding_start(move |value| {
                info!(slider = name, ?value, "sliding started");
                start.lock().push(("start", value));
            })
            .on_value_change(move |value| {
                change.lock().push(("change", value));
            })
            .on_sliding_complete(move |value| {
                info!(slider = name, ?value, "sliding complete");
                complete.lock().push(("complete", value));
            });

        let animator = Arc::new(FrameAnimator::new());
        let slider = Slider::with_animator(args, animator.clone())?;
        Ok(Self {
            name,
            slider,
            animator,
            now: Instant::now(),
            transcript,
        })
    }

    /// Forwards one event.
    pub fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::Layout(target, size) => {
                if self.slider.record_layout(target, size) {
                    info!(slider = self.name, "layout ready");
                }
            }
            HostEvent::Down { touch, x, y } => {
                let grabbed = self
                    .slider
                    .start(TouchId(touch), PxPosition::new(Px(x), Px(y)));
                if !grabbed {
                    info!(slider = self.name, touch, x, y, "touch not grabbed");
                }
            }
            HostEvent::Move { touch, dx, dy } => {
                self.slider.move_by(TouchId(touch), Px(dx), Px(dy));
            }
            HostEvent::Up { touch, dx, dy } => {
                self.slider.end(TouchId(touch), Px(dx), Px(dy));
            }
            HostEvent::Cancel { touch } => {
                self.slider.cancel(TouchId(touch));
            }
            HostEvent::SetValue(value) => self.slider.set_value(value),
            HostEvent::Frame(elapsed) => {
                self.now += elapsed;
                self.animator.tick(self.now);
            }
        }
    }

    /// Forwards every event in order.
    pub fn run(&mut self, script: impl IntoIterator<Item = HostEvent>) {
        for event in script {
            self.dispatch(event);
        }
    }

    /// The slider being driven.
    pub fn slider(&self) -> &Slider {
        &self.slider
    }

    /// What the host would draw now.
    pub fn render(&self) -> SliderRenderLayout {
        self.slider.render_layout()
    }

    /// Notifications received so far.
    pub fn transcript(&self) -> Vec<(&'static str, SliderValue)> {
        self.transcript.lock().clone()
    }
}

/// Layout events for a horizontal slider of the given width.
pub fn horizontal_layout(width: f32) -> [HostEvent; 3] {
    [
        HostEvent::Layout(LayoutTarget::Container, PxSize::new(Px(width), Px(40.0))),
        HostEvent::Layout(LayoutTarget::Track, PxSize::new(Px(width), Px(4.0))),
        HostEvent::Layout(LayoutTarget::Thumb, PxSize::new(Px(20.0), Px(20.0))),
    ]
}

/// Frames covering `duration` at 60 Hz.
pub fn frames(duration: Duration) -> impl Iterator<Item = HostEvent> {
    let frame = Duration::from_micros(16_667);
    let count = duration.as_micros().div_ceil(frame.as_micros());
    // First frame sets the animation clock.
    std::iter::once(HostEvent::Frame(Duration::ZERO))
        .chain((0..count).map(move |_| HostEvent::Frame(frame)))
}
