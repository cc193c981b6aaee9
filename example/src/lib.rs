//! Demo host for slidekit.
//!
//! Replays a few scripted interactions (a volume slider, a two-thumb price
//! filter and a disabled vertical level meter) and logs what a renderer
//! would draw after each.

use std::time::Duration;

use slidekit_components::slider::{LayoutTarget, SliderArgs, SliderError, SliderValue};
use slidekit_ui::{AnimationType, Orientation, Px, PxSize, logging::init_tracing};
use tracing::info;

pub mod host;

use host::{HostEvent, ScriptedHost, frames, horizontal_layout};

fn report(host: &ScriptedHost, name: &str) {
    let layout = host.render();
    info!(
        slider = name,
        value = ?host.slider().value(),
        offsets = ?layout.thumb_offsets,
        segment = ?layout.active_segment,
        "rendered"
    );
}

fn volume() -> Result<(), SliderError> {
    let args = SliderArgs::default()
        .maximum_value(100.0)
        .step(5.0)
        .value(SliderValue::Scalar(40.0))
        .track_clickable(true)
        .track_marks(vec![0.0_f32, 50.0, 100.0]);
    let mut host = ScriptedHost::new("volume", args)?;
    host.run(horizontal_layout(300.0));
    report(&host, "volume");

    // Tap the track near the end, then drag back a little.
    host.run([
        HostEvent::Down {
            touch: 1,
            x: 250.0,
            y: 20.0,
        },
        HostEvent::Move {
            touch: 1,
            dx: -30.0,
            dy: 2.0,
        },
        HostEvent::Up {
            touch: 1,
            dx: -40.0,
            dy: 2.0,
        },
    ]);
    report(&host, "volume");
    Ok(())
}

fn price_filter() -> Result<(), SliderError> {
    let args = SliderArgs::default()
        .minimum_value(0.0)
        .maximum_value(500.0)
        .step(10.0)
        .value(SliderValue::Vector(vec![100.0, 400.0]))
        .animate_transitions(true)
        .animation_type(AnimationType::Spring);
    let mut host = ScriptedHost::new("price", args)?;
    host.run(horizontal_layout(320.0));
    report(&host, "price");

    // Two fingers at once: the lower thumb is pushed against the upper one.
    let lower = host.render().touch_rects[0];
    let upper = host.render().touch_rects[1];
    host.run([
        HostEvent::Down {
            touch: 1,
            x: lower.x.0 + lower.width.0 / 2.0,
            y: 20.0,
        },
        HostEvent::Down {
            touch: 2,
            x: upper.x.0 + upper.width.0 / 2.0,
            y: 20.0,
        },
        HostEvent::Move {
            touch: 2,
            dx: -60.0,
            dy: 0.0,
        },
        HostEvent::Move {
            touch: 1,
            dx: 250.0,
            dy: 0.0,
        },
        HostEvent::Up {
            touch: 2,
            dx: -60.0,
            dy: 0.0,
        },
        HostEvent::Cancel { touch: 1 },
    ]);
    report(&host, "price");

    // The app resets the filter; the thumbs spring back.
    host.dispatch(HostEvent::SetValue(SliderValue::Vector(vec![0.0, 500.0])));
    host.run(frames(Duration::from_secs(2)));
    report(&host, "price");
    Ok(())
}

fn level_meter() -> Result<(), SliderError> {
    let args = SliderArgs::default()
        .orientation(Orientation::Vertical)
        .value(SliderValue::Scalar(0.25))
        .disabled(true);
    let mut host = ScriptedHost::new("level", args)?;
    host.run([
        HostEvent::Layout(LayoutTarget::Container, PxSize::new(Px(40.0), Px(200.0))),
        HostEvent::Layout(LayoutTarget::Track, PxSize::new(Px(4.0), Px(200.0))),
        HostEvent::Layout(LayoutTarget::Thumb, PxSize::new(Px(20.0), Px(20.0))),
    ]);

    // Disabled: the touch may still grab the thumb, but the drag is frozen
    // and no change or completion is reported.
    host.run([
        HostEvent::Down {
            touch: 1,
            x: 20.0,
            y: 55.0,
        },
        HostEvent::Up {
            touch: 1,
            dx: 0.0,
            dy: 80.0,
        },
    ]);
    report(&host, "level");
    Ok(())
}

/// Runs every demo script.
pub fn desktop_main() -> Result<(), SliderError> {
    init_tracing();
    volume()?;
    price_filter()?;
    level_meter()?;
    Ok(())
}
