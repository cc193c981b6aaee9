//! Animation profiles and the animator adapter.
//!
//! The slider engine never interpolates values itself. It hands a target and
//! an [`AnimationProfile`] to an [`Animator`] and moves on. Hosts with their
//! own animation system implement [`Animator`]; hosts without one can use
//! [`FrameAnimator`] and call [`FrameAnimator::tick`] once per frame.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::trace;

use crate::animated_value::AnimatedValue;

/// Default spring friction.
pub const DEFAULT_SPRING_FRICTION: f32 = 7.0;
/// Default spring tension.
pub const DEFAULT_SPRING_TENSION: f32 = 100.0;
/// Default timing duration.
pub const DEFAULT_TIMING_DURATION: Duration = Duration::from_millis(150);

const SPRING_REST_DISPLACEMENT: f32 = 0.001;
const SPRING_REST_VELOCITY: f32 = 0.001;
const MAX_SPRING_SUBSTEP: f32 = 1.0 / 120.0;
const MAX_FRAME_DELTA: f32 = 0.25;

/// Which kind of animation external value updates use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationType {
    /// Damped spring.
    Spring,
    /// Fixed-duration eased interpolation.
    #[default]
    Timing,
}

/// Easing curves for timing animations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cubic ease-in-out.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress in `[0.0, 1.0]` to eased progress in `[0.0, 1.0]`.
    pub fn apply(self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Spring parameters expressed as friction and tension.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    /// Damping of the spring.
    pub friction: f32,
    /// Stiffness of the spring.
    pub tension: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            friction: DEFAULT_SPRING_FRICTION,
            tension: DEFAULT_SPRING_TENSION,
        }
    }
}

impl SpringConfig {
    /// Stiffness of an equivalent unit-mass spring.
    pub fn stiffness(&self) -> f32 {
        ((self.tension - 30.0) * 3.62 + 194.0).max(0.0)
    }

    /// Damping coefficient of an equivalent unit-mass spring.
    pub fn damping(&self) -> f32 {
        ((self.friction - 8.0) * 3.0 + 25.0).max(0.0)
    }
}

/// Parameters for timing animations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingConfig {
    /// Length of the interpolation.
    pub duration: Duration,
    /// Wait before the interpolation starts.
    pub delay: Duration,
    /// Curve applied to linear progress.
    pub easing: Easing,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_TIMING_DURATION,
            delay: Duration::ZERO,
            easing: Easing::EaseInOut,
        }
    }
}

/// Per-type overrides supplied by the host.
///
/// Unset entries fall back to the defaults for that type.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationConfig {
    /// Override for spring animations.
    pub spring: Option<SpringConfig>,
    /// Override for timing animations.
    pub timing: Option<TimingConfig>,
}

impl AnimationConfig {
    /// Resolves the profile used for `kind`.
    pub fn profile(&self, kind: AnimationType) -> AnimationProfile {
        match kind {
            AnimationType::Spring => AnimationProfile::Spring(self.spring.unwrap_or_default()),
            AnimationType::Timing => AnimationProfile::Timing(self.timing.unwrap_or_default()),
        }
    }
}

/// A fully resolved animation description.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationProfile {
    /// Damped spring toward the target.
    Spring(SpringConfig),
    /// Eased interpolation over a fixed duration.
    Timing(TimingConfig),
}

impl Default for AnimationProfile {
    fn default() -> Self {
        AnimationProfile::Timing(TimingConfig::default())
    }
}

/// Drives an [`AnimatedValue`] toward a target over time.
///
/// Implementations must not block. Starting an animation on a value that is
/// already animating replaces the running animation.
pub trait Animator: Send + Sync {
    /// Starts animating `value` toward `target`.
    fn start(&self, value: &AnimatedValue, target: f32, profile: &AnimationProfile);

    /// Stops any animation running on `value`, leaving it where it is.
    fn stop(&self, _value: &AnimatedValue) {}
}

/// Animator that jumps straight to the target.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateAnimator;

impl Animator for ImmediateAnimator {
    fn start(&self, value: &AnimatedValue, target: f32, _profile: &AnimationProfile) {
        value.set(target);
    }
}

#[derive(Debug)]
struct RunningAnimation {
    value: AnimatedValue,
    from: f32,
    target: f32,
    profile: AnimationProfile,
    started_at: Option<Instant>,
    last_tick: Option<Instant>,
    current: f32,
    velocity: f32,
}

impl RunningAnimation {
    /// Advances to `now`. Returns `true` once the animation has settled.
    fn advance(&mut self, now: Instant) -> bool {
        match self.profile {
            AnimationProfile::Timing(config) => {
                let started_at = *self.started_at.get_or_insert(now);
                let elapsed = now.saturating_duration_since(started_at);
                if elapsed < config.delay {
                    return false;
                }
                let running = elapsed - config.delay;
                if config.duration.is_zero() || running >= config.duration {
                    self.current = self.target;
                    return true;
                }
                let progress = running.as_secs_f32() / config.duration.as_secs_f32();
                self.current = self.from + (self.target - self.from) * config.easing.apply(progress);
                false
            }
            AnimationProfile::Spring(config) => {
                let dt = match self.last_tick {
                    Some(last) => now.saturating_duration_since(last).as_secs_f32(),
                    None => 1.0 / 60.0,
                };
                self.last_tick = Some(now);
                self.step_spring(dt.min(MAX_FRAME_DELTA), config)
            }
        }
    }

    fn step_spring(&mut self, dt: f32, config: SpringConfig) -> bool {
        let stiffness = config.stiffness();
        if stiffness == 0.0 {
            self.current = self.target;
            return true;
        }
        let damping = config.damping();

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_SPRING_SUBSTEP);
            let displacement = self.current - self.target;
            let acceleration = -stiffness * displacement - damping * self.velocity;
            self.velocity += acceleration * h;
            self.current += self.velocity * h;
            remaining -= h;
        }

        if (self.current - self.target).abs() < SPRING_REST_DISPLACEMENT
            && self.velocity.abs() < SPRING_REST_VELOCITY
        {
            self.current = self.target;
            self.velocity = 0.0;
            return true;
        }
        false
    }
}

/// Frame-driven animator.
///
/// Animations start on [`Animator::start`] and advance on every
/// [`FrameAnimator::tick`]. The first tick after a start establishes the
/// animation's time origin.
#[derive(Debug, Default)]
pub struct FrameAnimator {
    running: Mutex<Vec<RunningAnimation>>,
}

impl FrameAnimator {
    /// Creates an idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances every running animation to `now` and writes the new values.
    ///
    /// Returns `true` while at least one animation is still running.
    pub fn tick(&self, now: Instant) -> bool {
        let (updates, still_running) = {
            let mut running = self.running.lock();
            let mut updates = Vec::with_capacity(running.len());
            running.retain_mut(|animation| {
                let settled = animation.advance(now);
                updates.push((animation.value.clone(), animation.current));
                !settled
            });
            (updates, !running.is_empty())
        };

        for (value, current) in updates {
            value.set(current);
        }
        still_running
    }

    /// Returns `true` while any animation is running.
    pub fn is_animating(&self) -> bool {
        !self.running.lock().is_empty()
    }

    /// Returns `true` while `value` is being animated.
    pub fn is_animating_value(&self, value: &AnimatedValue) -> bool {
        self.running
            .lock()
            .iter()
            .any(|animation| animation.value.id() == value.id())
    }

    /// Stops the animation on `value`, leaving it at its current value.
    pub fn cancel(&self, value: &AnimatedValue) {
        self.running
            .lock()
            .retain(|animation| animation.value.id() != value.id());
    }
}

impl Animator for FrameAnimator {
    fn start(&self, value: &AnimatedValue, target: f32, profile: &AnimationProfile) {
        let from = value.get();
        trace!(value_id = value.id(), from, target, ?profile, "starting animation");
        let mut running = self.running.lock();
        running.retain(|animation| animation.value.id() != value.id());
        running.push(RunningAnimation {
            value: value.clone(),
            from,
            target,
            profile: *profile,
            started_at: None,
            last_tick: None,
            current: from,
            velocity: 0.0,
        });
    }

    fn stop(&self, value: &AnimatedValue) {
        self.cancel(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(Easing::EaseInOut.apply(0.0), 0.0);
        assert_eq!(Easing::EaseInOut.apply(1.0), 1.0);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(Easing::Linear.apply(0.3), 0.3);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn config_falls_back_to_defaults() {
        let config = AnimationConfig::default();
        assert_eq!(
            config.profile(AnimationType::Spring),
            AnimationProfile::Spring(SpringConfig {
                friction: 7.0,
                tension: 100.0
            })
        );
        match config.profile(AnimationType::Timing) {
            AnimationProfile::Timing(timing) => {
                assert_eq!(timing.duration, Duration::from_millis(150));
                assert_eq!(timing.delay, Duration::ZERO);
            }
            other => panic!("unexpected profile {other:?}"),
        }
    }

    #[test]
    fn timing_animation_reaches_target_after_duration() {
        let animator = FrameAnimator::new();
        let value = AnimatedValue::new(0.0);
        value.animate_to(1.0, &AnimationProfile::default(), &animator);

        let t0 = Instant::now();
        assert!(animator.tick(t0));
        assert_eq!(value.get(), 0.0);

        assert!(animator.tick(t0 + Duration::from_millis(75)));
        let mid = value.get();
        assert!(mid > 0.0 && mid < 1.0, "mid value {mid}");

        assert!(!animator.tick(t0 + Duration::from_millis(150)));
        assert_eq!(value.get(), 1.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn timing_animation_honors_delay() {
        let animator = FrameAnimator::new();
        let value = AnimatedValue::new(0.0);
        let profile = AnimationProfile::Timing(TimingConfig {
            delay: Duration::from_millis(100),
            easing: Easing::Linear,
            ..TimingConfig::default()
        });
        animator.start(&value, 1.0, &profile);

        let t0 = Instant::now();
        animator.tick(t0);
        animator.tick(t0 + Duration::from_millis(90));
        assert_eq!(value.get(), 0.0);
        animator.tick(t0 + Duration::from_millis(175));
        assert!((value.get() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn spring_animation_settles_on_target() {
        let animator = FrameAnimator::new();
        let value = AnimatedValue::new(0.0);
        animator.start(&value, 1.0, &AnimationProfile::Spring(SpringConfig::default()));

        let t0 = Instant::now();
        let mut frame = 0;
        while animator.tick(t0 + Duration::from_millis(16 * frame)) {
            frame += 1;
            assert!(frame < 1_000, "spring never settled");
        }
        assert_eq!(value.get(), 1.0);
    }

    #[test]
    fn last_start_wins() {
        let animator = FrameAnimator::new();
        let value = AnimatedValue::new(0.0);
        let profile = AnimationProfile::Timing(TimingConfig {
            duration: Duration::ZERO,
            ..TimingConfig::default()
        });
        animator.start(&value, 1.0, &profile);
        animator.start(&value, 0.25, &profile);
        assert!(animator.is_animating_value(&value));

        animator.tick(Instant::now());
        assert_eq!(value.get(), 0.25);
        assert!(!animator.is_animating_value(&value));
    }

    #[test]
    fn cancel_leaves_value_in_place() {
        let animator = FrameAnimator::new();
        let value = AnimatedValue::new(0.5);
        animator.start(&value, 1.0, &AnimationProfile::default());
        animator.cancel(&value);
        assert!(!animator.tick(Instant::now()));
        assert_eq!(value.get(), 0.5);
    }

    #[test]
    fn immediate_animator_sets_target() {
        let value = AnimatedValue::new(0.0);
        value.animate_to(0.8, &AnimationProfile::default(), &ImmediateAnimator);
        assert_eq!(value.get(), 0.8);
    }
}
