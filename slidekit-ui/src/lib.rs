//! Primitives shared by the slidekit slider engine and its hosts.
//!
//! # Overview
//!
//! - [`px`]: pixel geometry and hit-testing rectangles
//! - [`prop`]: identity-compared callback handles
//! - [`animated_value`]: the reactive value each thumb is stored in
//! - [`animation`]: animation profiles and the [`Animator`] adapter
//! - [`logging`]: tracing subscriber setup
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use slidekit_ui::{AnimatedValue, AnimationProfile, FrameAnimator};
//!
//! let animator = FrameAnimator::new();
//! let value = AnimatedValue::new(0.0);
//! value.animate_to(1.0, &AnimationProfile::default(), &animator);
//!
//! let start = Instant::now();
//! animator.tick(start);
//! animator.tick(start + Duration::from_secs(1));
//! assert_eq!(value.get(), 1.0);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animated_value;
pub mod animation;
pub mod logging;
pub mod prop;
pub mod px;

pub use animated_value::{AnimatedValue, ListenerId};
pub use animation::{
    AnimationConfig, AnimationProfile, AnimationType, Animator, Easing, FrameAnimator,
    ImmediateAnimator, SpringConfig, TimingConfig,
};
pub use prop::CallbackWith;
pub use px::{Orientation, Px, PxPosition, PxRect, PxSize};
