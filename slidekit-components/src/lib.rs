//! The slidekit slider engine.
//!
//! A [`slider::Slider`] owns one or more thumbs on a linear track. The host
//! reports measured sizes and raw touch samples; the slider turns them into
//! domain values, keeps the thumbs ordered and calls back with the result.
//!
//! # Example
//!
//! ```
//! use slidekit_components::slider::{LayoutTarget, Slider, SliderArgs, TouchId};
//! use slidekit_ui::{Px, PxPosition, PxSize};
//!
//! let mut slider = Slider::new(SliderArgs::default()).expect("valid args");
//! slider.record_layout(LayoutTarget::Container, PxSize::new(Px(300.0), Px(40.0)));
//! slider.record_layout(LayoutTarget::Track, PxSize::new(Px(300.0), Px(4.0)));
//! slider.record_layout(LayoutTarget::Thumb, PxSize::new(Px(20.0), Px(20.0)));
//!
//! let touch = TouchId(0);
//! assert!(slider.start(touch, PxPosition::new(Px(10.0), Px(20.0))));
//! slider.end(touch, Px(140.0), Px(0.0));
//! assert_eq!(slider.values().as_slice(), &[0.5]);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod slider;
