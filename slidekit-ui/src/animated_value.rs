//! Reactive numeric value backing each slider thumb.
//!
//! An [`AnimatedValue`] is a shared handle to a single `f32`. It can be set
//! synchronously, observed through listeners, and driven toward a target by
//! an [`Animator`]. Clones share the same storage.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use parking_lot::RwLock;
use smallvec::SmallVec;

use crate::{
    animation::{AnimationProfile, Animator},
    prop::CallbackWith,
};

static NEXT_VALUE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier returned by [`AnimatedValue::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct ValueInner {
    id: u64,
    value: RwLock<f32>,
    listeners: RwLock<SmallVec<[(ListenerId, CallbackWith<f32>); 2]>>,
    next_listener: AtomicU64,
}

/// Shared handle to a reactive `f32`.
///
/// Listeners run after the internal lock is released, so a listener may read
/// this value or any other `AnimatedValue`.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, atomic::{AtomicU32, Ordering}};
/// use slidekit_ui::animated_value::AnimatedValue;
///
/// let value = AnimatedValue::new(0.0);
/// let seen = Arc::new(AtomicU32::new(0));
/// let seen_clone = Arc::clone(&seen);
/// value.add_listener(move |v: f32| seen_clone.store(v.to_bits(), Ordering::SeqCst));
///
/// value.set(0.25);
/// assert_eq!(value.get(), 0.25);
/// assert_eq!(f32::from_bits(seen.load(Ordering::SeqCst)), 0.25);
/// ```
#[derive(Clone)]
pub struct AnimatedValue {
    inner: Arc<ValueInner>,
}

impl AnimatedValue {
    /// Creates a new value.
    pub fn new(initial: f32) -> Self {
        Self {
            inner: Arc::new(ValueInner {
                id: NEXT_VALUE_ID.fetch_add(1, Ordering::Relaxed),
                value: RwLock::new(initial),
                listeners: RwLock::new(SmallVec::new()),
                next_listener: AtomicU64::new(1),
            }),
        }
    }

    /// Process-unique identity of the underlying storage.
    ///
    /// Animators key running animations by this id so that a new animation on
    /// the same value replaces the one in flight.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Returns the current value.
    pub fn get(&self) -> f32 {
        *self.inner.value.read()
    }

    /// Replaces the current value and notifies listeners when it changed.
    pub fn set(&self, value: f32) {
        {
            let mut slot = self.inner.value.write();
            if slot.to_bits() == value.to_bits() {
                return;
            }
            *slot = value;
        }
        self.notify(value);
    }

    /// Registers a listener called with every new value.
    pub fn add_listener(&self, listener: impl Into<CallbackWith<f32>>) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.write().push((id, listener.into()));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.write();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Starts an animation toward `target` on `animator`.
    ///
    /// Returns immediately; the animator writes intermediate values through
    /// [`AnimatedValue::set`].
    pub fn animate_to(&self, target: f32, profile: &AnimationProfile, animator: &dyn Animator) {
        animator.start(self, target, profile);
    }

    fn notify(&self, value: f32) {
        let listeners: SmallVec<[CallbackWith<f32>; 2]> = self
            .inner
            .listeners
            .read()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for listener in listeners {
            listener.call(value);
        }
    }
}

impl PartialEq for AnimatedValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("id", &self.inner.id)
            .field("value", &self.get())
            .finish()
    }
}
