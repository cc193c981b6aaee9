//! Notification handlers carried in slider args.
//!
//! A [`CallbackWith`] wraps a shared closure. Two handles are equal only when
//! they wrap the same closure, so args structs holding them can still derive
//! `PartialEq`.

use std::{fmt, sync::Arc};

/// Shared `Fn(T) -> R` handler compared by identity.
///
/// Used for the slider notifications and for value listeners.
pub struct CallbackWith<T, R = ()> {
    handler: Arc<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Wraps `handler`.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Runs the handler with `value`.
    pub fn call(&self, value: T) -> R {
        (self.handler)(value)
    }
}

impl<T> Default for CallbackWith<T> {
    fn default() -> Self {
        Self::new(|_| {})
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackWith")
            .field("handler", &Arc::as_ptr(&self.handler).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn handles_compare_by_identity() {
        let a = CallbackWith::<f32>::new(|_| {});
        let b = a.clone();
        let c = CallbackWith::<f32>::new(|_| {});
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn call_forwards_argument() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let on_step = CallbackWith::new(move |n: usize| {
            counter.fetch_add(n, Ordering::SeqCst);
        });
        on_step.call(3);
        on_step.call(4);
        assert_eq!(hits.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn handler_can_return_a_value() {
        let double = CallbackWith::new(|x: f32| x * 2.0);
        assert_eq!(double.call(1.5), 3.0);
    }
}
