use std::sync::{Arc, RwLock};

use super::runtime::{SignalId, notify_write, try_with_runtime, with_runtime};

struct SignalInner<T> {
    id: SignalId,
    value: RwLock<T>,
}

/// A reactive value.
///
/// Reading a signal inside an effect subscribes that effect; writing a
/// different value re-runs every subscriber. Writes that leave the value
/// unchanged notify nobody, which is what keeps effects from re-running on
/// an identical re-render.
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        let id = with_runtime(|rt| rt.allocate_signal());
        Self {
            inner: Arc::new(SignalInner {
                id,
                value: RwLock::new(value),
            }),
        }
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        try_with_runtime(|rt| rt.track_read(self.inner.id));
        f(&self.inner.value.read().expect("signal lock poisoned"))
    }

    pub fn with_untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.value.read().expect("signal lock poisoned"))
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    pub fn get_untracked(&self) -> T {
        self.with_untracked(T::clone)
    }
}

impl<T: PartialEq> Signal<T> {
    /// Sets the value, notifying subscribers only if it actually changed.
    pub fn set(&self, value: T) {
        write_if_changed(&self.inner, value);
    }
}

impl<T: PartialEq + Clone> Signal<T> {
    /// Updates the value in place, notifying subscribers only if it changed.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        update_if_changed(&self.inner, f);
    }
}

fn write_if_changed<T: PartialEq>(inner: &SignalInner<T>, value: T) {
    let Ok(mut guard) = inner.value.write() else {
        return; // Lock poisoned, skip update silently
    };
    if *guard != value {
        *guard = value;
        drop(guard);
        notify_write(inner.id);
    }
}

fn update_if_changed<T: PartialEq + Clone>(inner: &SignalInner<T>, f: impl FnOnce(&mut T)) {
    let Ok(mut guard) = inner.value.write() else {
        return;
    };
    let old_value = guard.clone();
    f(&mut *guard);
    if *guard != old_value {
        drop(guard);
        notify_write(inner.id);
    }
}

pub fn create_signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_signal_and_get() {
        let signal = create_signal(42);
        assert_eq!(signal.get(), 42);
    }

    #[test]
    fn test_update_with_closure() {
        let signal = create_signal(5);
        signal.update(|v| *v += 10);
        assert_eq!(signal.get(), 15);
    }

    #[test]
    fn test_unchanged_write_does_not_notify() {
        use crate::reactive::create_effect;
        use std::cell::Cell;
        use std::rc::Rc;

        let signal = create_signal(Some(7.0f32));
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        let source = signal.clone();
        let _effect = create_effect(move || {
            source.get();
            counter.set(counter.get() + 1);
        });

        signal.set(Some(7.0));
        signal.update(|value| *value = Some(7.0));
        assert_eq!(runs.get(), 1);

        signal.set(None);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_clone_shares_underlying_value() {
        let signal1 = create_signal(50);
        let signal2 = signal1.clone();

        signal1.set(75);
        assert_eq!(signal2.get(), 75);
    }

    #[test]
    fn test_with_borrows_value() {
        let signal = create_signal(String::from("hello"));
        assert_eq!(signal.with(|s| s.len()), 5);
        assert_eq!(signal.with_untracked(|s| format!("{s}!")), "hello!");
    }
}
