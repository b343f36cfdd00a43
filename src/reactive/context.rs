//! App-wide context for cross-cutting values.
//!
//! The provider stores its theme and configuration here so widgets can pick
//! them up without every caller threading them through. Values are keyed by
//! their concrete type, one value per type.
//!
//! Storage is a `Vec<(TypeId, Box<dyn Any>)>` scanned linearly; only a
//! handful of values are ever provided.
//!
//! Storing a `Signal<T>` is the pattern for values that change at runtime:
//!
//! ```ignore
//! let theme = provide_signal_context(Theme::default());
//!
//! // Inside a widget effect, reading it subscribes the effect
//! let theme = expect_context::<Signal<Theme>>();
//! let base = theme.get().duration_base_ms;
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;

use super::signal::{Signal, create_signal};

thread_local! {
    static CONTEXTS: RefCell<Vec<(TypeId, Box<dyn Any>)>> = const { RefCell::new(Vec::new()) };
}

/// Store a value in the context, replacing any previous value of that type.
pub fn provide_context<T: 'static>(value: T) {
    let type_id = TypeId::of::<T>();
    CONTEXTS.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        if let Some(entry) = ctx.iter_mut().find(|entry| entry.0 == type_id) {
            entry.1 = Box::new(value);
        } else {
            ctx.push((type_id, Box::new(value)));
        }
    });
}

/// Retrieve a clone of the context value of type `T`, if provided.
pub fn use_context<T: Clone + 'static>() -> Option<T> {
    with_context::<T, _>(T::clone)
}

/// Retrieve a context value, panicking if it was never provided.
///
/// # Panics
///
/// Panics with the missing type's name. Absence is a wiring mistake, not a
/// runtime condition.
pub fn expect_context<T: Clone + 'static>() -> T {
    use_context::<T>().unwrap_or_else(|| {
        panic!(
            "Context not found for type `{}`.\n\
             Did you forget to wrap the view in AppProvider::run()?",
            std::any::type_name::<T>()
        )
    })
}

/// Borrow a context value without cloning it.
pub fn with_context<T: 'static, R>(f: impl FnOnce(&T) -> R) -> Option<R> {
    let type_id = TypeId::of::<T>();
    CONTEXTS.with(|ctx| {
        let ctx = ctx.borrow();
        ctx.iter()
            .find(|entry| entry.0 == type_id)
            .and_then(|entry| entry.1.downcast_ref::<T>())
            .map(f)
    })
}

pub fn has_context<T: 'static>() -> bool {
    let type_id = TypeId::of::<T>();
    CONTEXTS.with(|ctx| ctx.borrow().iter().any(|entry| entry.0 == type_id))
}

/// Wrap `value` in a signal, store the signal as context and return it.
pub fn provide_signal_context<T: 'static>(value: T) -> Signal<T> {
    let signal = create_signal(value);
    provide_context(signal.clone());
    signal
}

/// Remove every provided value.
pub fn reset_contexts() {
    CONTEXTS.with(|ctx| ctx.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_contexts();
    }

    #[test]
    fn test_provide_and_use_context() {
        setup();
        provide_context(42u32);
        assert_eq!(use_context::<u32>(), Some(42));
        assert!(has_context::<u32>());
    }

    #[test]
    fn test_use_context_returns_none_when_missing() {
        setup();
        assert_eq!(use_context::<String>(), None);
    }

    #[test]
    #[should_panic(expected = "Context not found for type")]
    fn test_expect_context_panics_when_missing() {
        setup();
        expect_context::<f64>();
    }

    #[test]
    fn test_with_context_borrows_without_clone() {
        setup();
        provide_context(vec![1, 2, 3]);
        assert_eq!(with_context::<Vec<i32>, _>(|v| v.iter().sum::<i32>()), Some(6));
    }

    #[test]
    fn test_provide_replaces_existing() {
        setup();
        provide_context(10u32);
        provide_context(20u32);
        assert_eq!(use_context::<u32>(), Some(20));
    }

    #[test]
    fn test_provide_signal_context_shares_signal() {
        setup();
        let signal = provide_signal_context(100i32);
        let retrieved = expect_context::<Signal<i32>>();

        signal.set(200);
        assert_eq!(retrieved.get(), 200);
    }
}
