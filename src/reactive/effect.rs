use std::cell::Cell;
use std::rc::Rc;

use super::owner::{
    OwnerId, current_owner, dispose_owner, effect_has_owner, register_effect, with_parent_owner,
};
use super::runtime::{EffectId, run_effect, try_with_runtime, with_runtime};

/// A side effect that re-runs whenever a signal it read changes.
///
/// Each run executes inside a fresh owner scope, so [`on_cleanup`] called
/// from the effect body registers teardown for that run. The previous run's
/// scope is disposed right before the next run and when the effect itself is
/// disposed.
///
/// An effect created inside an owner lives until that owner is disposed;
/// otherwise it lives as long as the returned handle.
///
/// [`on_cleanup`]: super::on_cleanup
pub struct Effect {
    id: EffectId,
    last_run: Rc<Cell<Option<OwnerId>>>,
}

impl Effect {
    pub fn new<F>(mut f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let parent = current_owner();
        let last_run: Rc<Cell<Option<OwnerId>>> = Rc::new(Cell::new(None));

        let run_scope = last_run.clone();
        let callback = move || {
            if let Some(previous) = run_scope.take() {
                dispose_owner(previous);
            }
            let ((), scope) = with_parent_owner(parent, &mut f);
            run_scope.set(Some(scope));
        };

        let id = with_runtime(|rt| rt.allocate_effect(Box::new(callback)));
        register_effect(id);
        run_effect(id);

        Self { id, last_run }
    }

    pub fn id(&self) -> EffectId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        with_runtime(|rt| rt.is_effect_alive(self.id))
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        // Owned effects are released by their owner
        if effect_has_owner(self.id) {
            return;
        }
        try_with_runtime(|rt| rt.dispose_effect(self.id));
        if let Some(scope) = self.last_run.take() {
            dispose_owner(scope);
        }
    }
}

pub fn create_effect<F>(f: F) -> Effect
where
    F: FnMut() + 'static,
{
    Effect::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{create_signal, on_cleanup, with_owner};
    use std::cell::RefCell;

    #[test]
    fn test_cleanup_runs_before_each_rerun() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let count = create_signal(0);

        let entries = log.clone();
        let source = count.clone();
        let _effect = create_effect(move || {
            let value = source.get();
            entries.borrow_mut().push(format!("run {value}"));
            let entries = entries.clone();
            on_cleanup(move || entries.borrow_mut().push(format!("cleanup {value}")));
        });

        count.set(1);
        count.set(1);

        assert_eq!(*log.borrow(), vec!["run 0", "cleanup 0", "run 1"]);
    }

    #[test]
    fn test_drop_unowned_effect_stops_updates_and_cleans_up() {
        let runs = Rc::new(Cell::new(0));
        let cleaned = Rc::new(Cell::new(false));
        let count = create_signal(0);

        let counter = runs.clone();
        let flag = cleaned.clone();
        let source = count.clone();
        let effect = create_effect(move || {
            source.get();
            counter.set(counter.get() + 1);
            let flag = flag.clone();
            on_cleanup(move || flag.set(true));
        });

        drop(effect);
        assert!(cleaned.get());

        count.set(5);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_owned_effect_outlives_handle_until_owner_disposed() {
        let runs = Rc::new(Cell::new(0));
        let count = create_signal(0);

        let counter = runs.clone();
        let source = count.clone();
        let (effect_id, owner) = with_owner(|| {
            let effect = create_effect(move || {
                source.get();
                counter.set(counter.get() + 1);
            });
            effect.id()
        });

        count.set(1);
        assert_eq!(runs.get(), 2);

        dispose_owner(owner);
        assert!(!with_runtime(|rt| rt.is_effect_alive(effect_id)));

        count.set(2);
        assert_eq!(runs.get(), 2);
    }
}
