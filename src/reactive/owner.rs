//! Reactive ownership for automatic resource cleanup.
//!
//! Effects and cleanup callbacks belong to the owner that was current when
//! they were created. Disposing an owner disposes its child owners first,
//! then runs its cleanups in reverse registration order, then disposes its
//! effects.
//!
//! ```ignore
//! let (_, owner_id) = with_owner(|| {
//!     let handle = host.on_resize(handler);
//!     on_cleanup(move || drop(handle));
//! });
//!
//! // Releases the resize registration
//! dispose_owner(owner_id);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use super::runtime::{EffectId, with_runtime};

/// Identifier for an owner in the owner arena.
///
/// Slots are reused once an owner is disposed; the generation makes a stale
/// id refer to nothing instead of to the slot's new occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OwnerId {
    index: usize,
    generation: u32,
}

struct Owner {
    parent: Option<OwnerId>,
    effects: Vec<EffectId>,
    cleanups: Vec<Box<dyn FnOnce()>>,
    children: Vec<OwnerId>,
}

impl Owner {
    fn new(parent: Option<OwnerId>) -> Self {
        Self {
            parent,
            effects: Vec::new(),
            cleanups: Vec::new(),
            children: Vec::new(),
        }
    }
}

struct Slot {
    generation: u32,
    owner: Option<Owner>,
}

struct OwnerArena {
    slots: Vec<Slot>,
    free: Vec<usize>,
    effect_owners: HashMap<EffectId, OwnerId>,
}

impl OwnerArena {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            effect_owners: HashMap::new(),
        }
    }

    fn allocate(&mut self, parent: Option<OwnerId>) -> OwnerId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.owner = Some(Owner::new(parent));
            return OwnerId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            owner: Some(Owner::new(parent)),
        });
        OwnerId {
            index,
            generation: 0,
        }
    }

    fn get(&self, id: OwnerId) -> Option<&Owner> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.owner.as_ref())
    }

    fn get_mut(&mut self, id: OwnerId) -> Option<&mut Owner> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.owner.as_mut())
    }

    fn take(&mut self, id: OwnerId) -> Option<Owner> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?;
        let owner = slot.owner.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        for effect_id in &owner.effects {
            self.effect_owners.remove(effect_id);
        }
        Some(owner)
    }
}

thread_local! {
    static CURRENT_OWNER: RefCell<Option<OwnerId>> = const { RefCell::new(None) };
    static OWNERS: RefCell<OwnerArena> = RefCell::new(OwnerArena::new());
}

/// Execute a closure within a new owner scope nested under the current owner.
///
/// Returns the closure's value and the new owner's id.
pub fn with_owner<T>(f: impl FnOnce() -> T) -> (T, OwnerId) {
    with_parent_owner(current_owner(), f)
}

/// Execute a closure within a new owner scope nested under `parent`.
///
/// Effects use this on re-runs so that their per-run scope stays attached to
/// the owner they were created in, whatever owner is current when the flush
/// happens.
pub fn with_parent_owner<T>(parent: Option<OwnerId>, f: impl FnOnce() -> T) -> (T, OwnerId) {
    let owner_id = OWNERS.with(|owners| {
        let mut owners = owners.borrow_mut();
        let id = owners.allocate(parent);

        if let Some(parent_id) = parent
            && let Some(parent_owner) = owners.get_mut(parent_id)
        {
            parent_owner.children.push(id);
        }

        id
    });

    let prev_owner = CURRENT_OWNER.with(|current| current.borrow_mut().replace(owner_id));
    let result = f();
    CURRENT_OWNER.with(|current| *current.borrow_mut() = prev_owner);

    (result, owner_id)
}

/// Get the current owner id, if any.
pub fn current_owner() -> Option<OwnerId> {
    CURRENT_OWNER.with(|current| *current.borrow())
}

/// Whether `id` still refers to a live (not yet disposed) owner.
pub fn is_owner_alive(id: OwnerId) -> bool {
    OWNERS.with(|owners| owners.borrow().get(id).is_some())
}

/// Dispose an owner and everything it owns. Disposing twice is a no-op.
pub fn dispose_owner(id: OwnerId) {
    let Some(owner) = OWNERS.with(|owners| {
        let mut owners = owners.borrow_mut();
        let owner = owners.take(id)?;
        // Effects re-run often; keep their parent's child list short
        if let Some(parent) = owner.parent.and_then(|parent| owners.get_mut(parent)) {
            parent.children.retain(|child| *child != id);
        }
        Some(owner)
    }) else {
        return;
    };

    for child_id in owner.children {
        dispose_owner(child_id);
    }

    for cleanup in owner.cleanups.into_iter().rev() {
        cleanup();
    }

    for effect_id in owner.effects {
        with_runtime(|rt| rt.dispose_effect(effect_id));
    }
}

/// Register a cleanup callback to run when the current owner is disposed.
///
/// Inside an effect the current owner is that run's scope, so the callback
/// runs before the effect's next run and when the effect is torn down.
/// Outside any owner the callback is dropped without running.
pub fn on_cleanup(f: impl FnOnce() + 'static) {
    let registered = current_owner().is_some_and(|owner_id| {
        OWNERS.with(|owners| match owners.borrow_mut().get_mut(owner_id) {
            Some(owner) => {
                owner.cleanups.push(Box::new(f));
                true
            }
            None => false,
        })
    });

    if !registered {
        log::debug!("on_cleanup called outside a live owner, callback discarded");
    }
}

pub(crate) fn register_effect(id: EffectId) {
    if let Some(owner_id) = current_owner() {
        OWNERS.with(|owners| {
            let mut owners = owners.borrow_mut();
            if let Some(owner) = owners.get_mut(owner_id) {
                owner.effects.push(id);
                owners.effect_owners.insert(id, owner_id);
            }
        });
    }
}

/// Whether a live owner currently holds `id`.
pub(crate) fn effect_has_owner(id: EffectId) -> bool {
    OWNERS.with(|owners| owners.borrow().effect_owners.contains_key(&id))
}

/// Number of slots in the owner arena, live or free.
#[cfg(test)]
pub(crate) fn owner_slot_count() -> usize {
    OWNERS.with(|owners| owners.borrow().slots.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_current_owner_outside_scope() {
        assert!(current_owner().is_none());
    }

    #[test]
    fn test_nested_owners_dispose_children_first() {
        let cleanup_order = Arc::new(Mutex::new(Vec::new()));

        let order = cleanup_order.clone();
        let (_, outer_id) = with_owner(|| {
            let order_outer = order.clone();
            on_cleanup(move || order_outer.lock().unwrap().push("outer"));

            let order_inner = order.clone();
            with_owner(|| {
                on_cleanup(move || order_inner.lock().unwrap().push("inner"));
            });
        });

        dispose_owner(outer_id);

        assert_eq!(*cleanup_order.lock().unwrap(), vec!["inner", "outer"]);
    }

    #[test]
    fn test_on_cleanup_reverse_order() {
        let cleanup_order = Arc::new(Mutex::new(Vec::new()));

        let order = cleanup_order.clone();
        let (_, owner_id) = with_owner(|| {
            for name in ["first", "second", "third"] {
                let order = order.clone();
                on_cleanup(move || order.lock().unwrap().push(name));
            }
        });

        dispose_owner(owner_id);

        assert_eq!(*cleanup_order.lock().unwrap(), vec!["third", "second", "first"]);
    }

    #[test]
    fn test_explicit_parent_survives_other_current_owner() {
        let ran = Arc::new(Mutex::new(false));
        let (_, parent) = with_owner(|| {});

        let flag = ran.clone();
        let (_, _unrelated) = with_owner(|| {
            with_parent_owner(Some(parent), || {
                on_cleanup(move || *flag.lock().unwrap() = true);
            });
        });

        dispose_owner(parent);
        assert!(*ran.lock().unwrap());
    }

    #[test]
    fn test_dispose_owner_twice_is_safe() {
        let (_, owner_id) = with_owner(|| {});
        assert!(is_owner_alive(owner_id));

        dispose_owner(owner_id);
        dispose_owner(owner_id);
        assert!(!is_owner_alive(owner_id));
    }

    #[test]
    fn test_disposed_slots_are_reused() {
        let (_, first) = with_owner(|| {});
        let slots = owner_slot_count();
        dispose_owner(first);

        let (_, second) = with_owner(|| {});
        assert_eq!(owner_slot_count(), slots);
        assert_ne!(first, second);
        assert!(is_owner_alive(second));
    }

    #[test]
    fn test_stale_id_does_not_dispose_new_occupant() {
        let ran = Arc::new(Mutex::new(false));
        let (_, stale) = with_owner(|| {});
        dispose_owner(stale);

        let flag = ran.clone();
        let (_, fresh) = with_owner(|| {
            on_cleanup(move || *flag.lock().unwrap() = true);
        });

        dispose_owner(stale);
        assert!(is_owner_alive(fresh));
        assert!(!*ran.lock().unwrap());

        dispose_owner(fresh);
        assert!(*ran.lock().unwrap());
    }
}
