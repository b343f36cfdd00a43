use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
}

pub type SignalId = usize;
pub type EffectId = usize;

type EffectCallback = Rc<RefCell<Box<dyn FnMut()>>>;

/// Dependency graph between signals and effects for the current thread.
///
/// Effect callbacks are never invoked while the runtime is borrowed: the
/// callback is cloned out first, so effects are free to read and write
/// signals, create nested effects, or dispose owners.
#[derive(Default)]
pub struct Runtime {
    current_effect: Option<EffectId>,
    pending_effects: BTreeSet<EffectId>,
    effect_callbacks: Vec<Option<EffectCallback>>,
    effect_dependencies: Vec<HashSet<SignalId>>,
    signal_subscribers: Vec<HashSet<EffectId>>,
    batch_depth: usize,
    flushing: bool,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_signal(&mut self) -> SignalId {
        let id = self.signal_subscribers.len();
        self.signal_subscribers.push(HashSet::new());
        id
    }

    pub fn allocate_effect(&mut self, callback: Box<dyn FnMut()>) -> EffectId {
        let id = self.effect_callbacks.len();
        self.effect_callbacks.push(Some(Rc::new(RefCell::new(callback))));
        self.effect_dependencies.push(HashSet::new());
        id
    }

    pub fn track_read(&mut self, signal_id: SignalId) {
        // Signals created on another thread are unknown to this runtime
        if signal_id >= self.signal_subscribers.len() {
            return;
        }

        if let Some(effect_id) = self.current_effect {
            self.signal_subscribers[signal_id].insert(effect_id);
            self.effect_dependencies[effect_id].insert(signal_id);
        }
    }

    fn queue_subscribers(&mut self, signal_id: SignalId) {
        if signal_id >= self.signal_subscribers.len() {
            return;
        }
        self.pending_effects
            .extend(self.signal_subscribers[signal_id].iter().copied());
    }

    fn begin_effect(&mut self, effect_id: EffectId) -> Option<(EffectCallback, Option<EffectId>)> {
        let callback = self.effect_callbacks.get(effect_id)?.clone()?;

        // Dependencies are re-collected on every run
        let old_deps = std::mem::take(&mut self.effect_dependencies[effect_id]);
        for signal_id in old_deps {
            self.signal_subscribers[signal_id].remove(&effect_id);
        }

        let prev_effect = self.current_effect.replace(effect_id);
        Some((callback, prev_effect))
    }

    fn begin_flush(&mut self) -> bool {
        if self.flushing || self.batch_depth > 0 {
            return false;
        }
        self.flushing = true;
        true
    }

    pub fn is_effect_alive(&self, effect_id: EffectId) -> bool {
        matches!(self.effect_callbacks.get(effect_id), Some(Some(_)))
    }

    pub fn dispose_effect(&mut self, effect_id: EffectId) {
        let Some(slot) = self.effect_callbacks.get_mut(effect_id) else {
            return;
        };
        *slot = None;

        let deps = std::mem::take(&mut self.effect_dependencies[effect_id]);
        for signal_id in deps {
            if signal_id < self.signal_subscribers.len() {
                self.signal_subscribers[signal_id].remove(&effect_id);
            }
        }
        self.pending_effects.remove(&effect_id);
    }
}

pub fn with_runtime<F, R>(f: F) -> R
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Try to access the runtime without panicking.
///
/// Skips the callback when the runtime is already borrowed or the thread-local
/// has been torn down.
pub fn try_with_runtime<F>(f: F)
where
    F: FnOnce(&mut Runtime),
{
    let _ = RUNTIME.try_with(|rt| {
        if let Ok(mut runtime) = rt.try_borrow_mut() {
            f(&mut runtime);
        }
    });
}

/// Run an effect once, collecting the signals it reads as its new dependencies.
pub fn run_effect(effect_id: EffectId) {
    let Some((callback, prev_effect)) = with_runtime(|rt| rt.begin_effect(effect_id)) else {
        return;
    };

    match callback.try_borrow_mut() {
        Ok(mut callback) => (*callback)(),
        Err(_) => log::debug!("effect {effect_id} re-entered itself, skipping nested run"),
    }

    with_runtime(|rt| rt.current_effect = prev_effect);
}

/// Queue every subscriber of `signal_id` and flush unless inside a batch.
pub fn notify_write(signal_id: SignalId) {
    let known = RUNTIME
        .try_with(|rt| match rt.try_borrow_mut() {
            Ok(mut rt) => {
                rt.queue_subscribers(signal_id);
                true
            }
            Err(_) => false,
        })
        .unwrap_or(false);

    if known {
        flush_effects();
    }
}

pub fn flush_effects() {
    if !with_runtime(|rt| rt.begin_flush()) {
        return;
    }

    while let Some(effect_id) = with_runtime(|rt| rt.pending_effects.pop_first()) {
        run_effect(effect_id);
    }

    with_runtime(|rt| rt.flushing = false);
}

/// Run `f` without subscribing the running effect to anything it reads.
pub fn untrack<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let prev_effect = with_runtime(|rt| rt.current_effect.take());
    let _restore = RestoreEffect(prev_effect);
    f()
}

struct RestoreEffect(Option<EffectId>);

impl Drop for RestoreEffect {
    fn drop(&mut self) {
        let prev_effect = self.0;
        try_with_runtime(|rt| rt.current_effect = prev_effect);
    }
}

struct BatchGuard;

impl Drop for BatchGuard {
    fn drop(&mut self) {
        try_with_runtime(|rt| rt.batch_depth = rt.batch_depth.saturating_sub(1));
    }
}

/// Group several signal writes so dependent effects run once, afterwards.
pub fn batch<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    with_runtime(|rt| rt.batch_depth += 1);
    let result = {
        // Lowers the depth again even if `f` unwinds
        let _guard = BatchGuard;
        f()
    };

    flush_effects();
    result
}
