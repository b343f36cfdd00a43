pub mod context;
pub mod effect;
pub mod maybe_dyn;
pub mod owner;
pub mod runtime;
pub mod signal;

pub use context::{
    expect_context, has_context, provide_context, provide_signal_context, use_context, with_context,
};
pub use effect::{Effect, create_effect};
pub use maybe_dyn::{IntoMaybeDyn, MaybeDyn};
pub use owner::{OwnerId, current_owner, dispose_owner, is_owner_alive, on_cleanup, with_owner};
pub use runtime::{batch, untrack};
pub use signal::{Signal, create_signal};

/// Reset thread-local state that outlives individual owners.
///
/// Called when an [`AppProvider`](crate::app::AppProvider) scope ends so a
/// later provider starts from an empty context.
pub(crate) fn reset_reactive() {
    context::reset_contexts();
}
