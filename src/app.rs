//! Application-wide provider.
//!
//! Widgets read cross-cutting settings from context instead of globals. The
//! provider puts them there, runs the view inside a root owner and tears
//! everything down when its scope ends.

use crate::reactive::{
    OwnerId, Signal, dispose_owner, provide_context, provide_signal_context, reset_reactive,
    with_owner,
};
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub theme: Theme,
    /// Initialise `env_logger` when the provider runs
    pub init_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            init_logging: true,
        }
    }
}

pub struct AppProvider {
    config: AppConfig,
}

impl AppProvider {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    pub fn init_logging(mut self, enabled: bool) -> Self {
        self.config.init_logging = enabled;
        self
    }

    /// Provide the configuration as context and run `view` in a root owner.
    ///
    /// The returned [`ProviderScope`] owns everything `view` created; keep it
    /// alive for as long as the view should stay live.
    pub fn run<R>(self, view: impl FnOnce() -> R) -> (R, ProviderScope) {
        if self.config.init_logging {
            // A logger may already be installed by the host application
            let _ = env_logger::try_init();
        }

        let theme = provide_signal_context(self.config.theme.clone());
        provide_context(self.config.clone());
        log::debug!("app provider started with {:?}", self.config.theme);

        let (result, owner) = with_owner(view);
        (result, ProviderScope { owner, theme })
    }
}

impl Default for AppProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a provider's view alive. Dropping it disposes the root owner and
/// clears the provided context.
pub struct ProviderScope {
    owner: OwnerId,
    theme: Signal<Theme>,
}

impl ProviderScope {
    /// The theme signal shared with every widget under this provider.
    pub fn theme(&self) -> Signal<Theme> {
        self.theme.clone()
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }
}

impl Drop for ProviderScope {
    fn drop(&mut self) {
        dispose_owner(self.owner);
        reset_reactive();
        log::debug!("app provider scope ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{expect_context, has_context, is_owner_alive, on_cleanup};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_run_provides_theme_and_config() {
        let theme = Theme::default().durations(120.0, 480.0);
        let (seen, _scope) = AppProvider::new()
            .init_logging(false)
            .theme(theme.clone())
            .run(|| expect_context::<Signal<Theme>>().get());

        assert_eq!(seen, theme);
        assert_eq!(expect_context::<AppConfig>().theme, theme);
    }

    #[test]
    fn test_dropping_scope_disposes_view() {
        let cleaned = Rc::new(Cell::new(false));

        let flag = cleaned.clone();
        let ((), scope) = AppProvider::new().init_logging(false).run(move || {
            on_cleanup(move || flag.set(true));
        });
        let owner = scope.owner();

        drop(scope);
        assert!(cleaned.get());
        assert!(!is_owner_alive(owner));
        assert!(!has_context::<AppConfig>());
    }
}
