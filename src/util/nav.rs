//! Deferred navigation.
//!
//! Handlers and async tasks write a target path into a signal; one effect
//! per page performs the navigation, so `use_navigate` stays out of event
//! closures and spawned futures.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

/// Navigate whenever `target` is set, then clear it.
pub fn install_navigation<F>(target: RwSignal<Option<String>>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        if let Some(path) = target.get() {
            target.set(None);
            navigate(&path, NavigateOptions::default());
        }
    });
}
