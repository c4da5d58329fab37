//! Alert banner: the single rendering surface for errors and notices.

#[cfg(test)]
#[path = "error_alert_test.rs"]
mod error_alert_test;

use leptos::prelude::*;

use crate::error::{AlertContent, Severity};

/// CSS classes for an alert of `severity`.
#[must_use]
pub fn alert_class(severity: Severity) -> String {
    format!("alert alert--{}", severity.css_modifier())
}

/// Shows `alert` when set; the dismiss button appears only with `on_dismiss`.
#[component]
pub fn ErrorAlert(
    #[prop(into)] alert: Signal<Option<AlertContent>>,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        alert.get().map(|content| {
            view! {
                <div class=alert_class(content.severity) role="alert">
                    <strong class="alert__title">{content.title}</strong>
                    <span class="alert__message">{content.message}</span>
                    {on_dismiss.map(|dismiss| {
                        view! {
                            <button
                                class="alert__dismiss"
                                type="button"
                                aria-label="Dismiss"
                                on:click=move |_| dismiss.run(())
                            >
                                "✕"
                            </button>
                        }
                    })}
                </div>
            }
        })
    }
}
