//! Login page: username/password against `/login`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::{BrowserClient, paths};
use crate::components::error_alert::ErrorAlert;
use crate::error::AlertContent;
use crate::net::types::Credentials;
use crate::state::store::Store;
use crate::util::nav::install_navigation;

/// Check the raw form fields before any request is made.
///
/// # Errors
///
/// Returns the message to show when a field is blank.
pub fn validate_credentials(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Username is required");
    }
    if password.is_empty() {
        return Err("Password is required");
    }
    Ok(Credentials::new(username, password))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = expect_context::<Store>();
    let client = expect_context::<BrowserClient>();
    let go_to = RwSignal::new(None::<String>);
    install_navigation(go_to, use_navigate());

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let alert = RwSignal::new(None::<AlertContent>);
    let busy = move || store.auth().loading;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy() {
            return;
        }
        let credentials = match validate_credentials(&username.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                alert.set(Some(AlertContent::from_message(message)));
                return;
            }
        };
        alert.set(None);
        let client = client.clone();
        leptos::task::spawn_local(async move {
            match crate::state::thunks::login(&store, &client, credentials).await {
                Ok(_) => go_to.set(Some(paths::PRODUCTS.to_owned())),
                Err(e) => {
                    password.set(String::new());
                    alert.set(Some(e.alert()));
                }
            }
        });
    };

    view! {
        <section class="auth-page">
            <div class="auth-card">
                <h1>"Login"</h1>
                <ErrorAlert alert=alert on_dismiss=Callback::new(move |()| alert.set(None))/>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=busy>
                        {move || if busy() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "No account yet? "
                    <A href=paths::SIGNUP>"Sign up"</A>
                </p>
            </div>
        </section>
    }
}
