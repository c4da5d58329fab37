//! Signup page: creates an account via `/sign_up`, then sends the user to
//! the login page.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::login::validate_credentials;
use crate::app::{BrowserClient, paths};
use crate::components::error_alert::ErrorAlert;
use crate::error::AlertContent;
use crate::net::types::Credentials;
use crate::state::store::Store;
use crate::util::nav::install_navigation;

/// Validate the signup fields, including the password confirmation.
///
/// # Errors
///
/// Returns the message to show for the first invalid field.
pub fn validate_signup(username: &str, password: &str, confirm: &str) -> Result<Credentials, &'static str> {
    let credentials = validate_credentials(username, password)?;
    if password != confirm {
        return Err("Passwords do not match");
    }
    Ok(credentials)
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let store = expect_context::<Store>();
    let client = expect_context::<BrowserClient>();
    let go_to = RwSignal::new(None::<String>);
    install_navigation(go_to, use_navigate());

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let alert = RwSignal::new(None::<AlertContent>);
    let busy = move || store.auth().loading;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy() {
            return;
        }
        let credentials = match validate_signup(&username.get(), &password.get(), &confirm.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                alert.set(Some(AlertContent::from_message(message)));
                return;
            }
        };
        alert.set(None);
        let client = client.clone();
        leptos::task::spawn_local(async move {
            match crate::state::thunks::signup(&store, &client, credentials).await {
                Ok(()) => go_to.set(Some(paths::LOGIN.to_owned())),
                Err(e) => alert.set(Some(e.alert())),
            }
        });
    };

    view! {
        <section class="auth-page">
            <div class="auth-card">
                <h1>"Sign up"</h1>
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
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm password"
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=busy>
                        {move || if busy() { "Signing up..." } else { "Sign up" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already registered? "
                    <A href=paths::LOGIN>"Login"</A>
                </p>
            </div>
        </section>
    }
}
