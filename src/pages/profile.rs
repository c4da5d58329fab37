//! Profile page: change credentials or delete the account. Requires a
//! signed-in user.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::login::validate_credentials;
use crate::app::{BrowserClient, paths};
use crate::components::error_alert::ErrorAlert;
use crate::error::AlertContent;
use crate::state::store::Store;
use crate::util::auth::install_unauth_redirect;
use crate::util::nav::install_navigation;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let store = expect_context::<Store>();
    let client = expect_context::<BrowserClient>();
    let navigate = use_navigate();
    install_unauth_redirect(store, navigate.clone());
    let go_to = RwSignal::new(None::<String>);
    install_navigation(go_to, navigate);

    let username = RwSignal::new(store.state().with_untracked(|s| s.auth.display_name().unwrap_or_default().to_owned()));
    let password = RwSignal::new(String::new());
    let alert = RwSignal::new(None::<AlertContent>);
    let confirm_delete = RwSignal::new(false);
    let busy = move || store.auth().loading;

    let client_update = client.clone();
    let on_update = move |ev: leptos::ev::SubmitEvent| {
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
        let client = client_update.clone();
        leptos::task::spawn_local(async move {
            match crate::state::thunks::update_profile(&store, &client, credentials).await {
                Ok(_) => {
                    password.set(String::new());
                    alert.set(Some(AlertContent::success("Profile updated")));
                }
                Err(e) => alert.set(Some(e.alert())),
            }
        });
    };

    let on_delete = move |_| {
        confirm_delete.set(false);
        let client = client.clone();
        leptos::task::spawn_local(async move {
            match crate::state::thunks::delete_profile(&store, &client).await {
                Ok(()) => go_to.set(Some(paths::LOGIN.to_owned())),
                Err(e) => alert.set(Some(e.alert())),
            }
        });
    };

    view! {
        <section class="form-page">
            <h1>"Profile"</h1>
            <ErrorAlert alert=alert on_dismiss=Callback::new(move |()| alert.set(None))/>
            <form class="auth-form" on:submit=on_update>
                <label class="auth-form__field">
                    "Username"
                    <input
                        class="auth-input"
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-form__field">
                    "New password"
                    <input
                        class="auth-input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button class="auth-button" type="submit" disabled=busy>
                    {move || if busy() { "Updating..." } else { "Update profile" }}
                </button>
            </form>
            <button class="danger-button" type="button" on:click=move |_| confirm_delete.set(true)>
                "Delete account"
            </button>
            <Show when=move || confirm_delete.get()>
                <div class="dialog" role="dialog" aria-modal="true">
                    <p>"Delete your account? This cannot be undone."</p>
                    <button type="button" on:click=move |_| confirm_delete.set(false)>"Cancel"</button>
                    <button class="dialog__danger" type="button" on:click=on_delete.clone()>
                        "Delete"
                    </button>
                </div>
            </Show>
        </section>
    }
}
