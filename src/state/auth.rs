//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by route guards and user-aware components (navbar, profile page) to
//! decide what to render and where to redirect.
//!
//! DESIGN
//! ======
//! Authentication is derived from the token rather than stored beside it,
//! so the two can never disagree.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::Transition;
use crate::net::types::UserProfile;
use crate::session::lifecycle::{LoginSuccess, ProfileUpdate, RestoredSession};

/// Authentication state tracking the session token and display profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
    pub profile: Option<UserProfile>,
    pub error: Option<String>,
    pub loading: bool,
}

impl AuthState {
    /// Initial state from whatever session survived in storage.
    #[must_use]
    pub fn from_session(session: Option<RestoredSession>) -> Self {
        match session {
            Some(session) => Self { token: Some(session.token), profile: session.profile, ..Self::default() },
            None => Self::default(),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Name shown in the navbar and profile page.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.username.as_str())
    }
}

/// Every way the auth slice can change.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthAction {
    Login(Transition<LoginSuccess>),
    Signup(Transition<()>),
    Logout(Transition<()>),
    UpdateProfile(Transition<ProfileUpdate>),
    DeleteProfile(Transition<()>),
    /// A 401 tore the session down.
    SessionInvalidated,
    ClearError,
}

/// Apply one action to the auth slice.
pub fn apply(state: &mut AuthState, action: AuthAction) {
    match action {
        AuthAction::Login(Transition::Pending)
        | AuthAction::Signup(Transition::Pending)
        | AuthAction::Logout(Transition::Pending)
        | AuthAction::UpdateProfile(Transition::Pending)
        | AuthAction::DeleteProfile(Transition::Pending) => {
            state.loading = true;
            state.error = None;
        }
        AuthAction::Login(Transition::Fulfilled(success)) => {
            *state = AuthState { token: Some(success.token), profile: Some(success.profile), ..AuthState::default() };
        }
        AuthAction::Login(Transition::Rejected(message)) => {
            *state = AuthState { error: Some(message), ..AuthState::default() };
        }
        AuthAction::Signup(Transition::Fulfilled(())) | AuthAction::DeleteProfile(Transition::Fulfilled(())) => {
            state.loading = false;
            state.error = None;
        }
        AuthAction::Logout(Transition::Fulfilled(())) | AuthAction::SessionInvalidated => {
            *state = AuthState::default();
        }
        AuthAction::Logout(Transition::Rejected(message)) => {
            *state = AuthState { error: Some(message), ..AuthState::default() };
        }
        AuthAction::UpdateProfile(Transition::Fulfilled(update)) => {
            state.loading = false;
            if let Some(token) = update.token {
                state.token = Some(token);
            }
            state.profile = Some(update.profile);
        }
        AuthAction::Signup(Transition::Rejected(message))
        | AuthAction::UpdateProfile(Transition::Rejected(message))
        | AuthAction::DeleteProfile(Transition::Rejected(message)) => {
            state.loading = false;
            state.error = Some(message);
        }
        AuthAction::ClearError => state.error = None,
    }
}
