use std::cell::RefCell;

use super::*;
use crate::state::Transition;
use crate::state::store::Action;

#[derive(Default)]
struct RecordingStore {
    state: RefCell<AppState>,
}

impl Dispatch for RecordingStore {
    fn dispatch(&self, action: Action) {
        self.state.borrow_mut().apply(action);
    }
}

#[test]
fn invalidation_resets_auth_and_targets_login() {
    let store = RecordingStore::default();
    store.dispatch(
        AuthAction::Login(Transition::Fulfilled(crate::session::lifecycle::LoginSuccess {
            token: "abc.def.ghi".to_owned(),
            profile: crate::net::types::UserProfile {
                username: "alice".to_owned(),
                role: crate::net::types::Role::User,
            },
        }))
        .into(),
    );
    assert!(store.state.borrow().auth.is_authenticated());

    assert_eq!(handle_session_event(&store, SessionEvent::Invalidated), "/login");
    assert_eq!(store.state.borrow().auth, AuthState::default());
}

#[test]
fn path_builders_encode_queries() {
    assert_eq!(paths::product(12), "/product/12");
    assert_eq!(paths::search(" red shoes "), "/search?q=red%20shoes");
    assert_eq!(paths::products_matching("a&b"), "/products?search=a%26b");
}

#[test]
fn query_values_keep_unreserved_characters() {
    assert_eq!(paths::encode("usb-c cable"), "usb-c%20cable");
    assert_eq!(paths::encode("a_b.c~d"), "a_b.c~d");
    assert_eq!(paths::encode("a&b=c"), "a%26b%3Dc");
    assert_eq!(paths::encode("é"), "%C3%A9");
}
