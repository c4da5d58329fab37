//! Async drivers that wrap each backend operation in store transitions.
//!
//! Every thunk dispatches `Pending`, awaits the operation, then dispatches
//! exactly one terminal transition. The outcome is also returned so pages
//! can navigate or show an alert for that specific call.

#[cfg(test)]
#[path = "thunks_test.rs"]
mod thunks_test;

use std::fmt::Display;

use super::Transition;
use super::auth::AuthAction;
use super::products::ProductAction;
use super::store::Dispatch;
use crate::error::ApiError;
use crate::net::http::{ApiClient, Transport};
use crate::net::products;
use crate::net::types::{Credentials, ImageUpload, Product, ProductDraft};
use crate::session::lifecycle::{self, AuthFailure, LoginSuccess, ProfileUpdate};
use crate::session::storage::KeyValueStore;

fn settle<T: Clone, E: Display>(outcome: &Result<T, E>) -> Transition<T> {
    match outcome {
        Ok(value) => Transition::Fulfilled(value.clone()),
        Err(e) => Transition::Rejected(e.to_string()),
    }
}

// =============================================================
// Auth
// =============================================================

/// # Errors
///
/// Propagates the lifecycle failure after dispatching `Rejected`.
pub async fn login<D: Dispatch, S: KeyValueStore, T: Transport>(
    store: &D,
    client: &ApiClient<S, T>,
    credentials: Credentials,
) -> Result<LoginSuccess, AuthFailure> {
    store.dispatch(AuthAction::Login(Transition::Pending).into());
    let outcome = lifecycle::login(client, &credentials).await;
    store.dispatch(AuthAction::Login(settle(&outcome)).into());
    outcome
}

/// # Errors
///
/// Propagates the lifecycle failure after dispatching `Rejected`.
pub async fn signup<D: Dispatch, S: KeyValueStore, T: Transport>(
    store: &D,
    client: &ApiClient<S, T>,
    credentials: Credentials,
) -> Result<(), AuthFailure> {
    store.dispatch(AuthAction::Signup(Transition::Pending).into());
    let outcome = lifecycle::signup(client, &credentials).await;
    store.dispatch(AuthAction::Signup(settle(&outcome)).into());
    outcome
}

/// Local state ends signed out whichever transition is dispatched.
///
/// # Errors
///
/// Propagates the lifecycle failure after dispatching `Rejected`.
pub async fn logout<D: Dispatch, S: KeyValueStore, T: Transport>(
    store: &D,
    client: &ApiClient<S, T>,
) -> Result<(), AuthFailure> {
    store.dispatch(AuthAction::Logout(Transition::Pending).into());
    let outcome = lifecycle::logout(client).await;
    store.dispatch(AuthAction::Logout(settle(&outcome)).into());
    outcome
}

/// # Errors
///
/// Propagates the lifecycle failure after dispatching `Rejected`.
pub async fn update_profile<D: Dispatch, S: KeyValueStore, T: Transport>(
    store: &D,
    client: &ApiClient<S, T>,
    credentials: Credentials,
) -> Result<ProfileUpdate, AuthFailure> {
    store.dispatch(AuthAction::UpdateProfile(Transition::Pending).into());
    let outcome = lifecycle::update_profile(client, &credentials).await;
    store.dispatch(AuthAction::UpdateProfile(settle(&outcome)).into());
    outcome
}

/// Delete the account, then run the logout thunk to reset local state.
///
/// The token is already gone at that point, so logout makes no request.
///
/// # Errors
///
/// Propagates the lifecycle failure after dispatching `Rejected`.
pub async fn delete_profile<D: Dispatch, S: KeyValueStore, T: Transport>(
    store: &D,
    client: &ApiClient<S, T>,
) -> Result<(), AuthFailure> {
    store.dispatch(AuthAction::DeleteProfile(Transition::Pending).into());
    let outcome = lifecycle::delete_profile(client).await;
    store.dispatch(AuthAction::DeleteProfile(settle(&outcome)).into());
    outcome?;
    logout(store, client).await
}

// =============================================================
// Products
// =============================================================

/// # Errors
///
/// Propagates the API error after dispatching `Rejected`.
pub async fn fetch_products<D: Dispatch, S: KeyValueStore, T: Transport>(
    store: &D,
    client: &ApiClient<S, T>,
) -> Result<Vec<Product>, ApiError> {
    store.dispatch(ProductAction::FetchAll(Transition::Pending).into());
    let outcome = products::list_products(client).await;
    store.dispatch(ProductAction::FetchAll(settle(&outcome)).into());
    outcome
}

/// # Errors
///
/// Propagates the API error after dispatching `Rejected`.
pub async fn fetch_product<D: Dispatch, S: KeyValueStore, T: Transport>(
    store: &D,
    client: &ApiClient<S, T>,
    id: i64,
) -> Result<Product, ApiError> {
    store.dispatch(ProductAction::FetchOne(Transition::Pending).into());
    let outcome = products::get_product(client, id).await;
    store.dispatch(ProductAction::FetchOne(settle(&outcome)).into());
    outcome
}

/// Create, then refetch the list.
///
/// # Errors
///
/// Propagates the create failure after dispatching `Rejected`. A failed
/// refetch is reported through the store only.
pub async fn create_product<D: Dispatch, S: KeyValueStore, T: Transport>(
    store: &D,
    client: &ApiClient<S, T>,
    draft: ProductDraft,
    image: Option<ImageUpload>,
) -> Result<Option<Product>, ApiError> {
    store.dispatch(ProductAction::Create(Transition::Pending).into());
    let outcome = products::create_product(client, &draft, image.as_ref()).await;
    store.dispatch(ProductAction::Create(settle(&outcome)).into());
    let created = outcome?;
    refetch(store, client).await;
    Ok(created)
}

/// Update, then refetch the list.
///
/// # Errors
///
/// Propagates the update failure after dispatching `Rejected`.
pub async fn update_product<D: Dispatch, S: KeyValueStore, T: Transport>(
    store: &D,
    client: &ApiClient<S, T>,
    id: i64,
    draft: ProductDraft,
    image: Option<ImageUpload>,
) -> Result<Option<Product>, ApiError> {
    store.dispatch(ProductAction::Update(Transition::Pending).into());
    let outcome = products::update_product(client, id, &draft, image.as_ref()).await;
    store.dispatch(ProductAction::Update(settle(&outcome)).into());
    let updated = outcome?;
    refetch(store, client).await;
    Ok(updated)
}

/// Delete, then refetch the list.
///
/// # Errors
///
/// Propagates the delete failure after dispatching `Rejected`.
pub async fn delete_product<D: Dispatch, S: KeyValueStore, T: Transport>(
    store: &D,
    client: &ApiClient<S, T>,
    id: i64,
) -> Result<(), ApiError> {
    store.dispatch(ProductAction::Delete(Transition::Pending).into());
    let outcome = products::delete_product(client, id).await.map(|()| id);
    store.dispatch(ProductAction::Delete(settle(&outcome)).into());
    outcome?;
    refetch(store, client).await;
    Ok(())
}

async fn refetch<D: Dispatch, S: KeyValueStore, T: Transport>(store: &D, client: &ApiClient<S, T>) {
    if let Err(e) = fetch_products(store, client).await {
        log::warn!("products: refetch after write failed: {e}");
    }
}
