//! Reducer-driven client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AppState` is built once at startup and provided at the application root
//! through `store::Store`. Slices (`auth`, `products`) change only through
//! their declared actions; `thunks` wrap backend operations in
//! pending → fulfilled/rejected transitions.

pub mod auth;
pub mod products;
pub mod store;
pub mod thunks;

/// Lifecycle of one async operation as seen by a reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition<T> {
    Pending,
    Fulfilled(T),
    /// User-facing failure message.
    Rejected(String),
}
