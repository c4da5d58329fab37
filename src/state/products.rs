//! Product catalogue state: the cached list, the product being viewed, and
//! the last notice or error to show.
//!
//! The server is authoritative; successful writes are followed by a refetch,
//! so local edits here only bridge the gap until the list reloads.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use super::Transition;
use crate::net::types::Product;

pub const CREATED_NOTICE: &str = "Product created successfully";
pub const UPDATED_NOTICE: &str = "Product updated successfully";
pub const DELETED_NOTICE: &str = "Product deleted successfully";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductState {
    pub items: Vec<Product>,
    pub current: Option<Product>,
    pub loading: bool,
    pub error: Option<String>,
    /// Success message for the last write.
    pub notice: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProductAction {
    FetchAll(Transition<Vec<Product>>),
    FetchOne(Transition<Product>),
    Create(Transition<Option<Product>>),
    Update(Transition<Option<Product>>),
    /// Carries the deleted id.
    Delete(Transition<i64>),
    ClearError,
    ClearNotice,
}

/// Apply one action to the product slice.
pub fn apply(state: &mut ProductState, action: ProductAction) {
    match action {
        ProductAction::FetchAll(Transition::Pending)
        | ProductAction::FetchOne(Transition::Pending)
        | ProductAction::Create(Transition::Pending)
        | ProductAction::Update(Transition::Pending)
        | ProductAction::Delete(Transition::Pending) => {
            state.loading = true;
            state.error = None;
        }
        ProductAction::FetchAll(Transition::Fulfilled(items)) => {
            state.loading = false;
            state.items = items;
        }
        ProductAction::FetchOne(Transition::Fulfilled(product)) => {
            state.loading = false;
            state.current = Some(product);
        }
        ProductAction::Create(Transition::Fulfilled(created)) => {
            state.loading = false;
            if let Some(product) = created {
                state.items.push(product);
            }
            state.notice = Some(CREATED_NOTICE.to_owned());
        }
        ProductAction::Update(Transition::Fulfilled(updated)) => {
            state.loading = false;
            if let Some(product) = updated {
                if let Some(slot) = state.items.iter_mut().find(|p| p.id == product.id) {
                    *slot = product.clone();
                }
                if state.current.as_ref().is_some_and(|c| c.id == product.id) {
                    state.current = Some(product);
                }
            }
            state.notice = Some(UPDATED_NOTICE.to_owned());
        }
        ProductAction::Delete(Transition::Fulfilled(id)) => {
            state.loading = false;
            state.items.retain(|p| p.id != id);
            if state.current.as_ref().is_some_and(|c| c.id == id) {
                state.current = None;
            }
            state.notice = Some(DELETED_NOTICE.to_owned());
        }
        ProductAction::FetchAll(Transition::Rejected(message))
        | ProductAction::FetchOne(Transition::Rejected(message))
        | ProductAction::Create(Transition::Rejected(message))
        | ProductAction::Update(Transition::Rejected(message))
        | ProductAction::Delete(Transition::Rejected(message)) => {
            state.loading = false;
            state.error = Some(message);
        }
        ProductAction::ClearError => state.error = None,
        ProductAction::ClearNotice => state.notice = None,
    }
}
