//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render storefront chrome and product surfaces, reading the
//! store and API client from Leptos context providers.

pub mod error_alert;
pub mod navbar;
pub mod product_card;
pub mod product_form;
