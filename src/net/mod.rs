//! Networking modules for the storefront REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the authenticated request wrapper, `fetch` is its browser
//! transport, `products` holds the product endpoints, and `types` defines the
//! shared wire schema.

pub mod fetch;
pub mod http;
pub mod products;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;
