//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (which thunk to run, where to
//! go afterwards) and delegates rendering details to `components`.

pub mod add_product;
pub mod home;
pub mod login;
pub mod product_detail;
pub mod products;
pub mod profile;
pub mod signup;
