//! Utility helpers shared across pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (blobs, files, clocks) from page
//! and component logic so the rest of the crate stays testable natively.

pub mod auth;
pub mod blob;
pub mod clock;
pub mod nav;
