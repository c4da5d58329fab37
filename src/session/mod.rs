//! Client-side session: persistence, token checks and the auth lifecycle.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` abstracts the browser key/value store, `token_store` keeps the
//! bearer token and cached profile in it, `token` validates token shape, and
//! `lifecycle` runs the backend auth operations on top of all three.

pub mod lifecycle;
pub mod storage;
pub mod token;
pub mod token_store;
