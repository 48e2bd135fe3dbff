//! Client-side state models shared by presentation code.
//!
//! DESIGN
//! ======
//! Plain data snapshots, cheap to clone, so renderers can hold them without
//! touching the live store.

pub mod auth;
