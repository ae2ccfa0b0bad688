//! Typed REST client.
//!
//! One `impl GlitchApi` block per resource: auth, users, streams, follows
//! and VOD export.

mod auth;
mod client;
mod follows;
mod streams;
mod users;
mod vods;

pub use client::GlitchApi;
pub use users::PROFILE_PIC_FIELD;
