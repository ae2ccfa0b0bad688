//! Glitch - client library and terminal client for the Glitch
//! live-streaming platform.
//!
//! Layers, leaves first:
//!
//! - [`traits`] / [`adapters`]: HTTP, chat and session-store transports
//! - [`api`]: typed REST client
//! - [`session`]: the signed-in session as an observable value
//! - [`repository`]: token-aware pass-through to the API
//! - [`chat`]: the live chat of one stream
//! - [`view_state`]: observable state per screen
//! - [`app`] / [`cli`]: wiring and the command-line front end

pub mod adapters;
pub mod api;
pub mod app;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod session;
pub mod traits;
pub mod view_state;
pub mod websocket;
