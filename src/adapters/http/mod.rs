//! HTTP adapters (Axum).

pub mod chat;
