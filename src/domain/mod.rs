//! Domain types for conversation turns and lead capture.

pub mod chat;
pub mod lead;
