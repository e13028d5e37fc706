//! Lead Concierge - Website Chat and Lead Capture Backend
//!
//! This crate relays visitor messages to a hosted assistant provider,
//! drives asynchronous runs to completion, and opportunistically forwards
//! extracted contact leads to a CRM webhook.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
