//! Lead webhook adapter.

mod sink;

pub use sink::WebhookLeadSink;
