//! Ports - interfaces between the application core and the outside world.
//!
//! Adapters implement these traits; the orchestrator depends only on the
//! traits, which is what makes every external collaborator mockable in tests.

mod assistant_client;
mod lead_sink;

pub use assistant_client::{AssistantClient, AssistantError, MessageRole, ThreadMessage};
pub use lead_sink::{LeadSink, LeadSinkError};
