//! Application layer - per-turn orchestration over the ports.

mod orchestrator;
mod poller;

pub use orchestrator::{ChatOrchestrator, TurnError, FALLBACK_REPLY};
pub use poller::{PollError, RunPoller};
