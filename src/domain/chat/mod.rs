//! Conversation turn and run types.

mod run;
mod turn;

pub use run::RunStatus;
pub use turn::{InvalidTurn, TurnReply, TurnRequest};
