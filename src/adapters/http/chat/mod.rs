//! Chat endpoint: DTOs, handlers, and routes.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatRequest, ChatResponse, ErrorResponse};
pub use handlers::{post_chat, ChatApiError, ChatAppState};
pub use routes::{chat_router, chat_routes};
