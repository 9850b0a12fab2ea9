//! northumbria_client - Session client for the AskNorthumbria agent
//!
//! This crate holds everything the chat front-ends share:
//! - `message` - Transcript and message roles
//! - `attachment` - Files sent alongside a message
//! - `api` - Wire models and the HTTP client for `POST /chat`
//! - `session` - The session client that threads `thread_id`/`state` through requests
//! - `format` - Link detection for rendering message text
//! - `welcome` - Greeting and quick actions shown on an empty thread

pub mod api;
pub mod attachment;
pub mod client_trait;
pub mod config;
pub mod error;
pub mod format;
pub mod message;
pub mod session;
pub mod welcome;

pub use api::client::AgentClient;
pub use api::models::{ChatRequest, ChatResponse};
pub use attachment::{Attachment, AttachmentKind};
pub use client_trait::AgentClientTrait;
pub use config::Config;
pub use error::{ChatError, Result};
pub use message::{Message, Role, Transcript, ERROR_FALLBACK};
pub use session::{ActivityFlags, ChatSession, SendOutcome, SessionContext};
