use async_trait::async_trait;

use crate::api::models::{ChatRequest, ChatResponse};
use crate::error::Result;

/// Anything that can carry one chat exchange to the agent.
#[async_trait]
pub trait AgentClientTrait: Send + Sync {
    async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}
