use serde_json::{json, Value};

use crate::api::models::ChatResponse;

/// Conversation handle and agent state carried between requests.
///
/// Both values are opaque: the thread id is issued by the agent and echoed
/// back, and the state blob is replaced wholesale by every reply.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    thread_id: Option<String>,
    state: Value,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            thread_id: None,
            state: json!({}),
        }
    }

    /// Resumes a conversation whose thread id is already known.
    pub fn resume(thread_id: impl Into<String>) -> Self {
        let thread_id = thread_id.into();
        Self {
            thread_id: (!thread_id.is_empty()).then_some(thread_id),
            state: json!({}),
        }
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn state(&self) -> &Value {
        &self.state
    }

    pub fn thread_id_for_request(&self) -> &str {
        self.thread_id.as_deref().unwrap_or("")
    }

    /// JSON text of the state blob; `{}` when the agent sent back `null`.
    pub fn state_for_request(&self) -> String {
        if self.state.is_null() {
            "{}".to_string()
        } else {
            self.state.to_string()
        }
    }

    /// Applies a successful reply. A thread id, once set, is only ever
    /// replaced by another non-empty id.
    pub fn absorb(&mut self, response: &ChatResponse) {
        self.state = response.state.clone().unwrap_or_else(|| json!({}));

        match response.thread_id.as_deref() {
            Some(id) if !id.is_empty() => {
                if self.thread_id.as_deref() != Some(id) {
                    log::debug!("Agent issued thread id {}", id);
                }
                self.thread_id = Some(id.to_string());
            }
            _ => {}
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
