use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;

use crate::attachment::Attachment;

/// One outgoing exchange, encoded as `multipart/form-data`.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub user_input: String,
    /// JSON text of the opaque state blob.
    pub state: String,
    /// Empty until the agent has issued one.
    pub thread_id: String,
    pub file: Option<Attachment>,
}

impl ChatRequest {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            state: "{}".to_string(),
            thread_id: String::new(),
            file: None,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = thread_id.into();
        self
    }

    pub fn with_file(mut self, file: Option<Attachment>) -> Self {
        self.file = file;
        self
    }

    /// Value of the `type` form field; empty when no typed image is attached.
    pub fn kind(&self) -> &'static str {
        self.file
            .as_ref()
            .and_then(|file| file.kind)
            .map(|kind| kind.as_str())
            .unwrap_or("")
    }

    pub fn into_form(self) -> reqwest::Result<Form> {
        let kind = self.kind();
        let mut form = Form::new()
            .text("user_input", self.user_input)
            .text("state", self.state)
            .text("thread_id", self.thread_id)
            .text("type", kind);

        if let Some(file) = self.file {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(file.content_type)?;
            form = form.part("file", part);
        }

        Ok(form)
    }
}

/// The agent's reply. Fields beyond these are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub state: Option<Value>,
}
