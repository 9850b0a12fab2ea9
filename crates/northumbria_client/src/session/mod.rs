//! Session client
//!
//! `ChatSession` owns everything one conversation needs: the transcript, the
//! opaque session context, the pending attachment and the activity flags.
//! `submit` takes `&mut self`, so a single session never has two sends in
//! flight; separate sessions may share one client through an `Arc`.

mod activity;
mod context;

use std::sync::Arc;

use log::{debug, error};

pub use activity::ActivityFlags;
pub use context::SessionContext;

use crate::api::models::ChatRequest;
use crate::attachment::Attachment;
use crate::client_trait::AgentClientTrait;
use crate::error::ChatError;
use crate::message::{Message, Transcript, ERROR_FALLBACK};

/// Sent as `user_input` when a file goes out without a caption.
pub const DEFAULT_UPLOAD_CAPTION: &str = "Uploaded ID image.";

#[derive(Debug)]
pub enum SendOutcome {
    /// Nothing to send: blank text and no attachment. Nothing was changed.
    Rejected,
    /// The agent answered; the reply is also the last transcript entry.
    Replied(String),
    /// The exchange failed; the fallback message was appended instead.
    Failed(ChatError),
}

impl SendOutcome {
    pub fn is_replied(&self) -> bool {
        matches!(self, SendOutcome::Replied(_))
    }
}

pub struct ChatSession<C> {
    client: Arc<C>,
    transcript: Transcript,
    context: SessionContext,
    attachment: Option<Attachment>,
    activity: ActivityFlags,
}

impl<C: AgentClientTrait> ChatSession<C> {
    pub fn new(client: C) -> Self {
        Self::with_shared_client(Arc::new(client))
    }

    pub fn with_shared_client(client: Arc<C>) -> Self {
        Self {
            client,
            transcript: Transcript::new(),
            context: SessionContext::new(),
            attachment: None,
            activity: ActivityFlags::default(),
        }
    }

    /// Continues a conversation the agent already knows by this thread id.
    pub fn with_context(mut self, context: SessionContext) -> Self {
        self.context = context;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn activity(&self) -> ActivityFlags {
        self.activity.clone()
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Holds a file for the next send, replacing any earlier selection.
    pub fn attach(&mut self, attachment: Attachment) {
        debug!("Attached {} ({})", attachment.file_name, attachment.size_kb());
        self.attachment = Some(attachment);
    }

    pub fn detach(&mut self) -> Option<Attachment> {
        self.attachment.take()
    }

    /// Starts over: empty transcript, no thread id, empty state.
    pub fn restart(&mut self) {
        self.transcript.clear();
        self.context.reset();
        self.attachment = None;
    }

    /// Sends one message (and the pending attachment, if any) to the agent.
    ///
    /// Failures never escape as errors: they are logged, turned into the
    /// fallback assistant message and reported through `SendOutcome::Failed`.
    pub async fn submit(&mut self, text: &str) -> SendOutcome {
        let blank = text.trim().is_empty();
        if blank && self.attachment.is_none() {
            return SendOutcome::Rejected;
        }

        let attachment = self.attachment.take();
        self.transcript
            .push(Message::human(display_text(text, blank, attachment.as_ref())));

        let _activity = self.activity.begin(attachment.is_some());

        let user_input = match (&attachment, blank) {
            (Some(_), true) => DEFAULT_UPLOAD_CAPTION,
            _ => text,
        };
        let request = ChatRequest::new(user_input)
            .with_state(self.context.state_for_request())
            .with_thread_id(self.context.thread_id_for_request())
            .with_file(attachment);

        match self.client.send_chat(request).await {
            Ok(response) => {
                self.context.absorb(&response);
                self.transcript.push(Message::ai(response.response.clone()));
                SendOutcome::Replied(response.response)
            }
            Err(err) => {
                error!("Error sending message: {}", err);
                self.transcript.push(Message::ai(ERROR_FALLBACK));
                SendOutcome::Failed(err)
            }
        }
    }
}

/// How the user's own message appears in the thread.
fn display_text(text: &str, blank: bool, attachment: Option<&Attachment>) -> String {
    match attachment {
        Some(file) if blank => file.file_name.clone(),
        Some(file) => format!("{}: {}", file.file_name, text),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::ChatResponse;
    use crate::attachment::AttachmentKind;
    use crate::error::Result;
    use crate::message::Role;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedClient {
        replies: Mutex<VecDeque<Result<ChatResponse>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedClient {
        fn reply(self, response: &str, thread_id: Option<&str>, state: serde_json::Value) -> Self {
            self.replies.lock().unwrap().push_back(Ok(ChatResponse {
                response: response.to_string(),
                thread_id: thread_id.map(str::to_string),
                state: Some(state),
            }));
            self
        }

        fn fail(self) -> Self {
            self.replies.lock().unwrap().push_back(Err(ChatError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".to_string(),
            }));
            self
        }

        fn sent(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AgentClientTrait for ScriptedClient {
        async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected request")
        }
    }

    fn session(client: ScriptedClient) -> (ChatSession<ScriptedClient>, Arc<ScriptedClient>) {
        let client = Arc::new(client);
        (ChatSession::with_shared_client(Arc::clone(&client)), client)
    }

    #[tokio::test]
    async fn first_exchange_records_thread_and_state() {
        let (mut chat, _client) = session(ScriptedClient::default().reply(
            "Tuition is £16,000 per year.",
            Some("abc123"),
            json!({ "step": 1 }),
        ));

        let outcome = chat.submit("What are the tuition fees?").await;

        assert!(outcome.is_replied());
        let roles: Vec<_> = chat.transcript().iter().map(|m| m.role).collect();
        assert_eq!(roles, [Role::HumanMessage, Role::AIMessage]);
        assert_eq!(chat.transcript().messages()[0].content, "What are the tuition fees?");
        assert_eq!(chat.context().thread_id(), Some("abc123"));
        assert_eq!(chat.context().state(), &json!({ "step": 1 }));
    }

    #[tokio::test]
    async fn thread_id_is_echoed_on_every_later_request() {
        let (mut chat, client) = session(
            ScriptedClient::default()
                .reply("one", Some("abc123"), json!({ "step": 1 }))
                .reply("two", None, json!({ "step": 2 }))
                .fail()
                .reply("four", None, json!({ "step": 4 })),
        );

        for text in ["a", "b", "c", "d"] {
            chat.submit(text).await;
        }

        let sent = client.sent();
        assert_eq!(sent[0].thread_id, "");
        assert_eq!(sent[0].state, "{}");
        for request in &sent[1..] {
            assert_eq!(request.thread_id, "abc123");
        }
        assert_eq!(sent[2].state, r#"{"step":2}"#);
        assert_eq!(sent[3].state, r#"{"step":2}"#);
    }

    #[tokio::test]
    async fn failure_appends_fallback_and_keeps_context() {
        let (mut chat, _client) = session(
            ScriptedClient::default()
                .reply("hi", Some("abc123"), json!({ "step": 1 }))
                .fail(),
        );
        chat.submit("hello").await;
        let before = chat.context().clone();

        let outcome = chat.submit("and then?").await;

        assert!(matches!(outcome, SendOutcome::Failed(ChatError::Status { .. })));
        assert_eq!(chat.transcript().len(), 4);
        assert_eq!(chat.transcript().messages()[2], Message::human("and then?"));
        assert_eq!(chat.transcript().messages()[3], Message::ai(ERROR_FALLBACK));
        assert_eq!(chat.context(), &before);
        assert!(!chat.activity().is_loading());
    }

    #[tokio::test]
    async fn text_is_sent_as_typed() {
        let (mut chat, client) =
            session(ScriptedClient::default().reply("Hello", None, json!({})));

        chat.submit("  where is the library?  ").await;

        assert_eq!(client.sent()[0].user_input, "  where is the library?  ");
        assert_eq!(chat.transcript().messages()[0].content, "  where is the library?  ");
    }

    #[tokio::test]
    async fn whitespace_caption_with_file_uses_default_caption() {
        let (mut chat, client) =
            session(ScriptedClient::default().reply("Thanks", None, json!({})));
        chat.attach(Attachment::from_bytes("card.jpg", vec![1]));

        chat.submit("   ").await;

        assert_eq!(client.sent()[0].user_input, DEFAULT_UPLOAD_CAPTION);
        assert_eq!(chat.transcript().messages()[0].content, "card.jpg");
    }

    #[tokio::test]
    async fn blank_text_without_file_is_rejected() {
        let (mut chat, client) = session(ScriptedClient::default());

        let outcome = chat.submit("   ").await;

        assert!(matches!(outcome, SendOutcome::Rejected));
        assert!(chat.transcript().is_empty());
        assert!(client.sent().is_empty());
    }

    #[tokio::test]
    async fn file_without_caption_uses_default_caption() {
        let (mut chat, client) =
            session(ScriptedClient::default().reply("Thanks", None, json!({})));
        chat.attach(Attachment::from_bytes("student_card.jpg", vec![1, 2, 3]).with_kind(AttachmentKind::IdCard));

        chat.submit("").await;

        let sent = client.sent();
        assert_eq!(sent[0].user_input, DEFAULT_UPLOAD_CAPTION);
        assert_eq!(sent[0].kind(), "id_card");
        assert_eq!(chat.transcript().messages()[0].content, "student_card.jpg");
        assert!(chat.attachment().is_none());
    }

    #[tokio::test]
    async fn file_with_caption_shows_name_and_caption() {
        let (mut chat, client) =
            session(ScriptedClient::default().reply("Got it", None, json!({})));
        chat.attach(Attachment::from_bytes("receipt.pdf", vec![9]));

        chat.submit("my receipt").await;

        assert_eq!(client.sent()[0].user_input, "my receipt");
        assert_eq!(chat.transcript().messages()[0].content, "receipt.pdf: my receipt");
    }

    #[tokio::test]
    async fn attachment_cleared_after_failed_send() {
        let (mut chat, client) = session(ScriptedClient::default().fail());
        chat.attach(Attachment::capture(vec![0xff]));

        chat.submit("selfie").await;

        assert!(client.sent()[0].file.is_some());
        assert!(chat.attachment().is_none());
        assert!(!chat.activity().is_uploading());
    }

    #[tokio::test]
    async fn restart_begins_a_new_thread() {
        let (mut chat, client) = session(
            ScriptedClient::default()
                .reply("one", Some("abc123"), json!({ "step": 1 }))
                .reply("two", Some("def456"), json!({})),
        );
        chat.submit("hello").await;

        chat.restart();
        assert!(chat.transcript().is_empty());
        chat.submit("hello again").await;

        assert_eq!(client.sent()[1].thread_id, "");
        assert_eq!(chat.context().thread_id(), Some("def456"));
    }

    #[tokio::test]
    async fn resumed_context_sends_known_thread() {
        let (chat, client) = session(ScriptedClient::default().reply("back", None, json!({})));
        let mut chat = chat.with_context(SessionContext::resume("abc123"));

        chat.submit("I'm back").await;

        assert_eq!(client.sent()[0].thread_id, "abc123");
        assert_eq!(chat.context().thread_id(), Some("abc123"));
    }
}
