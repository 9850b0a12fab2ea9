use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, NoProxy, Proxy};

use crate::api::models::{ChatRequest, ChatResponse};
use crate::client_trait::AgentClientTrait;
use crate::config::Config;
use crate::error::{ChatError, Result};

/// HTTP client for the agent's `POST /chat` endpoint.
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: Client,
    chat_url: String,
}

impl AgentClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: Self::build_http_client(config)?,
            chat_url: config.chat_url(),
        })
    }

    /// Only the proxies named in `config` are used; it already carries any
    /// `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` from the environment.
    fn build_http_client(config: &Config) -> Result<Client> {
        let mut builder = Client::builder().no_proxy();
        if !config.http_proxy.is_empty() {
            let proxy = Proxy::http(&config.http_proxy)
                .map_err(|e| ChatError::Config(format!("invalid http_proxy: {e}")))?;
            builder = builder.proxy(proxy.no_proxy(NoProxy::from_string(&config.no_proxy)));
        }
        if !config.https_proxy.is_empty() {
            let proxy = Proxy::https(&config.https_proxy)
                .map_err(|e| ChatError::Config(format!("invalid https_proxy: {e}")))?;
            builder = builder.proxy(proxy.no_proxy(NoProxy::from_string(&config.no_proxy)));
        }
        builder
            .build()
            .map_err(|e| ChatError::Config(format!("failed to build HTTP client: {e}")))
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

#[async_trait]
impl AgentClientTrait for AgentClient {
    async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        debug!(
            "POST {} (thread_id={:?}, file={:?}, type={:?})",
            self.chat_url,
            request.thread_id,
            request.file.as_ref().map(|f| f.file_name.as_str()),
            request.kind()
        );

        let form = request.into_form()?;
        let response = self.client.post(&self.chat_url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Agent rejected request: {} {}", status, body);
            return Err(ChatError::Status { status, body });
        }

        let body = response.bytes().await?;
        let chat_response: ChatResponse = serde_json::from_slice(&body)?;
        debug!(
            "Agent replied ({} chars, thread_id={:?})",
            chat_response.response.len(),
            chat_response.thread_id
        );
        Ok(chat_response)
    }
}
