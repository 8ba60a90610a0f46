use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};

use crate::application::ports::chat_client::{ChatClient, ChatError};

pub const CHAT_TIMEOUT: Duration = Duration::from_secs(30);

/// Calls a hosted text-generation endpoint with the caller's own API key.
pub struct HuggingFaceChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HuggingFaceChatClient {
    pub fn new(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(CHAT_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

fn extract_text(body: &JsonValue) -> Option<String> {
    let item = match body {
        JsonValue::Array(items) => items.first()?,
        other => other,
    };
    item.get("generated_text")
        .or_else(|| item.get("summary_text"))
        .and_then(JsonValue::as_str)
        .map(str::to_string)
}

#[async_trait]
impl ChatClient for HuggingFaceChatClient {
    async fn ask(&self, api_key: &str, message: &str) -> Result<String, ChatError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&json!({ "inputs": message }))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("request failed: {e}"))?;
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ChatError::Unauthorized);
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "chat_upstream_error");
            return Err(ChatError::Upstream(status.as_u16()));
        }
        let body: JsonValue = resp
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("failed to read body: {e}"))?;
        extract_text(&body).ok_or(ChatError::EmptyReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_generated_text_from_list_or_object() {
        assert_eq!(
            extract_text(&json!([{ "generated_text": "नमस्कार" }])).as_deref(),
            Some("नमस्कार")
        );
        assert_eq!(
            extract_text(&json!({ "generated_text": "hi" })).as_deref(),
            Some("hi")
        );
        assert_eq!(extract_text(&json!([])), None);
        assert_eq!(extract_text(&json!({ "error": "loading" })), None);
    }

    #[tokio::test]
    async fn sends_bearer_key_and_parses_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/test")
            .match_header("authorization", "Bearer hf_key")
            .match_body(mockito::Matcher::Json(json!({ "inputs": "hello" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"generated_text":"hello there"}]"#)
            .create_async()
            .await;

        let client = HuggingFaceChatClient::new(format!("{}/models/test", server.url())).unwrap();
        let reply = client.ask("hf_key", "hello").await.unwrap();
        assert_eq!(reply, "hello there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn maps_rejected_key() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/m")
            .with_status(401)
            .create_async()
            .await;
        let client = HuggingFaceChatClient::new(format!("{}/m", server.url())).unwrap();
        assert!(matches!(
            client.ask("bad", "hello").await,
            Err(ChatError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn maps_upstream_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/m")
            .with_status(503)
            .create_async()
            .await;
        let client = HuggingFaceChatClient::new(format!("{}/m", server.url())).unwrap();
        assert!(matches!(
            client.ask("k", "hello").await,
            Err(ChatError::Upstream(503))
        ));
    }
}
