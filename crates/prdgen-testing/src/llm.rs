//! In-process stand-in for the Anthropic Messages endpoint.

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MESSAGES_PATH: &str = "/v1/messages";

/// A wiremock server that answers completion requests with canned responses.
pub struct MockCompletionServer {
    server: MockServer,
}

impl MockCompletionServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Endpoint URL to configure as the completion API URL.
    pub fn url(&self) -> String {
        format!("{}{MESSAGES_PATH}", self.server.uri())
    }

    /// Answer with a single text content block.
    pub async fn respond_with_text(&self, text: &str) {
        self.respond_with_blocks(&[text]).await;
    }

    /// Answer with one text content block per entry, in order.
    pub async fn respond_with_blocks(&self, blocks: &[&str]) {
        let content: Vec<Value> = blocks
            .iter()
            .map(|text| json!({ "type": "text", "text": text }))
            .collect();
        self.respond_with_json(json!({
            "id": "msg_test",
            "type": "message",
            "role": "assistant",
            "content": content,
            "usage": { "input_tokens": 12, "output_tokens": 34 }
        }))
        .await;
    }

    /// Answer with an arbitrary 200 JSON body.
    pub async fn respond_with_json(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(MESSAGES_PATH))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer with a text block, but only after `delay`.
    pub async fn respond_slowly(&self, text: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(MESSAGES_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "content": [{ "type": "text", "text": text }] }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer with an error status and raw body.
    pub async fn respond_with_status(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(MESSAGES_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request received so far.
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| request.body_json::<Value>().ok())
            .collect()
    }

    /// Value of `header` on every request received so far.
    pub async fn received_header(&self, name: &str) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| {
                request
                    .headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned)
            })
            .collect()
    }
}
