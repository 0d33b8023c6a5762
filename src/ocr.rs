//! OCR engine client.
//!
//! Posts image bytes to a hosted text-recognition endpoint and returns the
//! recognized text, newline-separated per detected line. The wire format is
//! base64 JSON in, `{"text": ...}` out.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::OcrConfig;

pub struct OcrClient {
    client: Client,
    api_url: String,
    language: Option<String>,
}

impl OcrClient {
    pub fn new(config: &OcrConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: config.api_url.clone(),
            language: config.language.clone(),
        }
    }

    /// Runs text recognition over raw image bytes. Engine failures
    /// propagate; nothing retries them.
    pub async fn recognize(&self, image: &[u8]) -> Result<String> {
        let request = OcrRequest {
            image: BASE64.encode(image),
            language: self.language.clone(),
        };

        let response = self
            .client
            .post(format!("{}/v1/recognize", self.api_url))
            .json(&request)
            .send()
            .await
            .context("Failed to call OCR engine")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("OCR engine returned {}: {}", status, error_text);
        }

        let body: OcrResponse = response
            .json()
            .await
            .context("Failed to parse OCR response")?;

        Ok(body.text)
    }
}

#[derive(Debug, Serialize)]
struct OcrRequest {
    image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    text: String,
}
