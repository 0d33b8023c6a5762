//! Image classification client.
//!
//! Talks to a hosted general-purpose image-classification model over HTTP
//! and returns the top-1 label. Mapping that label onto a document type
//! happens in [`crate::rules`]; this client only owns the wire call.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::ClassifierConfig;

pub struct ImageClassifier {
    client: Client,
    api_url: String,
    api_token: String,
    model: String,
}

impl ImageClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
            model: config.model.clone(),
        }
    }

    /// Classifies raw document bytes and returns the top prediction's
    /// label, lower-cased. Engine failures propagate; nothing retries them.
    pub async fn top_label(&self, image: &[u8]) -> Result<String> {
        let url = format!("{}/models/{}", self.api_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .context("Failed to call image classifier")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Classifier returned {}: {}", status, error_text);
        }

        let predictions: Vec<Prediction> = response
            .json()
            .await
            .context("Failed to parse classifier response")?;

        let top = predictions
            .first()
            .context("Classifier returned no predictions")?;

        Ok(top.label.to_lowercase())
    }
}

/// One scored label from the model, best first.
#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    #[allow(dead_code)]
    score: f64,
}
