// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a Resend-compatible delivery API.

use std::time::Duration;

use async_trait::async_trait;
use coldreach_core::{
    ColdreachError, DeliveryProvider, DeliveryReceipt, OutboundEmail, SendError,
};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivery provider backed by a Resend-compatible API:
/// `POST {base_url}/emails` with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpDeliveryProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDeliveryProvider {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, ColdreachError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {api_key}");
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer)
                .map_err(|e| ColdreachError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| ColdreachError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

/// Wire shape of a send request.
#[derive(Debug, Serialize)]
struct SendRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

impl SendRequest {
    fn from_outbound(email: &OutboundEmail) -> Self {
        // "Display Name <address>" when a sender name is configured.
        let from = match &email.from_name {
            Some(name) => format!("{name} <{}>", email.from),
            None => email.from.clone(),
        };
        Self {
            from,
            to: vec![email.to.clone()],
            subject: email.subject.clone(),
            text: email.text.clone(),
            html: email.html.clone(),
        }
    }
}

#[async_trait]
impl DeliveryProvider for HttpDeliveryProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, SendError> {
        let url = format!("{}/emails", self.base_url);
        let request = SendRequest::from_outbound(email);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SendError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        debug!(status = %status, to = %email.to, "delivery response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SendError::Provider {
                message: format!("delivery API returned {status}: {body}"),
            });
        }

        let parsed: SendResponse =
            response.json().await.map_err(|e| SendError::Provider {
                message: format!("failed to parse delivery response: {e}"),
            })?;

        Ok(DeliveryReceipt {
            message_id: parsed.id,
        })
    }
}
