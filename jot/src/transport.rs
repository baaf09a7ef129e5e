//! HTTP transport seam. The client only ever needs "POST these bytes with
//! this bearer token and give me the status and the whole body back".

use crate::error::JotError;
use async_trait::async_trait;
use reqwest::header;
use std::sync::Arc;
use std::time::Duration;

/// A fully read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        token: &str,
        body: Vec<u8>,
    ) -> Result<HttpReply, JotError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post_json(
        &self,
        url: &str,
        token: &str,
        body: Vec<u8>,
    ) -> Result<HttpReply, JotError> {
        (**self).post_json(url, token, body).await
    }
}

/// reqwest-backed transport with a fixed per-request timeout
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, JotError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JotError::Transport(format!("build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        token: &str,
        body: Vec<u8>,
    ) -> Result<HttpReply, JotError> {
        let resp = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| JotError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();

        // Always drain the body so the connection is released, even for errors
        let body = resp
            .bytes()
            .await
            .map_err(|e| JotError::Transport(format!("read response: {}", e)))?;

        Ok(HttpReply {
            status,
            body: body.to_vec(),
        })
    }
}
