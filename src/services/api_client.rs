use crate::error::{Error, Result};
use crate::storage::TokenStore;
use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, warn};

/// Single chokepoint for backend calls. Reads the persisted token on every
/// request and attaches it as a bearer credential when present. No retries,
/// no timeout beyond the transport default.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url, tokens))
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            tokens,
        }
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(Method::GET, endpoint, None).await
    }

    pub async fn send<T, B>(&self, method: Method, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(method, endpoint, Some(body)).await
    }

    pub async fn send_empty<T: DeserializeOwned>(&self, method: Method, endpoint: &str) -> Result<T> {
        self.request(method, endpoint, None).await
    }

    /// Issues one request. A non-success status fails with `Error::Api`
    /// carrying the server's `error` field or `HTTP <status>`. An empty
    /// success body deserializes as JSON `null`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<JsonValue>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(method = %method, endpoint, "Sending API request");

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json");

        match self.tokens.load() {
            Ok(Some(token)) => builder = builder.bearer_auth(token),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Could not read session token; sending without it"),
        }

        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let server_message = serde_json::from_slice::<JsonValue>(&bytes)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));
            warn!(
                method = %method,
                endpoint,
                status = status.as_u16(),
                "API request failed"
            );
            return Err(Error::api(status.as_u16(), server_message));
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(JsonValue::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
