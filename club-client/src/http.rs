//! HTTP transport

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{ApiResponse, AppError};
use std::time::Duration;

/// HTTP client trait
///
/// Paths are relative to the configured base URL (`"bookings/availability"`).
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T>;

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;

    fn base_url(&self) -> &str;
}

/// reqwest-backed client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .cookie_store(config.cookies)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, req: RequestBuilder) -> ClientResult<T> {
        let response = self.authorize(req).send().await?;
        self.handle_response(path, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Prefer the backend's error envelope; fall back to the status alone
            let error = match serde_json::from_str::<ApiResponse<serde_json::Value>>(&text) {
                Ok(body) => AppError::from_response(status, body),
                Err(_) => {
                    tracing::debug!(path, %status, body = %text, "Non-JSON error body");
                    AppError::new(AppError::code_for_status(status))
                }
            };
            tracing::warn!(path, %status, code = %error.code, "Request failed: {}", error.message);
            return Err(ClientError::Api { status, error });
        }

        tracing::debug!(path, %status, "Request succeeded");
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.client.get(self.url(path));
        self.send(path, req).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let req = self.client.get(self.url(path)).query(query);
        self.send(path, req).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.client.post(self.url(path)).json(body);
        self.send(path, req).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.client.post(self.url(path));
        self.send(path, req).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = NetworkHttpClient::new(&ClientConfig::new("http://club.local/api/")).unwrap();
        assert_eq!(client.base_url(), "http://club.local/api");
        assert_eq!(client.url("/facilities"), "http://club.local/api/facilities");
        assert_eq!(client.url("bookings/all"), "http://club.local/api/bookings/all");
    }

    #[test]
    fn test_token_from_config() {
        let config = ClientConfig::new("http://club.local").with_token("secret");
        let client = NetworkHttpClient::new(&config).unwrap();
        assert_eq!(client.token(), Some("secret"));
        assert_eq!(client.with_token("other").token(), Some("other"));
    }
}
