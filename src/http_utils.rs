use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::errors::Error;

/// Request header carrying the API token.
pub const TOKEN_HEADER: &str = "Meridian-Key";

/// Thin reqwest wrapper for the Meridian management API. Owns the base URL
/// and auth header; every call is one request with no retries.
pub struct ApiClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(endpoint: String, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            token,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Constructs a full API URL from a path.
    pub fn api_url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.endpoint.trim_end_matches('/'), path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header(TOKEN_HEADER, token),
            None => builder,
        }
    }

    /// Makes a GET request and decodes the JSON response.
    pub async fn get<T>(&self, path: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        let response = self.authed(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Makes a POST request with a JSON body and decodes the JSON response.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: serde::Serialize,
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        let response = self.authed(self.client.post(&url)).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Makes a PUT request with a JSON body and decodes the JSON response.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: serde::Serialize,
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        let response = self.authed(self.client.put(&url)).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Makes a PUT request without a body and decodes the JSON response.
    pub async fn put_empty<T>(&self, path: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        let response = self.authed(self.client.put(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Makes a DELETE request; no response body expected.
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.api_url(path);
        let response = self.authed(self.client.delete(&url)).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(remote_error(response).await)
        }
    }

    /// Decodes a success response or translates the failure body into an
    /// error carrying the remote message verbatim.
    async fn handle_response<T>(&self, response: Response) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(remote_error(response).await)
        }
    }
}

async fn remote_error(response: Response) -> Error {
    let message = response.text().await.unwrap_or_default();
    if message.is_empty() {
        Error::Remote("No error details".to_string())
    } else {
        Error::Remote(message)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Remote(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_path() {
        let client = ApiClient::new("https://api.meridian.dev".to_string(), None);
        assert_eq!(
            client.api_url("service/123/version"),
            "https://api.meridian.dev/service/123/version"
        );
    }

    #[test]
    fn api_url_strips_extra_slashes() {
        let client = ApiClient::new("https://api.meridian.dev/".to_string(), None);
        assert_eq!(client.api_url("/stats/regions"), "https://api.meridian.dev/stats/regions");
    }

    #[tokio::test]
    async fn remote_failure_body_passes_through_verbatim() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET).path("/stats/regions");
                then.status(400).body("fixture error");
            })
            .await;

        let client = ApiClient::new(server.base_url(), None);
        let err = client.get::<serde_json::Value>("stats/regions").await.unwrap_err();
        assert_eq!(err, Error::Remote("fixture error".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn token_header_is_attached() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET)
                    .path("/stats/regions")
                    .header(TOKEN_HEADER, "tok-123");
                then.status(200).json_body(serde_json::json!({"data": []}));
            })
            .await;

        let client = ApiClient::new(server.base_url(), Some("tok-123".to_string()));
        let _: serde_json::Value = client.get("stats/regions").await.unwrap();
        mock.assert_async().await;
    }
}
