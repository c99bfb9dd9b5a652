//! Shared HTTP plumbing for both provider APIs.

use crate::api::{TailnetApi, ZoneApi};
use crate::config::{Auth, SuccessRange, CLOUDFLARE_API_URL, DEFAULT_TIMEOUT, TAILSCALE_API_URL};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tailflare_core::{Result, SyncError};
use tracing::debug;

/// Authenticated client for one provider API
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    auth: Auth,
    base_url: String,
}

impl ApiClient {
    /// Client for the Tailscale API, authenticated with an API key
    pub fn tailscale(api_key: impl Into<String>) -> Result<Self> {
        ApiClientBuilder::new(TAILSCALE_API_URL, Auth::Basic(api_key.into())).build()
    }

    /// Client for the Cloudflare API, authenticated with an API token
    pub fn cloudflare(token: impl Into<String>) -> Result<Self> {
        ApiClientBuilder::new(CLOUDFLARE_API_URL, Auth::Bearer(token.into())).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(base_url: impl Into<String>, auth: Auth) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url, auth)
    }

    /// Access the device endpoints of a tailnet
    #[must_use]
    pub fn tailnet(&self, tailnet: impl Into<String>) -> TailnetApi<'_> {
        TailnetApi::new(self, tailnet.into())
    }

    /// Access the DNS record endpoints of a zone
    #[must_use]
    pub fn zone(&self, zone_id: impl Into<String>) -> ZoneApi<'_> {
        ZoneApi::new(self, zone_id.into())
    }

    /// Perform a GET request with query parameters
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.build_url(path, params);
        debug!(url = %url, "GET request");

        let request = self.authorize(self.inner.http.get(&url));
        self.send(request, SuccessRange::Ok).await
    }

    /// Perform a POST request with JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path, &[]);
        let payload = serde_json::to_string(body)?;
        debug!(url = %url, body = %payload, "POST request");

        let request = self.authorize(self.inner.http.post(&url).json(body));
        self.send(request, SuccessRange::UpToAccepted).await
    }

    /// Perform a PATCH request with JSON body
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path, &[]);
        let payload = serde_json::to_string(body)?;
        debug!(url = %url, body = %payload, "PATCH request");

        let request = self.authorize(self.inner.http.patch(&url).json(body));
        self.send(request, SuccessRange::UpToAccepted).await
    }

    /// Perform a DELETE request
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path, &[]);
        debug!(url = %url, "DELETE request");

        let request = self.authorize(self.inner.http.delete(&url));
        self.send(request, SuccessRange::UpToAccepted).await
    }

    /// Build a URL with encoded query parameters
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.inner.base_url, path);

        if !params.is_empty() {
            url.push('?');
            url.push_str(
                &url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(params)
                    .finish(),
            );
        }

        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.inner.auth {
            Auth::Basic(key) => request.basic_auth(key, None::<&str>),
            Auth::Bearer(token) => request.bearer_auth(token),
        }
    }

    /// Send a request and decode the body if the status is acceptable
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        accept: SuccessRange,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::Transport(format!("reading response body: {e}")))?;
        debug!(status, body = %body, "response");

        if !accept.contains(status) {
            return Err(SyncError::Protocol { status, body });
        }

        // Cloudflare can report failure inside a 2xx envelope.
        let value: serde_json::Value = serde_json::from_str(&body)?;
        if value.get("success") == Some(&serde_json::Value::Bool(false)) {
            return Err(SyncError::Protocol { status, body });
        }

        serde_json::from_value(value).map_err(SyncError::Parse)
    }
}

/// Builder for configuring an [`ApiClient`]
pub struct ApiClientBuilder {
    base_url: String,
    auth: Auth,
    timeout: Duration,
    user_agent: String,
}

impl ApiClientBuilder {
    /// Create a new builder for the given base URL and credentials
    #[must_use]
    pub fn new(base_url: impl Into<String>, auth: Auth) -> Self {
        Self {
            base_url: base_url.into(),
            auth,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("tailflare/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| SyncError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                http,
                auth: self.auth,
                base_url: self.base_url.trim_end_matches('/').to_string(),
            }),
        })
    }
}
