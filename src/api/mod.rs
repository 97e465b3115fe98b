//! REST client for the storefront backend.
//!
//! Thin wrapper over `reqwest`: joins the base URL and path, serializes JSON
//! bodies, attaches the bearer token from the session when a call needs it,
//! and turns every non-2xx, transport or decode failure into one [`ApiError`].
//! There is no retry, timeout or backoff; a failed request fails once.
//!
//! Resource-specific calls live in the submodules as further `impl ApiClient`
//! blocks.

mod admin;
mod auth;
mod cart;
mod orders;
mod products;
mod wishlist;

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{extract_error_message, ApiError};
use crate::session::SessionContext;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: SessionContext,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionContext) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http = builder.build().context("Failed to create HTTP client")?;

        Ok(Self::with_client(&config.base_url, http, session))
    }

    pub fn with_client(base_url: &str, http: reqwest::Client, session: SessionContext) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// `GET` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, needs_auth: bool) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, None::<&()>, needs_auth).await?;
        decode(response).await
    }

    /// `POST` a JSON body and decode the JSON reply.
    pub async fn post<B, T>(&self, path: &str, body: &B, needs_auth: bool) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, Some(body), needs_auth).await?;
        decode(response).await
    }

    /// `PUT` always carries the bearer token.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::PUT, path, Some(body), true).await?;
        decode(response).await
    }

    /// `DELETE` always carries the bearer token and hands back the raw response.
    pub async fn delete(&self, path: &str) -> Result<Response, ApiError> {
        self.send(Method::DELETE, path, None::<&()>, true).await
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        needs_auth: bool,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let token = if needs_auth { self.session.token() } else { None };

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, path, auth = token.is_some(), "API request");

        let response = request.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "API request did not complete");
            ApiError::network()
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body);
            warn!(%method, path, status = status.as_u16(), %message, "API request rejected");
            return Err(ApiError::status(status.as_u16(), message));
        }

        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(|e| {
        warn!(error = %e, "Failed to read API response body");
        ApiError::network()
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(error = %e, "API response did not match the expected shape");
        ApiError::decode(e)
    })
}
