//! Client library for connecting to a Gesedels server
//!
//! Provides a simple interface for interacting with the pair store over HTTP

use crate::error::{GesedelsError, Result};
use reqwest::{StatusCode, Url};

/// Client for connecting to a Gesedels server
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Create a client for the server at `addr`, e.g. `127.0.0.1:8080`
    pub fn new(addr: &str) -> Result<Self> {
        let base_url = Url::parse(&format!("http://{}/", addr))
            .map_err(|e| GesedelsError::Client(format!("invalid server address {}: {}", addr, e)))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Build the percent-encoded URL of a pair
    fn pair_url(&self, user: &str, name: &str) -> Result<Url> {
        if user.is_empty() || name.is_empty() {
            return Err(GesedelsError::Client(format!(
                "user and name must not be empty (got {:?}:{:?})",
                user, name
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GesedelsError::Client(format!("cannot address pairs at {}", self.base_url)))?
            .clear()
            .push(user)
            .push(name);
        Ok(url)
    }

    /// Read a response body, turning error statuses into errors
    async fn read_body(response: reqwest::Response) -> Result<(StatusCode, String)> {
        let status = response.status();
        let body = response.text().await?;
        let body = body.strip_suffix('\n').unwrap_or(&body).to_string();

        if status.is_server_error() {
            Err(GesedelsError::Server(body))
        } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
            Err(GesedelsError::Client(body))
        } else {
            Ok((status, body))
        }
    }

    /// Fetch the index page
    pub async fn index(&self) -> Result<String> {
        let response = self.http.get(self.base_url.clone()).send().await?;
        match Self::read_body(response).await? {
            (StatusCode::OK, body) => Ok(body),
            (_, body) => Err(GesedelsError::Client(body)),
        }
    }

    /// Get the value of a pair
    pub async fn get(&self, user: &str, name: &str) -> Result<Option<String>> {
        let response = self.http.get(self.pair_url(user, name)?).send().await?;
        match Self::read_body(response).await? {
            (StatusCode::NOT_FOUND, _) => Ok(None),
            (_, body) => Ok(Some(body)),
        }
    }

    /// Set the value of a pair
    pub async fn set(&self, user: &str, name: &str, value: &str) -> Result<()> {
        let response = self
            .http
            .put(self.pair_url(user, name)?)
            .body(value.to_string())
            .send()
            .await?;
        match Self::read_body(response).await? {
            (StatusCode::NOT_FOUND, body) => Err(GesedelsError::Client(body)),
            _ => Ok(()),
        }
    }

    /// Delete a pair
    pub async fn delete(&self, user: &str, name: &str) -> Result<()> {
        let response = self.http.delete(self.pair_url(user, name)?).send().await?;
        match Self::read_body(response).await? {
            (StatusCode::NOT_FOUND, body) => Err(GesedelsError::Client(body)),
            _ => Ok(()),
        }
    }
}
