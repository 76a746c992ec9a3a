// ABOUTME: HTTP client wrapper for the hosted backend's REST surface
// ABOUTME: Centralizes auth headers, status-code mapping, and PostgREST conventions

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Gateway operation errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication failed: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Constraint violation: {0}")]
    Constraint(String),
    #[error("HTTP error ({status}): {body}")]
    Http { status: u16, body: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Client for the backend's REST surface
///
/// Every public entity operation issues exactly one network round trip.
/// Row shapes stay private to this crate; callers only ever see core types.
#[derive(Clone)]
pub struct Gateway {
    http_client: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl Gateway {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> GatewayResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: None,
        })
    }

    /// Set the access token after authentication
    pub fn set_access_token(&mut self, token: String) {
        self.access_token = Some(token);
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> String {
        match &self.access_token {
            Some(token) => format!("Bearer {}", token),
            None => format!("Bearer {}", self.anon_key),
        }
    }

    pub(crate) fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", self.auth_header())
    }

    /// Check connectivity to the backend
    pub async fn health_check(&self) -> GatewayResult<bool> {
        let url = format!("{}/rest/v1/", self.base_url);
        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(response.status().is_success())
    }

    async fn check(response: Response) -> GatewayResult<Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GatewayError::Unauthorized(
                "Invalid or expired credentials".to_string(),
            )),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound(
                response.text().await.unwrap_or_default(),
            )),
            StatusCode::CONFLICT => Err(GatewayError::Constraint(
                response.text().await.unwrap_or_default(),
            )),
            status => {
                let body = response.text().await.unwrap_or_else(|_| status.to_string());
                // Foreign-key and check violations surface as 400s with a
                // 23xxx SQLSTATE in the error body
                if body.contains("\"23") {
                    Err(GatewayError::Constraint(body))
                } else {
                    Err(GatewayError::Http {
                        status: status.as_u16(),
                        body,
                    })
                }
            }
        }
    }

    /// Open the push change feed for one table as an event-stream response
    ///
    /// The caller owns the streaming body; payloads are opaque and the
    /// listener discards them in favor of a full refetch.
    pub async fn open_change_feed(&self, table: &str) -> GatewayResult<Response> {
        let url = format!("{}/realtime/v1/changes", self.base_url);
        let response = self
            .request(Method::GET, &url)
            .header("Accept", "text/event-stream")
            .query(&[("table", table)])
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Self::check(response).await
    }

    /// GET rows from a table with the given query pairs
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> GatewayResult<Vec<T>> {
        let response = self
            .request(Method::GET, &self.table_url(table))
            .query(query)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let response = Self::check(response).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    /// INSERT one row and return the persisted representation
    pub(crate) async fn insert<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> GatewayResult<T> {
        let response = self
            .request(Method::POST, &self.table_url(table))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let response = Self::check(response).await?;
        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        if rows.is_empty() {
            return Err(GatewayError::InvalidResponse("No row returned".to_string()));
        }
        Ok(rows.remove(0))
    }

    /// INSERT one row without asking for the representation back
    pub(crate) async fn insert_only<B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> GatewayResult<()> {
        let response = self
            .request(Method::POST, &self.table_url(table))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Self::check(response).await?;
        Ok(())
    }

    /// PATCH the row matching `id` and return the updated representation
    pub(crate) async fn update_by_id<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        id: &str,
        body: &B,
    ) -> GatewayResult<T> {
        let response = self
            .request(Method::PATCH, &self.table_url(table))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", id))])
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let response = Self::check(response).await?;
        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        if rows.is_empty() {
            return Err(GatewayError::NotFound(format!("{} {}", table, id)));
        }
        Ok(rows.remove(0))
    }

    /// DELETE the row matching `id`
    pub(crate) async fn delete_by_id(&self, table: &str, id: &str) -> GatewayResult<()> {
        let filter = format!("eq.{}", id);
        self.delete_where(table, &[("id", filter.as_str())]).await
    }

    /// DELETE rows matching the given filters
    pub(crate) async fn delete_where(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> GatewayResult<()> {
        let response = self
            .request(Method::DELETE, &self.table_url(table))
            .query(query)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let gateway = Gateway::new("https://db.example.com/", "anon").unwrap();
        assert_eq!(
            gateway.table_url("projects"),
            "https://db.example.com/rest/v1/projects"
        );
    }

    #[test]
    fn test_auth_header_prefers_access_token() {
        let mut gateway = Gateway::new("https://db.example.com", "anon").unwrap();
        assert_eq!(gateway.auth_header(), "Bearer anon");
        gateway.set_access_token("session-token".to_string());
        assert_eq!(gateway.auth_header(), "Bearer session-token");
    }
}
