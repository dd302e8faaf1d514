//! Live data source backed by the maintenance REST API.

use crate::{
    domain::{
        CalendarEvent, Equipment, EquipmentId, MaintenanceRequest, NewRequest, RequestFilter,
        RequestId, RequestStatus,
    },
    error::{GearGuardError, Result},
    source::DataSource,
};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// List endpoints answer either with a page envelope or a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Page { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Page { results } => results,
            Self::Plain(items) => items,
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: RequestStatus,
}

/// REST client for the maintenance backend
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a non-2xx response into an API error, keeping every server message
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let messages = error_messages(&body, status.canonical_reason());
        tracing::error!(status = status.as_u16(), messages = ?messages, "API request failed");

        Err(GearGuardError::Api {
            status: status.as_u16(),
            messages,
        })
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Vec<T>> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Fetching list");

        let response = self.client.get(&url).query(query).send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "HTTP request failed");
            e
        })?;
        let listing: Listing<T> = Self::check(response).await?.json().await?;
        Ok(listing.into_items())
    }
}

/// Collects every string in a JSON error body.
///
/// Bodies that are not JSON are used verbatim; empty bodies fall back to the
/// HTTP reason phrase.
pub fn error_messages(body: &str, reason: Option<&str>) -> Vec<String> {
    fn collect(value: &serde_json::Value, out: &mut Vec<String>) {
        match value {
            serde_json::Value::String(s) => out.push(s.clone()),
            serde_json::Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
            serde_json::Value::Object(map) => map.values().for_each(|v| collect(v, out)),
            _ => {}
        }
    }

    let mut messages = Vec::new();
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => collect(&value, &mut messages),
        Err(_) if !body.trim().is_empty() => messages.push(body.trim().to_string()),
        Err(_) => {}
    }

    if messages.is_empty() {
        messages.push(reason.unwrap_or("Request failed").to_string());
    }
    messages
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn list_requests(&self, filter: &RequestFilter) -> Result<Vec<MaintenanceRequest>> {
        self.get_list("/requests/", &filter.query_pairs()).await
    }

    #[tracing::instrument(skip_all, fields(request_id = %id, status = status.code()))]
    async fn update_request_status(&self, id: RequestId, status: RequestStatus) -> Result<()> {
        let url = self.url(&format!("/requests/{}/status/", id));
        let response = self
            .client
            .patch(&url)
            .json(&StatusUpdate { status })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "Status update failed in transport");
                e
            })?;

        Self::check(response).await?;
        tracing::debug!("Status update accepted");
        Ok(())
    }

    async fn create_request(&self, request: &NewRequest) -> Result<MaintenanceRequest> {
        request.validate()?;
        let response = self
            .client
            .post(self.url("/requests/"))
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_equipment(&self) -> Result<Vec<Equipment>> {
        self.get_list("/equipment/", &[]).await
    }

    async fn equipment_requests(&self, id: EquipmentId) -> Result<Vec<MaintenanceRequest>> {
        self.get_list(&format!("/equipment/{}/requests/", id), &[])
            .await
    }

    async fn list_calendar(&self) -> Result<Vec<CalendarEvent>> {
        self.get_list("/calendar/", &[]).await
    }
}
