//! Remote time-tracking API client
//!
//! Implements the core engine's `InstanceClient` port against the
//! service's REST API. One client per instance; the API key travels as a
//! token authorization header on every request.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use timebridge_core::InstanceClient;
use timebridge_domain::{
    Activity, ActivityFilters, InstanceConfig, Project, Result, TimebridgeError,
};
use tracing::{debug, instrument};

use super::dto::{ActivityDto, ActivityPayload, ProjectDto};
use crate::errors::InfraError;
use crate::http::HttpClient;

const USER_AGENT: &str = concat!("timebridge/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`RemoteClient`].
#[derive(Debug, Clone)]
pub struct RemoteClientConfig {
    /// API base URL, e.g. `https://acme.example.com/api/v1`.
    pub base_url: String,
    pub api_key: String,
    /// Timeout for API requests.
    pub timeout: Duration,
    /// Total attempts per request (initial try + retries).
    pub max_attempts: usize,
}

impl RemoteClientConfig {
    /// Configuration from a catalog entry, with default timeout and
    /// retry settings.
    pub fn from_instance(instance: &InstanceConfig) -> Self {
        Self {
            base_url: instance.base_url.clone(),
            api_key: instance.api_key.clone(),
            timeout: Duration::from_secs(30),
            max_attempts: 3,
        }
    }
}

/// Blocking client for one instance of the remote service.
pub struct RemoteClient {
    http: HttpClient,
    base_url: String,
}

impl RemoteClient {
    /// Build a client for one instance.
    ///
    /// # Errors
    /// Returns `TimebridgeError::Config` if the API key cannot form a
    /// valid header value.
    pub fn new(config: RemoteClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(&format!("Token token={}", config.api_key))
            .map_err(|_| {
                TimebridgeError::Config("api key contains invalid header characters".into())
            })?;
        token.set_sensitive(true);
        headers.insert(AUTHORIZATION, token);

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let builder = self.http.request(Method::GET, self.url(path)).query(query);
        let response = self.http.send(builder)?;
        Self::decode(response)
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: &ActivityPayload<'_>,
    ) -> Result<T> {
        let builder = self.http.request(method, self.url(path)).json(payload);
        let response = self.http.send(builder)?;
        Self::decode(response)
    }

    fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(InfraError::from_status(status, body).into());
        }
        response.json::<T>().map_err(|err| {
            let infra: InfraError = err.into();
            TimebridgeError::from(infra)
        })
    }
}

/// Render filters as query parameters. Filter semantics live on the
/// server; absent filters simply do not travel.
fn filter_query(filters: &ActivityFilters) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(from) = &filters.from {
        query.push(("from", from.clone()));
    }
    if let Some(to) = &filters.to {
        query.push(("to", to.clone()));
    }
    if let Some(project_id) = filters.project_id {
        query.push(("project_id", project_id.to_string()));
    }
    if let Some(company_id) = filters.company_id {
        query.push(("company_id", company_id.to_string()));
    }
    if let Some(term) = &filters.term {
        query.push(("term", term.clone()));
    }
    query
}

impl InstanceClient for RemoteClient {
    #[instrument(skip(self, filters), fields(base_url = %self.base_url))]
    fn assigned_projects(&self, filters: &ActivityFilters) -> Result<Vec<Project>> {
        let mut query = filter_query(filters);
        query.push(("active", "true".to_string()));

        let projects: Vec<ProjectDto> = self.get_json("projects/assigned", &query)?;
        debug!(count = projects.len(), "fetched assigned projects");
        Ok(projects.into_iter().map(ProjectDto::into_domain).collect())
    }

    #[instrument(skip(self, filters), fields(base_url = %self.base_url))]
    fn activities(&self, filters: &ActivityFilters) -> Result<Vec<Activity>> {
        let query = filter_query(filters);
        let activities: Vec<ActivityDto> = self.get_json("activities", &query)?;
        debug!(count = activities.len(), "fetched activities");
        Ok(activities.into_iter().map(ActivityDto::into_domain).collect())
    }

    #[instrument(skip(self, draft), fields(base_url = %self.base_url))]
    fn create_activity(&self, draft: &Activity) -> Result<Activity> {
        let payload = ActivityPayload::from(draft);
        let created: ActivityDto = self.send_json(Method::POST, "activities", &payload)?;
        debug!(id = created.id, "created activity");
        Ok(created.into_domain())
    }

    #[instrument(skip(self, activity), fields(base_url = %self.base_url, id = activity.id))]
    fn update_activity(&self, activity: &Activity) -> Result<Activity> {
        let payload = ActivityPayload::from(activity);
        let path = format!("activities/{}", activity.id);
        let updated: ActivityDto = self.send_json(Method::PUT, &path, &payload)?;
        debug!(id = updated.id, "updated activity");
        Ok(updated.into_domain())
    }
}
