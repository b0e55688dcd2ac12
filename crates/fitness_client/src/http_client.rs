//! HTTP client for the fitness tracker REST backend.
//!
//! Reqwest-based implementation of the [`FitnessStore`](crate::FitnessStore)
//! trait. Endpoints and payload shapes follow the backend's `/api` surface;
//! the bearer token is supplied already-issued (login/refresh belong to the
//! session layer, not here).

use crate::{FitnessStore, GoalRecord, StoreError};
use async_trait::async_trait;
use chrono::NaiveDate;
use fitness_core::{ActivityRecord, WorkoutRecord};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

/// Client for the fitness backend using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestFitnessStore {
    base_url: String,
    token: SecretString,
    client: reqwest::Client,
}

impl ReqwestFitnessStore {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the backend API (e.g. "http://localhost:8080/api")
    /// * `token` - Bearer token for the authenticated user
    pub fn new(base_url: &str, token: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(&config.base_url, config.token.clone())
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.get(url).bearer_auth(self.token.expose_secret())
    }

    /// Build an authenticated POST request.
    fn post_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .bearer_auth(self.token.expose_secret())
    }

    /// Build an authenticated PUT request.
    fn put_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.put(url).bearer_auth(self.token.expose_secret())
    }

    /// Build an authenticated PATCH request.
    fn patch_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .patch(url)
            .bearer_auth(self.token.expose_secret())
    }

    /// Build an authenticated DELETE request.
    fn delete_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(url)
            .bearer_auth(self.token.expose_secret())
    }

    /// Execute a request and expect a JSON response.
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, StoreError> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(resp.json::<T>().await?)
    }

    /// Execute a request with no expected response body.
    async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), StoreError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(())
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> StoreError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        tracing::debug!(status, "backend request failed");

        match status {
            404 => StoreError::NotFound(body_snippet),
            401 | 403 => StoreError::Auth(body_snippet),
            400 | 422 => StoreError::InvalidInput(body_snippet),
            _ => StoreError::Api {
                status,
                body: body_snippet,
            },
        }
    }
}

#[async_trait]
impl FitnessStore for ReqwestFitnessStore {
    async fn get_activities(&self) -> Result<Vec<ActivityRecord>, StoreError> {
        let url = format!("{}/activities", self.base_url);
        self.execute_json(self.get_request(&url)).await
    }

    async fn get_today_activity(&self) -> Result<Option<ActivityRecord>, StoreError> {
        let url = format!("{}/activities/today", self.base_url);
        // backend returns an empty body when nothing is logged today
        let resp = self.get_request(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(self.error_from_response(resp).await);
        }
        let body = resp.text().await?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }
        let record = serde_json::from_str(&body)
            .map_err(|e| StoreError::InvalidInput(format!("unparseable activity: {e}")))?;
        Ok(Some(record))
    }

    async fn create_activity(&self, record: &ActivityRecord) -> Result<ActivityRecord, StoreError> {
        let url = format!("{}/activities", self.base_url);
        self.execute_json(self.post_request(&url).json(record)).await
    }

    async fn get_workouts(&self) -> Result<Vec<WorkoutRecord>, StoreError> {
        let url = format!("{}/workouts", self.base_url);
        self.execute_json(self.get_request(&url)).await
    }

    async fn get_workouts_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<WorkoutRecord>, StoreError> {
        let url = format!("{}/workouts/date/{}", self.base_url, date.format("%Y-%m-%d"));
        self.execute_json(self.get_request(&url)).await
    }

    async fn create_workout(&self, record: &WorkoutRecord) -> Result<WorkoutRecord, StoreError> {
        let url = format!("{}/workouts", self.base_url);
        self.execute_json(self.post_request(&url).json(record)).await
    }

    async fn update_workout(
        &self,
        workout_id: i64,
        record: &WorkoutRecord,
    ) -> Result<WorkoutRecord, StoreError> {
        let url = format!("{}/workouts/{}", self.base_url, workout_id);
        self.execute_json(self.put_request(&url).json(record)).await
    }

    async fn delete_workout(&self, workout_id: i64) -> Result<(), StoreError> {
        let url = format!("{}/workouts/{}", self.base_url, workout_id);
        self.execute_empty(self.delete_request(&url)).await
    }

    async fn get_goals(&self) -> Result<Vec<GoalRecord>, StoreError> {
        let url = format!("{}/goals", self.base_url);
        self.execute_json(self.get_request(&url)).await
    }

    async fn get_active_goals(&self) -> Result<Vec<GoalRecord>, StoreError> {
        let url = format!("{}/goals/active", self.base_url);
        self.execute_json(self.get_request(&url)).await
    }

    async fn create_goal(&self, record: &GoalRecord) -> Result<GoalRecord, StoreError> {
        let url = format!("{}/goals", self.base_url);
        self.execute_json(self.post_request(&url).json(record)).await
    }

    async fn update_goal(
        &self,
        goal_id: i64,
        record: &GoalRecord,
    ) -> Result<GoalRecord, StoreError> {
        let url = format!("{}/goals/{}", self.base_url, goal_id);
        self.execute_json(self.put_request(&url).json(record)).await
    }

    async fn update_goal_progress(
        &self,
        goal_id: i64,
        progress: f64,
    ) -> Result<GoalRecord, StoreError> {
        let url = format!("{}/goals/{}/progress", self.base_url, goal_id);
        let body = json!({ "progress": progress });
        self.execute_json(self.patch_request(&url).json(&body)).await
    }

    async fn delete_goal(&self, goal_id: i64) -> Result<(), StoreError> {
        let url = format!("{}/goals/{}", self.base_url, goal_id);
        self.execute_empty(self.delete_request(&url)).await
    }
}
