use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::Config;
use crate::engine::snapshot;
use crate::error::{ErrorCode, MoodtaskError};
use crate::models::{
    AuthResponse, Mood, MoodAnalysis, NewTask, ProfilePatch, Task, TaskPatch, UserProfile,
};

use super::session::Token;
use super::{Authenticator, MoodAnalyzer, ProfileStore, TaskStore};

/// Blocking REST client for the task, mood, user and auth endpoints.
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: Option<Token>,
}

impl HttpApi {
    pub fn new(config: &Config, token: Option<Token>) -> Result<Self, MoodtaskError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| MoodtaskError::config(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn authorized(&self, req: RequestBuilder) -> Result<RequestBuilder, MoodtaskError> {
        let token = self.token.as_ref().ok_or_else(MoodtaskError::not_signed_in)?;
        Ok(req.header(AUTHORIZATION, format!("Bearer {}", token.as_str())))
    }

    fn send(&self, req: RequestBuilder) -> Result<Response, MoodtaskError> {
        let resp = req.send()?;
        let status = resp.status();
        debug!(status = status.as_u16(), url = %resp.url(), "api response");
        if status == StatusCode::UNAUTHORIZED {
            return Err(MoodtaskError::session_expired());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(MoodtaskError::not_found(error_message(resp, status)));
        }
        if !status.is_success() {
            return Err(MoodtaskError::remote(error_message(resp, status)));
        }
        Ok(resp)
    }

    fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, MoodtaskError> {
        let resp = self.send(req)?;
        resp.json::<T>()
            .map_err(|e| MoodtaskError::remote(format!("Unexpected response body: {e}")))
    }

    /// Task arrays go through the snapshot guard: anything but an array is empty.
    fn send_tasks(&self, req: RequestBuilder) -> Result<Vec<Task>, MoodtaskError> {
        let resp = self.send(req)?;
        let body = resp.json::<Value>().ok();
        Ok(snapshot::normalize(body))
    }
}

/// Server errors carry `{"error": ...}`; some proxies use `{"message": ...}`.
fn error_message(resp: Response, status: StatusCode) -> String {
    let body: Option<Value> = resp.json().ok();
    body.as_ref()
        .and_then(|b| b.get("error").or_else(|| b.get("message")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

impl TaskStore for HttpApi {
    fn list(&self) -> Result<Vec<Task>, MoodtaskError> {
        let req = self.authorized(self.client.get(self.url("/tasks")))?;
        self.send_tasks(req)
    }

    fn get(&self, id: i64) -> Result<Task, MoodtaskError> {
        let req = self.authorized(self.client.get(self.url(&format!("/tasks/{id}"))))?;
        self.send_json(req).map_err(|e| not_found_as_task(e, id))
    }

    fn create(&self, task: &NewTask) -> Result<Task, MoodtaskError> {
        let req = self.authorized(self.client.post(self.url("/tasks")).json(task))?;
        self.send_json(req)
    }

    fn update(&self, id: i64, patch: &TaskPatch) -> Result<Task, MoodtaskError> {
        let req = self.authorized(
            self.client
                .put(self.url(&format!("/tasks/{id}")))
                .json(patch),
        )?;
        self.send_json(req).map_err(|e| not_found_as_task(e, id))
    }

    fn delete(&self, id: i64) -> Result<(), MoodtaskError> {
        let req = self.authorized(self.client.delete(self.url(&format!("/tasks/{id}"))))?;
        self.send(req).map_err(|e| not_found_as_task(e, id))?;
        Ok(())
    }

    fn reorganize(&self, mood: Mood) -> Result<Vec<Task>, MoodtaskError> {
        let req = self.authorized(
            self.client
                .post(self.url("/tasks/reorganize"))
                .json(&json!({ "mood": mood })),
        )?;
        self.send_tasks(req)
    }
}

fn not_found_as_task(e: MoodtaskError, id: i64) -> MoodtaskError {
    if e.code == ErrorCode::NotFound {
        MoodtaskError::task_not_found(id)
    } else {
        e
    }
}

impl MoodAnalyzer for HttpApi {
    fn analyze(&self, text: &str) -> Result<MoodAnalysis, MoodtaskError> {
        let req = self.authorized(
            self.client
                .post(self.url("/mood/analyze"))
                .json(&json!({ "text": text })),
        )?;
        self.send_json(req)
    }
}

impl ProfileStore for HttpApi {
    fn profile(&self) -> Result<UserProfile, MoodtaskError> {
        let req = self.authorized(self.client.get(self.url("/user")))?;
        self.send_json(req)
    }

    fn update_profile(&self, patch: &ProfilePatch) -> Result<UserProfile, MoodtaskError> {
        let req = self.authorized(self.client.put(self.url("/user")).json(patch))?;
        self.send_json(req)
    }
}

impl Authenticator for HttpApi {
    fn login(&self, email: &str, password: &str) -> Result<AuthResponse, MoodtaskError> {
        let req = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }));
        self.send_json(req)
    }

    fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, MoodtaskError> {
        let req = self.client.post(self.url("/auth/register")).json(&json!({
            "username": username,
            "email": email,
            "password": password
        }));
        self.send_json(req)
    }
}
