// src/infrastructure/http_client.rs
use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::application::{ClientError, NotesApi, RegistrationApi};
use crate::domain::{GradeSummary, Note, NoteDraft, RegistrationRequest, Student};

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Blocking client for the studydesk REST API.
///
/// No request timeout is configured: a stalled call blocks until the server answers.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")?;
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

    fn get(&self, path: &str) -> Result<Response, ClientError> {
        self.client
            .get(self.url(path))
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))
    }

    fn post<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ClientError> {
        let request = self.client.post(self.url(path));
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };
        request
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))
    }

    /// Current grade list
    pub fn grades(&self) -> Result<GradeSummary, ClientError> {
        decode(check(self.get("/api/grades")?, None)?)
    }

    pub fn add_grade(&self, value: i64) -> Result<GradeSummary, ClientError> {
        decode(check(self.get(&format!("/api/grades/add/{}", value))?, None)?)
    }

    pub fn remove_grade(&self) -> Result<GradeSummary, ClientError> {
        decode(check(self.get("/api/grades/remove")?, None)?)
    }
}

/// Map error statuses. `note_id` turns a 404 into `NotFound` for note routes.
fn check(response: Response, note_id: Option<i64>) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, note_id) {
        return Err(ClientError::NotFound(id));
    }

    let message = response
        .json::<ErrorBody>()
        .map(|body| body.error)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json::<T>()
        .map_err(|e| ClientError::Decode(e.to_string()))
}

impl NotesApi for HttpApi {
    #[instrument(level = "debug", skip(self))]
    fn list(&mut self) -> Result<Vec<Note>, ClientError> {
        let notes: Vec<Note> = decode(check(self.get("/api/notes")?, None)?)?;
        debug!(count = notes.len(), "Fetched notes");
        Ok(notes)
    }

    #[instrument(level = "debug", skip(self))]
    fn create(&mut self, draft: &NoteDraft) -> Result<(), ClientError> {
        check(self.post("/api/notes/create", Some(draft))?, None)?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn update(&mut self, id: i64, draft: &NoteDraft) -> Result<(), ClientError> {
        let path = format!("/api/notes/update/{}", id);
        check(self.post(&path, Some(draft))?, Some(id))?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        let path = format!("/api/notes/delete/{}", id);
        check(self.post::<()>(&path, None)?, Some(id))?;
        Ok(())
    }
}

impl RegistrationApi for HttpApi {
    #[instrument(level = "debug", skip(self))]
    fn register(&mut self, request: &RegistrationRequest) -> Result<(), ClientError> {
        check(self.post("/api/register", Some(request))?, None)?;
        Ok(())
    }

    fn students(&mut self) -> Result<Vec<Student>, ClientError> {
        decode(check(self.get("/api/students")?, None)?)
    }
}
