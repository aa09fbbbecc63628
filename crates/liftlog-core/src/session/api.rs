//! Workout backend client.
//!
//! Three JSON endpoints back the exercise page: update a set, update the
//! exercise notes, append a set. Each answers `{"status": "success", ...}` or
//! `{"status": "error", "message": ...}` (with a 400).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::ApiError;

pub const SET_UPDATE_PATH: &str = "api/set/update/";
pub const NOTES_UPDATE_PATH: &str = "api/notes/update/";
pub const SET_ADD_PATH: &str = "api/set/add/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetUpdate {
    pub set_id: i64,
    pub weight: f64,
    pub reps: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesUpdate {
    pub exercise_session_id: i64,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSetRequest {
    pub exercise_session_id: i64,
}

/// The set the backend just created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedSet {
    pub set_id: i64,
    pub set_number: u32,
}

#[derive(Debug, Deserialize)]
struct Reply {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    set_id: Option<i64>,
    #[serde(default)]
    set_number: Option<u32>,
}

/// Persistence calls the exercise page makes.
#[allow(async_fn_in_trait)]
pub trait WorkoutBackend {
    async fn update_set(&self, update: &SetUpdate) -> Result<(), ApiError>;
    async fn update_notes(&self, update: &NotesUpdate) -> Result<(), ApiError>;
    async fn add_set(&self, request: &AddSetRequest) -> Result<AddedSet, ApiError>;
}

/// HTTP implementation of [`WorkoutBackend`].
#[derive(Debug, Clone)]
pub struct WorkoutApi {
    client: Client,
    base_url: Url,
    csrf_token: Option<String>,
}

impl WorkoutApi {
    /// `base_url` is the site root; endpoint paths are joined onto it.
    pub fn new(base_url: &str, csrf_token: Option<String>) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            csrf_token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Reply, ApiError> {
        let url = self.base_url.join(path)?;
        debug!(%url, "posting to workout backend");
        let mut request = self.client.post(url).json(body);
        if let Some(token) = &self.csrf_token {
            request = request.header("X-CSRFToken", token);
        }
        let reply: Reply = request.send().await?.json().await?;
        if reply.status == "success" {
            Ok(reply)
        } else {
            Err(ApiError::Rejected {
                endpoint: path.to_string(),
                message: reply.message.unwrap_or(reply.status),
            })
        }
    }
}

impl WorkoutBackend for WorkoutApi {
    async fn update_set(&self, update: &SetUpdate) -> Result<(), ApiError> {
        self.post(SET_UPDATE_PATH, update).await.map(|_| ())
    }

    async fn update_notes(&self, update: &NotesUpdate) -> Result<(), ApiError> {
        self.post(NOTES_UPDATE_PATH, update).await.map(|_| ())
    }

    async fn add_set(&self, request: &AddSetRequest) -> Result<AddedSet, ApiError> {
        let reply = self.post(SET_ADD_PATH, request).await?;
        match (reply.set_id, reply.set_number) {
            (Some(set_id), Some(set_number)) => Ok(AddedSet { set_id, set_number }),
            _ => Err(ApiError::Rejected {
                endpoint: SET_ADD_PATH.to_string(),
                message: "reply is missing set_id or set_number".to_string(),
            }),
        }
    }
}
