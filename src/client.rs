//! Typed access to the movie API for UI code.
//!
//! Every failure, whether local validation, a 4xx/5xx answer, or a transport
//! problem, comes back as one [`ClientError`] carrying a displayable message.
//! The variant keeps the category so callers can still branch on it.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config::ClientConfig,
    models::{Message, Movie, MovieDraft},
    validation::{self, ValidationErrors},
};

const INVALID_ID_MESSAGE: &str = "Invalid movie ID format";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Rejected before sending (`fields` set) or by the server with a 400.
    #[error("{message}")]
    Validation { message: String, fields: ValidationErrors },

    #[error("{message}")]
    InvalidId { message: String },

    #[error("{message}")]
    NotFound { message: String },

    /// Any other non-success status.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// The request never produced a readable answer.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    pub fn message(&self) -> &str {
        match self {
            ClientError::Validation { message, .. }
            | ClientError::InvalidId { message }
            | ClientError::NotFound { message }
            | ClientError::Backend { message, .. }
            | ClientError::Transport { message, .. } => message,
        }
    }

    fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST if message == INVALID_ID_MESSAGE => {
                ClientError::InvalidId { message }
            },
            StatusCode::BAD_REQUEST => {
                ClientError::Validation { message, fields: ValidationErrors::default() }
            },
            StatusCode::NOT_FOUND => ClientError::NotFound { message },
            other => ClientError::Backend { status: other.as_u16(), message },
        }
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(fields: ValidationErrors) -> Self {
        ClientError::Validation { message: fields.to_string(), fields }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Clone, Debug)]
pub struct MovieClient {
    http: reqwest::Client,
    base_url: String,
}

impl MovieClient {
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent("movietrack/0.1")
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_movies(&self) -> ClientResult<Vec<Movie>> {
        let resp = self.http.get(self.collection_url()).send().await;
        read_json(resp, "Failed to fetch movies").await
    }

    pub async fn get_movie(&self, id: &str) -> ClientResult<Movie> {
        let resp = self.http.get(self.movie_url(id)).send().await;
        read_json(resp, "Failed to fetch movie").await
    }

    pub async fn create_movie(&self, draft: &MovieDraft) -> ClientResult<Movie> {
        let draft = validation::validate_draft(draft)?;
        let resp = self.http.post(self.collection_url()).json(&draft).send().await;
        read_json(resp, "Failed to add movie").await
    }

    pub async fn update_movie(&self, id: &str, draft: &MovieDraft) -> ClientResult<Movie> {
        let draft = validation::validate_draft(draft)?;
        let resp = self.http.put(self.movie_url(id)).json(&draft).send().await;
        read_json(resp, "Failed to update movie").await
    }

    pub async fn delete_movie(&self, id: &str) -> ClientResult<()> {
        let resp = self.http.delete(self.movie_url(id)).send().await;
        let _: Message = read_json(resp, "Failed to delete movie").await?;
        Ok(())
    }

    fn collection_url(&self) -> String {
        format!("{}/movies", self.base_url)
    }

    fn movie_url(&self, id: &str) -> String {
        format!("{}/movies/{}", self.base_url, urlencoding::encode(id))
    }
}

async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Result<Response>,
    fallback: &str,
) -> ClientResult<T> {
    let transport = |source: reqwest::Error| ClientError::Transport {
        message: fallback.to_string(),
        source,
    };

    let resp = resp.map_err(transport)?;
    let status = resp.status();
    if status.is_success() {
        return resp.json::<T>().await.map_err(transport);
    }

    let message = resp
        .json::<Message>()
        .await
        .ok()
        .map(|m| m.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    tracing::debug!(status = %status, message = %message, "movie api request failed");
    Err(ClientError::from_status(status, message))
}
