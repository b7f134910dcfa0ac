use crate::config::FrontendConfig;
use async_trait::async_trait;
use once_cell::unsync::OnceCell;
use reqwest::{Client, Response};
use shared::models::{Credentials, ErrorDetail, PlanResponse, TokenResponse, TripRequest};
use thiserror::Error;

const TOKEN_PATH: &str = "token";
const REGISTER_PATH: &str = "register";
const GENERATE_PLAN_PATH: &str = "generate-plan";

/// Message used when a failure carries no description at all.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

thread_local! {
    static SHARED_CLIENT: OnceCell<TripPlannerClient> = OnceCell::new();
}

/// Failure of a backend call.
///
/// The display text is what the views show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    /// Builds a rejection from a status code and the raw response body,
    /// preferring the backend's `detail` text.
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = ErrorDetail::parse(body)
            .and_then(|detail| detail.message())
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        Self::Rejected { status, message }
    }

    pub fn transport(description: impl Into<String>) -> Self {
        let description = description.into();
        if description.trim().is_empty() {
            Self::Transport(UNKNOWN_ERROR_MESSAGE.to_string())
        } else {
            Self::Transport(description)
        }
    }

    /// HTTP status of a rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

/// Backend operations the session store depends on.
#[async_trait(?Send)]
pub trait PlannerApi {
    /// Exchanges credentials for a bearer token (`POST /token`).
    async fn request_token(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError>;

    /// Creates an account (`POST /register`). The response body is ignored.
    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError>;

    /// Requests an itinerary for `request` (`POST /generate-plan`).
    async fn generate_plan(
        &self,
        token: &str,
        request: &TripRequest,
    ) -> Result<PlanResponse, ApiError>;
}

/// HTTP client for the trip-planning backend.
#[derive(Clone, Debug)]
pub struct TripPlannerClient {
    base_url: String,
    client: Client,
}

impl TripPlannerClient {
    /// Create a new API client with the provided base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Client bound to the configured backend, created once per thread.
    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| Self::new(FrontendConfig::new().api_base_url()))
                .clone()
        })
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::rejected(status.as_u16(), &body))
    }
}

#[async_trait(?Send)]
impl PlannerApi for TripPlannerClient {
    async fn request_token(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        let response = self
            .client
            .post(self.api_url(TOKEN_PATH))
            .form(&credentials.form_fields())
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.api_url(REGISTER_PATH))
            .form(&credentials.form_fields())
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn generate_plan(
        &self,
        token: &str,
        request: &TripRequest,
    ) -> Result<PlanResponse, ApiError> {
        let response = self
            .client
            .post(self.api_url(GENERATE_PLAN_PATH))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }
}
