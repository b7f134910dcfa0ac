//! Session store: authentication and itinerary operations.
//!
//! Every backend call goes through [`SessionStore`]. Operations never panic;
//! failures come back as a [`SessionError`] and their text is mirrored into
//! [`AppState::error`] for the views.

use crate::api::{ApiError, PlannerApi, TripPlannerClient};
use crate::models::app_state::AppState;
use crate::storage::{LocalTokenStorage, StorageError, TokenStorage};
use shared::models::{Credentials, TokenResponse, TripRequest};
use std::rc::Rc;
use thiserror::Error;
use yew::hook;
use yewdux::{Dispatch, prelude::use_dispatch};

/// Failure of a session operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A plan was requested without a session.
    #[error("You must be logged in to create a plan.")]
    Unauthenticated,
    /// The backend accepted the credentials but returned no token.
    #[error("The server did not return an access token.")]
    MissingToken,
    /// The session that issued a request ended before its response arrived.
    #[error("The session ended before the plan arrived.")]
    SessionEnded,
    /// The backend refused the request or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The token could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Read/write access to the application state.
pub trait SessionStateHandle {
    /// Current state.
    fn snapshot(&self) -> Rc<AppState>;

    /// Applies `mutate` to the state and notifies subscribers.
    fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut AppState);
}

impl SessionStateHandle for Dispatch<AppState> {
    fn snapshot(&self) -> Rc<AppState> {
        self.get()
    }

    fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut AppState),
    {
        self.reduce_mut(mutate);
    }
}

/// Session store wired to the real backend, browser storage and yewdux.
pub type AppSession = SessionStore<TripPlannerClient, LocalTokenStorage, Dispatch<AppState>>;

/// Hook returning the application's session store.
#[hook]
pub fn use_session() -> AppSession {
    let dispatch = use_dispatch::<AppState>();
    SessionStore::new(
        TripPlannerClient::shared(),
        LocalTokenStorage::default(),
        dispatch,
    )
}

/// Session operations over a backend, token storage and state handle.
#[derive(Debug, Clone)]
pub struct SessionStore<A, S, H> {
    api: A,
    storage: S,
    state: H,
}

impl<A, S, H> SessionStore<A, S, H>
where
    A: PlannerApi,
    S: TokenStorage,
    H: SessionStateHandle,
{
    /// Wires a store over its backend, token storage and state.
    pub fn new(api: A, storage: S, state: H) -> Self {
        Self {
            api,
            storage,
            state,
        }
    }

    /// Logs in and persists the returned token.
    ///
    /// # Errors
    /// Returns the backend's rejection, a transport failure, or
    /// [`SessionError::MissingToken`]/[`SessionError::Storage`] when the token
    /// cannot be kept.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), SessionError> {
        self.state.update(AppState::begin_request);
        let credentials = Credentials::new(username, password);
        let result = match self.api.request_token(&credentials).await {
            Ok(TokenResponse { access_token, .. }) if access_token.is_empty() => {
                Err(SessionError::MissingToken)
            }
            Ok(TokenResponse { access_token, .. }) => self
                .storage
                .store_token(&access_token)
                .map(|()| access_token)
                .map_err(SessionError::from),
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(token) => {
                log::info!("logged in as {username}");
                self.state.update(|state| state.complete_login(token));
                Ok(())
            }
            Err(err) => Err(self.fail("login", err)),
        }
    }

    /// Registers a new account. Does not log in.
    ///
    /// # Errors
    /// Returns the backend's rejection or a transport failure.
    pub async fn signup(&self, username: &str, password: &str) -> Result<(), SessionError> {
        self.state.update(AppState::begin_request);
        let credentials = Credentials::new(username, password);
        match self.api.register(&credentials).await {
            Ok(()) => {
                log::info!("registered account {username}");
                self.state.update(AppState::finish_request);
                Ok(())
            }
            Err(err) => Err(self.fail("signup", err.into())),
        }
    }

    /// Ends the session, forgetting the token and any plan.
    pub fn logout(&self) {
        self.storage.clear_token();
        self.state.update(AppState::clear_session);
        log::info!("logged out");
    }

    /// Requests an itinerary for `request` with the current session.
    ///
    /// A response arriving after the issuing session ended is dropped and
    /// reported as [`SessionError::SessionEnded`]; the state is left alone
    /// apart from clearing the loading flag.
    ///
    /// # Errors
    /// Returns [`SessionError::Unauthenticated`] without contacting the
    /// backend when there is no session, [`SessionError::SessionEnded`] when
    /// the session changed mid-request, otherwise the backend's rejection or
    /// a transport failure.
    pub async fn generate_plan(&self, request: &TripRequest) -> Result<(), SessionError> {
        let snapshot = self.state.snapshot();
        let epoch = snapshot.session_epoch;
        let Some(token) = snapshot.token.clone() else {
            let err = SessionError::Unauthenticated;
            log::warn!("plan requested without a session");
            let message = err.to_string();
            self.state.update(|state| state.error = Some(message));
            return Err(err);
        };

        self.state.update(|state| {
            state.begin_request();
            state.clear_plan();
        });
        log::debug!(
            "requesting plan for {} from {} to {}",
            request.destination,
            request.start_date,
            request.end_date
        );
        let outcome = self.api.generate_plan(&token, request).await;

        if self.state.snapshot().session_epoch != epoch {
            log::info!(
                "discarding plan for {}: session ended while it was in flight",
                request.destination
            );
            self.state.update(AppState::finish_request);
            return Err(SessionError::SessionEnded);
        }

        match outcome {
            Ok(response) => {
                log::info!("received itinerary for {}", request.destination);
                self.state.update(|state| state.complete_plan(response));
                Ok(())
            }
            Err(err) => Err(self.fail("plan generation", err.into())),
        }
    }

    /// Discards the held itinerary; the session is untouched.
    pub fn clear_plan(&self) {
        self.state.update(AppState::clear_plan);
    }

    fn fail(&self, operation: &str, err: SessionError) -> SessionError {
        let status = match &err {
            SessionError::Api(api) => api.status(),
            _ => None,
        };
        match status {
            Some(status) => log::warn!("{operation} rejected with status {status}: {err}"),
            None => log::warn!("{operation} failed: {err}"),
        }
        let message = err.to_string();
        self.state.update(|state| state.fail_request(message));
        err
    }
}
