use crate::storage::{LocalTokenStorage, TokenStorage};
use shared::models::{Itinerary, PlanResponse, PlanSource};
use yewdux::{Context, Store};

/// Application-wide session and plan state.
///
/// Only the session store writes to it; views read it through selectors.
/// Authentication is derived from the token, so the two can never disagree.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AppState {
    /// Bearer token of the current session.
    pub token: Option<String>,
    /// Itinerary from the last successful plan request.
    pub itinerary: Option<Itinerary>,
    /// Where [`Self::itinerary`] came from.
    pub plan_source: Option<PlanSource>,
    /// A network operation is in flight.
    pub is_loading: bool,
    /// Display text of the last failed operation.
    pub error: Option<String>,
    /// Bumped whenever a session starts or ends; results of requests issued
    /// under an older epoch are discarded.
    pub session_epoch: u64,
}

impl Store for AppState {
    fn new(_cx: &Context) -> Self {
        Self::rehydrate(&LocalTokenStorage::default())
    }

    fn should_notify(&self, old: &Self) -> bool {
        self != old
    }
}

impl AppState {
    /// Initial state with the session restored from durable storage.
    pub fn rehydrate(storage: &impl TokenStorage) -> Self {
        Self {
            token: storage.load_token().filter(|token| !token.is_empty()),
            ..Self::default()
        }
    }

    /// Whether a session token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Marks a network operation as in flight.
    pub fn begin_request(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Records a failed operation.
    pub fn fail_request(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    /// Ends a successful operation that produced no state.
    pub fn finish_request(&mut self) {
        self.is_loading = false;
    }

    /// Starts a new session with `token`.
    pub fn complete_login(&mut self, token: String) {
        self.token = Some(token);
        self.session_epoch = self.session_epoch.wrapping_add(1);
        self.is_loading = false;
    }

    /// Stores a received itinerary.
    pub fn complete_plan(&mut self, response: PlanResponse) {
        self.itinerary = Some(response.itinerary);
        self.plan_source = response.source;
        self.is_loading = false;
    }

    /// Forgets the itinerary and its source.
    pub fn clear_plan(&mut self) {
        self.itinerary = None;
        self.plan_source = None;
    }

    /// Drops the session and everything obtained with it.
    pub fn clear_session(&mut self) {
        self.token = None;
        self.session_epoch = self.session_epoch.wrapping_add(1);
        self.clear_plan();
    }
}
