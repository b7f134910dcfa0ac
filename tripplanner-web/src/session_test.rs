//! Tests for the session store
//!
//! Drives every session operation against an in-memory backend and token
//! storage, checking the state the views observe afterwards.

use crate::api::{ApiError, PlannerApi};
use crate::models::app_state::AppState;
use crate::session::{SessionError, SessionStateHandle, SessionStore};
use crate::storage::{MemoryTokenStorage, TokenStorage};
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::channel::oneshot;
use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;
use serde_json::json;
use shared::models::{
    Credentials, Itinerary, PlanResponse, PlanSource, TokenResponse, TripField, TripRequest,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Token(String),
    Register(String),
    Plan { token: String, request: TripRequest },
}

/// Backend double answering every call with a canned reply.
#[derive(Clone)]
struct FakeBackend {
    token_reply: Result<TokenResponse, ApiError>,
    register_reply: Result<(), ApiError>,
    plan_reply: Result<PlanResponse, ApiError>,
    calls: Rc<RefCell<Vec<Call>>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            token_reply: Ok(TokenResponse {
                access_token: "token-alice".to_string(),
                token_type: Some("bearer".to_string()),
            }),
            register_reply: Ok(()),
            plan_reply: Ok(PlanResponse {
                itinerary: Itinerary(json!({"days": [{"day": 1, "plan": "Arrive in Kyoto"}]})),
                source: Some(PlanSource::NewlyGenerated),
            }),
            calls: Rc::default(),
        }
    }
}

impl FakeBackend {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PlannerApi for FakeBackend {
    async fn request_token(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::Token(credentials.username.clone()));
        self.token_reply.clone()
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::Register(credentials.username.clone()));
        self.register_reply.clone()
    }

    async fn generate_plan(
        &self,
        token: &str,
        request: &TripRequest,
    ) -> Result<PlanResponse, ApiError> {
        self.calls.borrow_mut().push(Call::Plan {
            token: token.to_string(),
            request: request.clone(),
        });
        self.plan_reply.clone()
    }
}

type PlanReply = Result<PlanResponse, ApiError>;

/// Backend whose plan calls stay pending until the test answers them, in
/// whatever order it chooses.
#[derive(Clone, Default)]
struct GatedBackend {
    pending: Rc<RefCell<VecDeque<oneshot::Receiver<PlanReply>>>>,
}

impl GatedBackend {
    /// Queues the gate for the next plan call and returns its sender.
    fn gate(&self) -> oneshot::Sender<PlanReply> {
        let (sender, receiver) = oneshot::channel();
        self.pending.borrow_mut().push_back(receiver);
        sender
    }
}

#[async_trait(?Send)]
impl PlannerApi for GatedBackend {
    async fn request_token(&self, _credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        Ok(TokenResponse {
            access_token: "token-bob".to_string(),
            token_type: None,
        })
    }

    async fn register(&self, _credentials: &Credentials) -> Result<(), ApiError> {
        Ok(())
    }

    async fn generate_plan(&self, _token: &str, _request: &TripRequest) -> PlanReply {
        let gate = self.pending.borrow_mut().pop_front();
        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(ApiError::transport("gate dropped"))),
            None => Err(ApiError::transport("no gate queued")),
        }
    }
}

fn plan_reply(text: &str) -> PlanReply {
    Ok(PlanResponse {
        itinerary: Itinerary(json!(text)),
        source: Some(PlanSource::NewlyGenerated),
    })
}

type Outcome = Rc<RefCell<Option<Result<(), SessionError>>>>;

/// Spawns a plan request on `pool`, returning where its result will land.
fn spawn_plan(
    pool: &LocalPool,
    session: &SessionStore<GatedBackend, MemoryTokenStorage, TestState>,
) -> Outcome {
    let outcome: Outcome = Rc::default();
    let session = session.clone();
    let slot = outcome.clone();
    pool.spawner()
        .spawn_local(async move {
            let result = session.generate_plan(&trip_request()).await;
            *slot.borrow_mut() = Some(result);
        })
        .expect("spawned plan request");
    outcome
}

#[derive(Clone, Default)]
struct TestState(Rc<RefCell<AppState>>);

impl TestState {
    fn get(&self) -> AppState {
        self.0.borrow().clone()
    }
}

impl SessionStateHandle for TestState {
    fn snapshot(&self) -> Rc<AppState> {
        Rc::new(self.get())
    }

    fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut AppState),
    {
        mutate(&mut self.0.borrow_mut());
    }
}

type TestSession = SessionStore<FakeBackend, MemoryTokenStorage, TestState>;

fn session_with(
    backend: &FakeBackend,
    storage: &MemoryTokenStorage,
) -> (TestSession, TestState) {
    let state = TestState(Rc::new(RefCell::new(AppState::rehydrate(storage))));
    let session = SessionStore::new(backend.clone(), storage.clone(), state.clone());
    (session, state)
}

fn trip_request() -> TripRequest {
    let mut request =
        TripRequest::with_defaults(NaiveDate::from_ymd_opt(2026, 5, 1).expect("valid date"));
    request.set_field(TripField::MinBudget, "2000").expect("valid");
    request.set_field(TripField::MaxBudget, "4500").expect("valid");
    request.set_field(TripField::People, "2").expect("valid");
    request
}

#[test]
fn test_login_success_authenticates_and_persists() {
    let backend = FakeBackend::default();
    let storage = MemoryTokenStorage::default();
    let (session, state) = session_with(&backend, &storage);

    assert_eq!(block_on(session.login("alice", "correct horse")), Ok(()));

    let state = state.get();
    assert!(state.is_authenticated());
    assert_eq!(state.token.as_deref(), Some("token-alice"));
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
    assert_eq!(storage.raw().as_deref(), Some("token-alice"));
    assert_eq!(backend.calls(), vec![Call::Token("alice".to_string())]);
}

#[test]
fn test_login_rejected_keeps_guest_state() {
    let backend = FakeBackend {
        token_reply: Err(ApiError::rejected(
            401,
            r#"{"detail":"Incorrect username or password"}"#,
        )),
        ..FakeBackend::default()
    };
    let storage = MemoryTokenStorage::default();
    let (session, state) = session_with(&backend, &storage);

    let result = block_on(session.login("alice", "wrong"));

    assert!(matches!(
        result,
        Err(SessionError::Api(ApiError::Rejected { status: 401, .. }))
    ));
    let state = state.get();
    assert_eq!(state.error.as_deref(), Some("Incorrect username or password"));
    assert!(!state.is_authenticated());
    assert!(!state.is_loading);
    assert_eq!(storage.raw(), None);
}

#[test]
fn test_login_transport_failure_uses_description() {
    let backend = FakeBackend {
        token_reply: Err(ApiError::transport("error sending request: connection refused")),
        ..FakeBackend::default()
    };
    let (session, state) = session_with(&backend, &MemoryTokenStorage::default());

    assert!(block_on(session.login("alice", "pw")).is_err());
    assert_eq!(
        state.get().error.as_deref(),
        Some("error sending request: connection refused")
    );
}

#[test]
fn test_login_with_empty_token_fails() {
    let backend = FakeBackend {
        token_reply: Ok(TokenResponse {
            access_token: String::new(),
            token_type: None,
        }),
        ..FakeBackend::default()
    };
    let storage = MemoryTokenStorage::default();
    let (session, state) = session_with(&backend, &storage);

    assert_eq!(
        block_on(session.login("alice", "pw")),
        Err(SessionError::MissingToken)
    );
    assert!(!state.get().is_authenticated());
    assert_eq!(storage.raw(), None);
}

#[test]
fn test_login_storage_failure_is_not_a_session() {
    let backend = FakeBackend::default();
    let storage = MemoryTokenStorage::failing();
    let (session, state) = session_with(&backend, &storage);

    let result = block_on(session.login("alice", "pw"));

    assert!(matches!(result, Err(SessionError::Storage(_))));
    let state = state.get();
    assert!(!state.is_authenticated());
    assert!(
        state
            .error
            .as_deref()
            .is_some_and(|message| message.contains("quota exceeded"))
    );
}

#[test]
fn test_signup_does_not_authenticate() {
    let backend = FakeBackend::default();
    let storage = MemoryTokenStorage::default();
    let (session, state) = session_with(&backend, &storage);

    assert_eq!(block_on(session.signup("bob", "hunter22")), Ok(()));

    let state = state.get();
    assert!(!state.is_authenticated());
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
    assert_eq!(storage.raw(), None);
    assert_eq!(backend.calls(), vec![Call::Register("bob".to_string())]);
}

#[test]
fn test_signup_rejected_surfaces_detail() {
    let backend = FakeBackend {
        register_reply: Err(ApiError::rejected(400, r#"{"detail":"Username already registered"}"#)),
        ..FakeBackend::default()
    };
    let (session, state) = session_with(&backend, &MemoryTokenStorage::default());

    assert!(block_on(session.signup("bob", "hunter22")).is_err());
    assert_eq!(
        state.get().error.as_deref(),
        Some("Username already registered")
    );
}

#[test]
fn test_logout_clears_everything() {
    let backend = FakeBackend::default();
    let storage = MemoryTokenStorage::with_token("stored");
    let (session, state) = session_with(&backend, &storage);
    block_on(session.generate_plan(&trip_request())).expect("plan generated");
    assert!(state.get().itinerary.is_some());

    session.logout();

    let state = state.get();
    assert!(!state.is_authenticated());
    assert_eq!(state.token, None);
    assert_eq!(state.itinerary, None);
    assert_eq!(state.plan_source, None);
    assert_eq!(storage.raw(), None);
}

#[test]
fn test_logout_without_session() {
    let storage = MemoryTokenStorage::default();
    let (session, state) = session_with(&FakeBackend::default(), &storage);

    session.logout();
    session.logout();

    assert!(!state.get().is_authenticated());
    assert_eq!(storage.load_token(), None);
    assert_eq!(state.get().error, None);
}

#[test]
fn test_generate_plan_requires_session() {
    let backend = FakeBackend::default();
    let (session, state) = session_with(&backend, &MemoryTokenStorage::default());

    let result = block_on(session.generate_plan(&trip_request()));

    assert_eq!(result, Err(SessionError::Unauthenticated));
    assert!(backend.calls().is_empty());
    let state = state.get();
    assert_eq!(
        state.error.as_deref(),
        Some("You must be logged in to create a plan.")
    );
    assert!(!state.is_loading);
}

#[test]
fn test_generate_plan_success_stores_itinerary() {
    let backend = FakeBackend::default();
    let (session, state) = session_with(&backend, &MemoryTokenStorage::with_token("stored"));
    let request = trip_request();

    assert_eq!(block_on(session.generate_plan(&request)), Ok(()));

    let state = state.get();
    assert_eq!(
        state.itinerary,
        Some(Itinerary(
            json!({"days": [{"day": 1, "plan": "Arrive in Kyoto"}]})
        ))
    );
    assert_eq!(state.plan_source, Some(PlanSource::NewlyGenerated));
    assert!(!state.is_loading);
    assert_eq!(
        backend.calls(),
        vec![Call::Plan {
            token: "stored".to_string(),
            request,
        }]
    );
}

#[test]
fn test_generate_plan_failure_clears_previous_itinerary() {
    let mut backend = FakeBackend::default();
    let storage = MemoryTokenStorage::with_token("stored");
    let (session, state) = session_with(&backend, &storage);
    block_on(session.generate_plan(&trip_request())).expect("first plan");

    backend.plan_reply = Err(ApiError::rejected(
        500,
        r#"{"detail":"Internal Server Error: upstream timeout"}"#,
    ));
    let session = SessionStore::new(backend, storage, state.clone());
    assert!(block_on(session.generate_plan(&trip_request())).is_err());

    let state = state.get();
    assert_eq!(state.itinerary, None);
    assert_eq!(
        state.error.as_deref(),
        Some("Internal Server Error: upstream timeout")
    );
    assert!(!state.is_loading);
    assert!(state.is_authenticated());
}

#[test]
fn test_second_plan_replaces_first() {
    let backend = FakeBackend::default();
    let storage = MemoryTokenStorage::with_token("stored");
    let (session, state) = session_with(&backend, &storage);
    block_on(session.generate_plan(&trip_request())).expect("first plan");

    let second = FakeBackend {
        plan_reply: Ok(PlanResponse {
            itinerary: Itinerary(json!("# Day 1\nTea ceremony")),
            source: Some(PlanSource::CacheAdapted),
        }),
        calls: backend.calls.clone(),
        ..FakeBackend::default()
    };
    let session = SessionStore::new(second, storage, state.clone());
    block_on(session.generate_plan(&trip_request())).expect("second plan");

    assert_eq!(
        state.get().itinerary,
        Some(Itinerary(json!("# Day 1\nTea ceremony")))
    );
    assert_eq!(state.get().plan_source, Some(PlanSource::CacheAdapted));
    assert_eq!(backend.calls().len(), 2);
}

#[test]
fn test_clear_plan_is_idempotent() {
    let (session, state) =
        session_with(&FakeBackend::default(), &MemoryTokenStorage::with_token("t"));
    block_on(session.generate_plan(&trip_request())).expect("plan generated");

    session.clear_plan();
    assert_eq!(state.get().itinerary, None);
    session.clear_plan();
    assert_eq!(state.get().itinerary, None);
    assert_eq!(state.get().error, None);
    assert!(state.get().is_authenticated());
}

#[test]
fn test_login_then_plan_uses_new_token() {
    let backend = FakeBackend::default();
    let (session, _state) = session_with(&backend, &MemoryTokenStorage::default());

    block_on(session.login("alice", "pw")).expect("logged in");
    block_on(session.generate_plan(&trip_request())).expect("plan generated");

    assert!(matches!(
        backend.calls().last(),
        Some(Call::Plan { token, .. }) if token == "token-alice"
    ));
}

#[test]
fn test_plan_arriving_after_logout_is_discarded() {
    let backend = GatedBackend::default();
    let storage = MemoryTokenStorage::with_token("token-alice");
    let state = TestState(Rc::new(RefCell::new(AppState::rehydrate(&storage))));
    let session = SessionStore::new(backend.clone(), storage, state.clone());
    let gate = backend.gate();
    let mut pool = LocalPool::new();

    let outcome = spawn_plan(&pool, &session);
    pool.run_until_stalled();
    assert!(state.get().is_loading);
    assert_eq!(*outcome.borrow(), None);

    session.logout();
    gate.send(plan_reply("alice's trip")).expect("request still waiting");
    pool.run_until_stalled();

    assert_eq!(*outcome.borrow(), Some(Err(SessionError::SessionEnded)));
    let after = state.get();
    assert!(!after.is_authenticated());
    assert_eq!(after.itinerary, None);
    assert_eq!(after.plan_source, None);
    assert_eq!(after.error, None);
    assert!(!after.is_loading);
}

#[test]
fn test_plan_from_previous_session_not_shown_to_next_user() {
    let backend = GatedBackend::default();
    let storage = MemoryTokenStorage::with_token("token-alice");
    let state = TestState(Rc::new(RefCell::new(AppState::rehydrate(&storage))));
    let session = SessionStore::new(backend.clone(), storage, state.clone());
    let gate = backend.gate();
    let mut pool = LocalPool::new();

    let outcome = spawn_plan(&pool, &session);
    pool.run_until_stalled();
    session.logout();
    block_on(session.login("bob", "pw")).expect("bob logged in");

    gate.send(Err(ApiError::rejected(500, r#"{"detail":"upstream timeout"}"#)))
        .expect("request still waiting");
    pool.run_until_stalled();

    assert_eq!(*outcome.borrow(), Some(Err(SessionError::SessionEnded)));
    let after = state.get();
    assert_eq!(after.token.as_deref(), Some("token-bob"));
    assert_eq!(after.itinerary, None);
    assert_eq!(after.error, None);
}

#[test]
fn test_overlapping_plans_last_response_wins() {
    let backend = GatedBackend::default();
    let storage = MemoryTokenStorage::with_token("stored");
    let state = TestState(Rc::new(RefCell::new(AppState::rehydrate(&storage))));
    let session = SessionStore::new(backend.clone(), storage, state.clone());
    let first_gate = backend.gate();
    let second_gate = backend.gate();
    let mut pool = LocalPool::new();

    let first = spawn_plan(&pool, &session);
    let second = spawn_plan(&pool, &session);
    pool.run_until_stalled();
    assert!(state.get().is_loading);

    // answers arrive in the opposite order of the requests
    second_gate
        .send(plan_reply("second trip"))
        .expect("second request waiting");
    pool.run_until_stalled();
    assert_eq!(*second.borrow(), Some(Ok(())));
    assert_eq!(
        state.get().itinerary,
        Some(Itinerary(json!("second trip")))
    );

    first_gate
        .send(plan_reply("first trip"))
        .expect("first request waiting");
    pool.run_until_stalled();
    assert_eq!(*first.borrow(), Some(Ok(())));

    let after = state.get();
    assert_eq!(after.itinerary, Some(Itinerary(json!("first trip"))));
    assert!(!after.is_loading);
    assert_eq!(after.error, None);
    assert!(after.is_authenticated());
}
