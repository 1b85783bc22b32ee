//! In-process fakes of the todo API for unit tests.
//!
//! `FakeApi` answers requests directly instead of wrapping
//! `mock_server::app()` so tests can inject transport failures and error
//! statuses and inspect the request log.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Semaphore;

use crate::client::TodoClient;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::store::TodoStore;
use crate::transport::Transport;
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

pub const BASE_URL: &str = "http://api.test";

#[derive(Default)]
struct Inner {
    last_id: TodoId,
    rows: BTreeMap<TodoId, Todo>,
    offline: bool,
    fail_status: Option<u16>,
    requests: Vec<HttpRequest>,
}

/// Stateful stand-in for the remote API. Clones share the same table.
#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<Inner>>,
}

impl FakeApi {
    pub fn with_bodies(bodies: &[&str]) -> Self {
        let api = Self::default();
        for body in bodies {
            api.insert(body);
        }
        api
    }

    pub fn insert(&self, body: &str) -> TodoId {
        let mut inner = self.inner.lock().unwrap();
        inner.last_id += 1;
        let id = inner.last_id;
        inner.rows.insert(id, record(id, body, false));
        id
    }

    /// Make the next created todo get `last + 1`.
    pub fn reset_ids(&self, last: TodoId) {
        self.inner.lock().unwrap().last_id = last;
    }

    pub fn set_offline(&self, offline: bool) {
        self.inner.lock().unwrap().offline = offline;
    }

    /// Answer every following request with `status`.
    pub fn fail_with(&self, status: u16) {
        self.inner.lock().unwrap().fail_status = Some(status);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    fn respond(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request.clone());
        if inner.offline {
            return Err(TransportError::new("connection refused"));
        }
        if let Some(status) = inner.fail_status {
            return Ok(HttpResponse::new(status, "server error"));
        }

        let path = request.path.strip_prefix(BASE_URL).unwrap_or(&request.path);
        let id: Option<TodoId> = path.strip_prefix("/todos/").map(|s| s.parse().unwrap());
        let body = request.body.as_deref().unwrap_or("");

        let response = match (request.method, id) {
            (HttpMethod::Get, None) => {
                let rows: Vec<&Todo> = inner.rows.values().collect();
                HttpResponse::new(200, serde_json::to_string(&rows).unwrap())
            }
            (HttpMethod::Post, None) => {
                let input: CreateTodo = serde_json::from_str(body).unwrap();
                inner.last_id += 1;
                let todo = record(inner.last_id, &input.body, input.completed);
                inner.rows.insert(todo.id, todo.clone());
                HttpResponse::new(201, serde_json::to_string(&todo).unwrap())
            }
            (HttpMethod::Put, Some(id)) => {
                let input: UpdateTodo = serde_json::from_str(body).unwrap();
                match inner.rows.get_mut(&id) {
                    Some(todo) => {
                        if let Some(body) = input.body {
                            todo.body = body;
                        }
                        if let Some(completed) = input.completed {
                            todo.completed = completed;
                        }
                        todo.updated_at = Some(Utc::now());
                        HttpResponse::new(200, serde_json::to_string(todo).unwrap())
                    }
                    None => HttpResponse::new(404, ""),
                }
            }
            (HttpMethod::Delete, Some(id)) => match inner.rows.remove(&id) {
                Some(_) => HttpResponse::new(204, ""),
                None => HttpResponse::new(404, ""),
            },
            _ => HttpResponse::new(405, ""),
        };
        Ok(response)
    }
}

#[async_trait]
impl Transport for FakeApi {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.respond(request)
    }
}

/// Holds every request until the test hands out a permit.
pub struct GatedApi {
    api: FakeApi,
    gate: Arc<Semaphore>,
}

#[async_trait]
impl Transport for GatedApi {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.gate.acquire().await.unwrap().forget();
        self.api.respond(request)
    }
}

fn record(id: TodoId, body: &str, completed: bool) -> Todo {
    let now = Utc::now();
    Todo {
        id,
        body: body.to_string(),
        completed,
        created_at: Some(now),
        updated_at: Some(now),
    }
}

pub fn store(api: FakeApi) -> TodoStore<FakeApi> {
    TodoStore::new(TodoClient::new(BASE_URL), api)
}

pub fn gated_store(api: FakeApi) -> (TodoStore<GatedApi>, Arc<Semaphore>) {
    let gate = Arc::new(Semaphore::new(0));
    let transport = GatedApi {
        api,
        gate: Arc::clone(&gate),
    };
    (TodoStore::new(TodoClient::new(BASE_URL), transport), gate)
}
