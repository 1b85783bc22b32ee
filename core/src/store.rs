//! The item store: authoritative in-memory todo list plus the loading and
//! error state the views render from.
//!
//! # Design
//! Each operation follows the same cycle: mark one request in flight and
//! clear the error slot, run the round trip without holding the state lock,
//! then settle: release the in-flight mark and either apply the response to
//! the list or record the operation's fixed error message.
//!
//! Loading is tracked as a count of outstanding requests rather than a single
//! flag, so overlapping operations keep the indicator on until the last one
//! settles.
//!
//! The count is held by a guard taken at the start of each operation, so an
//! operation whose future is dropped part way (a timeout, `select!`, an
//! aborted task) still releases its mark.
//!
//! A detached store still completes its requests but no longer applies their
//! results; views detach the store they own when they go away.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::{ApiError, StoreError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

/// Point-in-time copy of the store state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    pub items: Vec<Todo>,
    pub in_flight: usize,
    pub error: Option<StoreError>,
}

impl StoreState {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

#[derive(Default)]
struct Slots {
    items: Vec<Todo>,
    error: Option<StoreError>,
}

/// One outstanding request. Dropping it releases the mark.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(count: &'a AtomicUsize) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self(count)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct TodoStore<T> {
    client: TodoClient,
    transport: T,
    state: RwLock<Slots>,
    in_flight: AtomicUsize,
    detached: AtomicBool,
}

impl<T: Transport> TodoStore<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: RwLock::new(Slots::default()),
            in_flight: AtomicUsize::new(0),
            detached: AtomicBool::new(false),
        }
    }

    pub async fn snapshot(&self) -> StoreState {
        let state = self.state.read().await;
        StoreState {
            items: state.items.clone(),
            in_flight: self.in_flight.load(Ordering::SeqCst),
            error: state.error,
        }
    }

    pub async fn items(&self) -> Vec<Todo> {
        self.state.read().await.items.clone()
    }

    pub async fn is_loading(&self) -> bool {
        // Read under the lock so a settling operation is seen whole.
        let _state = self.state.read().await;
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn error(&self) -> Option<StoreError> {
        self.state.read().await.error
    }

    /// Stop applying responses. Requests already in flight still run.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }

    /// Replace the list with the server's.
    pub async fn fetch(&self) -> Result<(), StoreError> {
        let mark = self.begin().await;
        let result = self
            .round_trip(Ok(self.client.build_list_todos()))
            .await
            .and_then(|resp| self.client.parse_list_todos(resp));
        self.settle(mark, StoreError::Fetch, result, |items, todos| *items = todos)
            .await
    }

    /// Create a todo and append the server's record.
    pub async fn create(&self, body: &str, completed: bool) -> Result<(), StoreError> {
        let mark = self.begin().await;
        let input = CreateTodo {
            body: body.to_string(),
            completed,
        };
        let result = self
            .round_trip(self.client.build_create_todo(&input))
            .await
            .and_then(|resp| self.client.parse_create_todo(resp));
        self.settle(mark, StoreError::Create, result, |items, todo| {
            match items.iter_mut().find(|t| t.id == todo.id) {
                Some(existing) => *existing = todo,
                None => items.push(todo),
            }
        })
        .await
    }

    /// Apply a partial update; the local record is replaced with the full
    /// server response. Unknown ids leave the list unchanged.
    pub async fn update(&self, id: TodoId, input: &UpdateTodo) -> Result<(), StoreError> {
        let mark = self.begin().await;
        let result = self
            .round_trip(self.client.build_update_todo(id, input))
            .await
            .and_then(|resp| self.client.parse_update_todo(resp));
        self.settle(mark, StoreError::Update, result, |items, todo| {
            if let Some(existing) = items.iter_mut().find(|t| t.id == id) {
                *existing = todo;
            }
        })
        .await
    }

    pub async fn delete(&self, id: TodoId) -> Result<(), StoreError> {
        let mark = self.begin().await;
        let result = self
            .round_trip(Ok(self.client.build_delete_todo(id)))
            .await
            .and_then(|resp| self.client.parse_delete_todo(resp));
        self.settle(mark, StoreError::Delete, result, |items, ()| {
            items.retain(|t| t.id != id)
        })
        .await
    }

    async fn begin(&self) -> InFlight<'_> {
        let mut state = self.state.write().await;
        state.error = None;
        InFlight::enter(&self.in_flight)
    }

    async fn round_trip(
        &self,
        request: Result<HttpRequest, ApiError>,
    ) -> Result<HttpResponse, ApiError> {
        let request = request?;
        debug!(method = %request.method, path = %request.path, "dispatching request");
        Ok(self.transport.execute(request).await?)
    }

    async fn settle<V>(
        &self,
        mark: InFlight<'_>,
        op: StoreError,
        result: Result<V, ApiError>,
        apply: impl FnOnce(&mut Vec<Todo>, V),
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        // Released while the write lock is held, after the outcome lands.
        let _mark = mark;

        if self.is_detached() {
            debug!(operation = %op, "store detached, dropping response");
            return result.map(|_| ()).map_err(|_| op);
        }

        match result {
            Ok(value) => {
                apply(&mut state.items, value);
                Ok(())
            }
            Err(err) => {
                warn!(operation = %op, error = %err, "store operation failed");
                state.error = Some(op);
                Err(op)
            }
        }
    }
}
