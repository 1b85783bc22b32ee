//! Client core for the todo board.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that codec sits
//! the item store, which executes requests through a host-supplied
//! [`Transport`], and the components that render from it.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoStore` is an owned value handed to `RootView`, never a global.
//! - `LocalBoard` is the same screen with no network at all.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod input;
pub mod item;
pub mod offline;
pub mod store;
pub mod transport;
pub mod types;
pub mod view;

#[cfg(test)]
mod testing;

pub use client::TodoClient;
pub use error::{ApiError, StoreError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use input::{is_valid_body, Submission, TodoInput};
pub use item::{ItemView, Mode};
pub use offline::{LocalBoard, Task};
pub use store::{StoreState, TodoStore};
pub use transport::Transport;
pub use types::{CreateTodo, Todo, TodoId, UpdateTodo};
pub use view::{RootView, Row, Screen, Summary};
