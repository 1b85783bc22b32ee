//! Root screen: what the list area shows and the summary line under it.
//!
//! # Design
//! `RootView` owns the store through an `Arc` and is the only thing that
//! decides its lifetime: dropping the view detaches the store, so responses
//! for requests still in flight are discarded instead of landing in state
//! nobody renders. Components borrow the store from the view.
//!
//! `Screen` is plain data. Its `Display` impl is the text rendering used by
//! the terminal front-end.

use std::fmt;
use std::sync::Arc;

use crate::error::StoreError;
use crate::item::ItemView;
use crate::store::TodoStore;
use crate::transport::Transport;
use crate::types::{Todo, TodoId};

pub const EMPTY_MESSAGE: &str = "No Task available. Please add a new task.";
pub const LOADING_MESSAGE: &str = "Loading...";

/// A rendered todo row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    /// Present while the row is in edit mode.
    pub draft: Option<String>,
}

impl Row {
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { 'x' } else { ' ' };
        match &self.draft {
            Some(draft) => write!(f, "[{mark}] #{} > {draft}_", self.id),
            // Completed text is struck through.
            None if self.completed => {
                write!(f, "[{mark}] #{} ~~{}~~  ({})", self.id, self.text, self.status_label())
            }
            None => write!(f, "[{mark}] #{} {}  ({})", self.id, self.text, self.status_label()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub finished: usize,
    pub pending: usize,
}

impl Summary {
    pub fn from_flags(flags: impl IntoIterator<Item = bool>) -> Self {
        let (mut total, mut finished) = (0, 0);
        for completed in flags {
            total += 1;
            if completed {
                finished += 1;
            }
        }
        Self {
            total,
            finished,
            pending: total - finished,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} Task | Finished: {} | Pending: {}",
            self.total, self.finished, self.pending
        )
    }
}

/// What the list area shows, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Failed(StoreError),
    Empty,
    List { rows: Vec<Row>, summary: Summary },
}

impl Screen {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        if rows.is_empty() {
            return Screen::Empty;
        }
        let summary = Summary::from_flags(rows.iter().map(|r| r.completed));
        Screen::List { rows, summary }
    }

    pub fn summary(&self) -> Option<Summary> {
        match self {
            Screen::List { summary, .. } => Some(*summary),
            _ => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Loading => writeln!(f, "{LOADING_MESSAGE}"),
            Screen::Failed(err) => writeln!(f, "{err}"),
            Screen::Empty => writeln!(f, "{EMPTY_MESSAGE}"),
            Screen::List { rows, summary } => {
                for row in rows {
                    writeln!(f, "{row}")?;
                }
                writeln!(f)?;
                writeln!(f, "{summary}")
            }
        }
    }
}

pub struct RootView<T: Transport> {
    store: Arc<TodoStore<T>>,
    mounted: bool,
}

impl<T: Transport> RootView<T> {
    pub fn new(store: TodoStore<T>) -> Self {
        Self {
            store: Arc::new(store),
            mounted: false,
        }
    }

    pub fn store(&self) -> &Arc<TodoStore<T>> {
        &self.store
    }

    /// Runs the initial fetch. Once a fetch has completed, later calls do
    /// nothing; a mount that was cancelled before then runs again.
    pub async fn mount(&mut self) -> Result<(), StoreError> {
        if self.mounted {
            return Ok(());
        }
        let result = self.store.fetch().await;
        self.mounted = true;
        result
    }

    pub async fn screen(&self) -> Screen {
        let state = self.store.snapshot().await;
        if state.is_loading() {
            return Screen::Loading;
        }
        if let Some(err) = state.error {
            return Screen::Failed(err);
        }
        Screen::from_rows(
            state
                .items
                .into_iter()
                .map(|todo| ItemView::new(todo).row())
                .collect(),
        )
    }

    /// Item component for the todo with `id`, if the store has one.
    pub async fn item(&self, id: TodoId) -> Option<ItemView> {
        self.store
            .items()
            .await
            .into_iter()
            .find(|t: &Todo| t.id == id)
            .map(ItemView::new)
    }
}

impl<T: Transport> Drop for RootView<T> {
    fn drop(&mut self) {
        self.store.detach();
    }
}
