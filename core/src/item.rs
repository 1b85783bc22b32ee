//! One todo row: view mode with toggle/edit/delete, edit mode with
//! save/cancel.

use crate::error::StoreError;
use crate::store::TodoStore;
use crate::transport::Transport;
use crate::types::{Todo, UpdateTodo};
use crate::view::Row;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Editing { draft: String },
}

#[derive(Debug, Clone)]
pub struct ItemView {
    todo: Todo,
    mode: Mode,
}

impl ItemView {
    pub fn new(todo: Todo) -> Self {
        Self {
            todo,
            mode: Mode::Viewing,
        }
    }

    pub fn todo(&self) -> &Todo {
        &self.todo
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing { .. })
    }

    /// New props from the store. The edit draft, if any, is kept.
    pub fn refresh(&mut self, todo: Todo) {
        self.todo = todo;
    }

    pub fn begin_edit(&mut self) {
        self.mode = Mode::Editing {
            draft: self.todo.body.clone(),
        };
    }

    /// Ignored outside edit mode.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Mode::Editing { draft } = &mut self.mode {
            *draft = text.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Viewing;
    }

    /// Commit the draft if its trimmed text differs from the stored body,
    /// then leave edit mode either way. Returns `None` when nothing was sent.
    pub async fn save<T: Transport>(
        &mut self,
        store: &TodoStore<T>,
    ) -> Option<Result<(), StoreError>> {
        let Mode::Editing { draft } = std::mem::replace(&mut self.mode, Mode::Viewing) else {
            return None;
        };
        let text = draft.trim();
        if text == self.todo.body {
            return None;
        }
        Some(store.update(self.todo.id, &UpdateTodo::body(text)).await)
    }

    pub async fn toggle<T: Transport>(&self, store: &TodoStore<T>) -> Result<(), StoreError> {
        store
            .update(self.todo.id, &UpdateTodo::completed(!self.todo.completed))
            .await
    }

    pub async fn delete<T: Transport>(&self, store: &TodoStore<T>) -> Result<(), StoreError> {
        store.delete(self.todo.id).await
    }

    pub fn row(&self) -> Row {
        Row {
            id: self.todo.id,
            text: self.todo.body.clone(),
            completed: self.todo.completed,
            draft: match &self.mode {
                Mode::Viewing => None,
                Mode::Editing { draft } => Some(draft.clone()),
            },
        }
    }
}
