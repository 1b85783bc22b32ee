//! Boards the shell can drive: the API-backed one and the in-memory one.

use async_trait::async_trait;
use todo_core::{LocalBoard, RootView, Screen, Submission, TodoId, TodoInput, TodoStore, Transport};

use crate::command::Action;

#[async_trait]
pub trait Session: Send {
    /// Perform `action`. Returns a notice when the action was refused before
    /// reaching the board.
    async fn apply(&mut self, action: Action) -> Option<String>;

    async fn screen(&self) -> Screen;
}

fn unknown(id: TodoId) -> String {
    format!("no todo with id {id}")
}

const NOTHING_TO_ADD: &str = "nothing to add: enter at least one letter or digit";

pub struct OnlineSession<T: Transport> {
    view: RootView<T>,
    input: TodoInput,
}

impl<T: Transport> OnlineSession<T> {
    pub fn new(store: TodoStore<T>) -> Self {
        Self {
            view: RootView::new(store),
            input: TodoInput::new(),
        }
    }

    /// Initial fetch; failures land in the screen.
    pub async fn start(&mut self) {
        let _ = self.view.mount().await;
    }

    pub fn view(&self) -> &RootView<T> {
        &self.view
    }
}

#[async_trait]
impl<T: Transport> Session for OnlineSession<T> {
    async fn apply(&mut self, action: Action) -> Option<String> {
        let store: &TodoStore<T> = self.view.store();
        match action {
            Action::List => {
                let _ = store.fetch().await;
            }
            Action::Add(text) => {
                self.input.set_text(text);
                if self.input.submit(store).await == Submission::Ignored {
                    return Some(NOTHING_TO_ADD.to_string());
                }
            }
            Action::Toggle(id) => {
                let Some(item) = self.view.item(id).await else {
                    return Some(unknown(id));
                };
                let _ = item.toggle(store).await;
            }
            Action::Edit(id, text) => {
                let Some(mut item) = self.view.item(id).await else {
                    return Some(unknown(id));
                };
                item.begin_edit();
                item.set_draft(text);
                if item.save(store).await.is_none() {
                    return Some(format!("#{id} unchanged"));
                }
            }
            Action::Delete(id) => {
                let Some(item) = self.view.item(id).await else {
                    return Some(unknown(id));
                };
                let _ = item.delete(store).await;
            }
        }
        None
    }

    async fn screen(&self) -> Screen {
        self.view.screen().await
    }
}

#[derive(Default)]
pub struct OfflineSession {
    board: LocalBoard,
}

impl OfflineSession {
    pub fn new(board: LocalBoard) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &LocalBoard {
        &self.board
    }

    fn knows(&self, id: TodoId) -> bool {
        self.board.tasks().iter().any(|t| t.id == id)
    }
}

#[async_trait]
impl Session for OfflineSession {
    async fn apply(&mut self, action: Action) -> Option<String> {
        if let Action::Toggle(id) | Action::Edit(id, _) | Action::Delete(id) = &action {
            if !self.knows(*id) {
                return Some(unknown(*id));
            }
        }
        match action {
            Action::List => {}
            Action::Add(text) => {
                self.board.set_new_task(text);
                if self.board.add_task().is_none() {
                    return Some(NOTHING_TO_ADD.to_string());
                }
            }
            Action::Toggle(id) => self.board.toggle(id),
            Action::Edit(id, text) => {
                self.board.start_edit(id);
                self.board.set_edit_text(text);
                self.board.save_edit();
            }
            Action::Delete(id) => self.board.delete(id),
        }
        None
    }

    async fn screen(&self) -> Screen {
        self.board.screen()
    }
}
