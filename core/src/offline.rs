//! The network-free board: the same screen with every task held in memory.
//!
//! Ids come from the wall clock in milliseconds. Two tasks added within the
//! same millisecond would collide, so an id never goes below `last + 1`.

use chrono::Utc;

use crate::types::TodoId;
use crate::view::{Row, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

pub type Clock = fn() -> TodoId;

fn wall_clock_millis() -> TodoId {
    TodoId::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct LocalBoard {
    tasks: Vec<Task>,
    new_task: String,
    editing: Option<(TodoId, String)>,
    last_id: TodoId,
    clock: Clock,
}

impl Default for LocalBoard {
    fn default() -> Self {
        Self::with_clock(wall_clock_millis)
    }
}

impl LocalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            tasks: Vec::new(),
            new_task: String::new(),
            editing: None,
            last_id: 0,
            clock,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn new_task(&self) -> &str {
        &self.new_task
    }

    pub fn set_new_task(&mut self, text: impl Into<String>) {
        self.new_task = text.into();
    }

    /// Appends the trimmed new-task text unless it is blank. Returns the id
    /// of the added task.
    pub fn add_task(&mut self) -> Option<TodoId> {
        let text = self.new_task.trim();
        if text.is_empty() {
            return None;
        }
        let id = (self.clock)().max(self.last_id + 1);
        self.last_id = id;
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
        });
        self.new_task.clear();
        Some(id)
    }

    pub fn toggle(&mut self, id: TodoId) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
        }
    }

    pub fn delete(&mut self, id: TodoId) {
        self.tasks.retain(|t| t.id != id);
    }

    /// Enter edit mode for `id`, seeded with its text. Unknown ids are ignored.
    pub fn start_edit(&mut self, id: TodoId) {
        if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
            self.editing = Some((id, task.text.clone()));
        }
    }

    pub fn editing(&self) -> Option<TodoId> {
        self.editing.as_ref().map(|(id, _)| *id)
    }

    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        if let Some((_, draft)) = &mut self.editing {
            *draft = text.into();
        }
    }

    /// Apply the trimmed draft when it is not blank; always leaves edit mode.
    pub fn save_edit(&mut self) {
        let Some((id, draft)) = self.editing.take() else {
            return;
        };
        let text = draft.trim();
        if text.is_empty() {
            return;
        }
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.text = text.to_string();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn screen(&self) -> Screen {
        Screen::from_rows(
            self.tasks
                .iter()
                .map(|task| Row {
                    id: task.id,
                    text: task.text.clone(),
                    completed: task.completed,
                    draft: match &self.editing {
                        Some((id, draft)) if *id == task.id => Some(draft.clone()),
                        _ => None,
                    },
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Summary;

    fn frozen() -> TodoId {
        1_700_000_000_000
    }

    fn board_with(texts: &[&str]) -> LocalBoard {
        let mut board = LocalBoard::with_clock(frozen);
        for text in texts {
            board.set_new_task(*text);
            board.add_task();
        }
        board
    }

    #[test]
    fn add_trims_and_clears_field() {
        let mut board = LocalBoard::with_clock(frozen);
        board.set_new_task("  Walk dog ");
        let id = board.add_task().unwrap();

        assert_eq!(id, frozen());
        assert_eq!(board.new_task(), "");
        assert_eq!(
            board.tasks(),
            &[Task {
                id,
                text: "Walk dog".into(),
                completed: false
            }]
        );
    }

    #[test]
    fn blank_text_is_not_added() {
        let mut board = LocalBoard::with_clock(frozen);
        board.set_new_task("   ");
        assert_eq!(board.add_task(), None);
        assert!(board.tasks().is_empty());
        assert_eq!(board.new_task(), "   ");
    }

    #[test]
    fn same_millisecond_ids_stay_unique() {
        let board = board_with(&["a", "b", "c"]);
        let ids: Vec<TodoId> = board.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![frozen(), frozen() + 1, frozen() + 2]);
    }

    #[test]
    fn wall_clock_ids_are_plausible() {
        let mut board = LocalBoard::new();
        board.set_new_task("now");
        let id = board.add_task().unwrap();
        // After 2020-01-01.
        assert!(id > 1_577_836_800_000);
    }

    #[test]
    fn toggle_twice_restores_task() {
        let mut board = board_with(&["a"]);
        let before = board.tasks()[0].clone();
        board.toggle(before.id);
        assert!(board.tasks()[0].completed);
        board.toggle(before.id);
        assert_eq!(board.tasks()[0], before);
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let mut board = board_with(&["a", "b"]);
        board.delete(42);
        assert_eq!(board.tasks().len(), 2);
        board.delete(frozen());
        assert_eq!(board.tasks().len(), 1);
        assert_eq!(board.tasks()[0].text, "b");
    }

    #[test]
    fn edit_save_and_cancel() {
        let mut board = board_with(&["a"]);
        let id = board.tasks()[0].id;

        board.start_edit(id);
        assert_eq!(board.editing(), Some(id));
        board.set_edit_text("  changed ");
        board.save_edit();
        assert_eq!(board.editing(), None);
        assert_eq!(board.tasks()[0].text, "changed");

        board.start_edit(id);
        board.set_edit_text("discarded");
        board.cancel_edit();
        assert_eq!(board.tasks()[0].text, "changed");
    }

    #[test]
    fn blank_edit_keeps_text_and_exits() {
        let mut board = board_with(&["a"]);
        let id = board.tasks()[0].id;
        board.start_edit(id);
        board.set_edit_text("  ");
        board.save_edit();
        assert_eq!(board.editing(), None);
        assert_eq!(board.tasks()[0].text, "a");
    }

    #[test]
    fn screen_shows_draft_and_summary() {
        let mut board = board_with(&["a", "b"]);
        assert_eq!(LocalBoard::with_clock(frozen).screen(), Screen::Empty);

        let second = board.tasks()[1].id;
        board.toggle(second);
        board.start_edit(second);
        let screen = board.screen();
        let Screen::List { rows, summary } = screen else {
            panic!("expected list");
        };
        assert_eq!(rows[0].draft, None);
        assert_eq!(rows[1].draft.as_deref(), Some("b"));
        assert_eq!(
            summary,
            Summary {
                total: 2,
                finished: 1,
                pending: 1
            }
        );
    }
}
