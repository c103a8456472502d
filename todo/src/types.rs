//! Domain types for the task list.
//!
//! A task list is an ordered mirror of the rows in one remote table. Rows are
//! created, toggled, and deleted remotely; the local copy is patched only
//! after the remote call succeeds.

use serde::{Deserialize, Serialize};
use supatodo_macros::Action;

/// Identifier assigned by the remote store on insert
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw row id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task as stored remotely
///
/// Field names follow the table columns `id`, `task`, and `is_completed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier
    pub id: TaskId,
    /// Text entered when the task was created
    #[serde(rename = "task")]
    pub description: String,
    /// Whether the task is done
    #[serde(rename = "is_completed", default)]
    pub completed: bool,
}

impl Task {
    /// Creates a task
    #[must_use]
    pub fn new(id: TaskId, description: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            description: description.into(),
            completed,
        }
    }
}

/// Row payload for an insert; the store assigns the id
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewTask {
    /// Task text
    #[serde(rename = "task")]
    pub description: String,
    /// Always false for new rows
    #[serde(rename = "is_completed")]
    pub completed: bool,
}

impl NewTask {
    /// Creates an open task with `description`
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            completed: false,
        }
    }
}

/// State of the task list view
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskState {
    /// Tasks in display order: fetch order, then appended inserts
    pub tasks: Vec<Task>,
    /// Current contents of the add field
    pub input: String,
    /// Message of the most recent failed remote operation
    pub last_error: Option<String>,
    /// Whether a fetch has completed successfully
    pub loaded: bool,
}

impl TaskState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of tasks
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the number of completed tasks
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Returns a task by id
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Returns the ids in display order
    #[must_use]
    pub fn ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id).collect()
    }
}

/// The remote operation an error came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Loading all rows
    Fetch,
    /// Creating a row
    Insert,
    /// Setting a row's completion flag
    Update,
    /// Removing a row
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            Self::Fetch => "load tasks",
            Self::Insert => "add task",
            Self::Update => "update task",
            Self::Delete => "delete task",
        };
        f.write_str(verb)
    }
}

/// Actions for the task list
///
/// Commands come from the user and start at most one remote call. Events are
/// produced when that call finishes and patch the local mirror.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TaskAction {
    // ========== Commands ==========
    /// Command: the view appeared; load every task
    #[command]
    Mount,

    /// Command: load every task again, replacing the local list
    #[command]
    Reload,

    /// Command: the add field changed
    #[command]
    InputChanged {
        /// New field contents
        text: String,
    },

    /// Command: add the trimmed contents of the add field
    #[command]
    AddTask,

    /// Command: flip a task's completion flag
    #[command]
    ToggleTask {
        /// Task to toggle
        id: TaskId,
        /// Completion flag as currently shown
        completed: bool,
    },

    /// Command: delete a task
    #[command]
    DeleteTask {
        /// Task to delete
        id: TaskId,
    },

    /// Command: hide the last error message
    #[command]
    DismissError,

    // ========== Events ==========
    /// Event: all rows were fetched
    #[event]
    TasksLoaded {
        /// Rows in ascending id order
        tasks: Vec<Task>,
    },

    /// Event: a row was inserted
    #[event]
    TaskAdded {
        /// The row as stored
        task: Task,
    },

    /// Event: a row's completion flag was written
    #[event]
    TaskToggled {
        /// Task that changed
        id: TaskId,
        /// Value now stored
        completed: bool,
    },

    /// Event: a row was deleted
    #[event]
    TaskDeleted {
        /// Task that was removed
        id: TaskId,
    },

    /// Event: a remote call failed
    #[event]
    OperationFailed {
        /// Which call failed
        operation: Operation,
        /// Message from the remote store
        error: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn task_uses_column_names() {
        let task: Task =
            serde_json::from_str(r#"{"id": 4, "task": "Buy milk", "is_completed": true}"#).unwrap();
        assert_eq!(task, Task::new(TaskId::new(4), "Buy milk", true));
    }

    #[test]
    fn task_ignores_extra_columns() {
        let task: Task = serde_json::from_str(
            r#"{"id": 1, "task": "x", "is_completed": false, "inserted_at": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(task.id, TaskId::new(1));
    }

    #[test]
    fn new_task_serializes_as_open_row() {
        let value = serde_json::to_value(NewTask::new("Walk dog")).unwrap();
        assert_eq!(value, serde_json::json!({"task": "Walk dog", "is_completed": false}));
    }

    #[test]
    fn state_lookups() {
        let state = TaskState {
            tasks: vec![
                Task::new(TaskId::new(1), "a", true),
                Task::new(TaskId::new(5), "b", false),
            ],
            ..TaskState::new()
        };

        assert_eq!(state.count(), 2);
        assert_eq!(state.completed_count(), 1);
        assert_eq!(state.get(TaskId::new(5)).unwrap().description, "b");
        assert!(state.get(TaskId::new(2)).is_none());
        assert_eq!(state.ids(), vec![TaskId::new(1), TaskId::new(5)]);
    }

    #[test]
    fn action_classification() {
        assert!(TaskAction::AddTask.is_command());
        assert!(TaskAction::TaskDeleted { id: TaskId::new(1) }.is_event());
        assert_eq!(TaskAction::Mount.name(), "Mount");
    }
}
