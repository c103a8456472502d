//! Reducer logic for the task list.
//!
//! Commands start a single remote call and leave state untouched (apart from
//! the add field and error line, which are purely local). The call's outcome
//! comes back as an event that patches the list by task id, so results are
//! safe to apply in any order.

use crate::environment::{TaskEnvironment, TaskRepository};
use crate::types::{Operation, Task, TaskAction, TaskId, TaskState};
use std::marker::PhantomData;
use supatodo_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};

/// Reducer for the task list
#[derive(Debug)]
pub struct TaskReducer<R> {
    _phantom: PhantomData<fn() -> R>,
}

impl<R> TaskReducer<R> {
    /// Creates a new `TaskReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<R> Clone for TaskReducer<R> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<R> Default for TaskReducer<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> TaskReducer<R>
where
    R: TaskRepository,
{
    fn fetch_all(env: &TaskEnvironment<R>) -> Effect<TaskAction> {
        let repository = env.repository.clone();
        async_effect! {
            call: repository.fetch_all(),
            on_success: |tasks| Some(TaskAction::TasksLoaded { tasks }),
            on_error: |error| Some(TaskAction::OperationFailed {
                operation: Operation::Fetch,
                error: error.to_string(),
            })
        }
    }

    fn insert(env: &TaskEnvironment<R>, description: String) -> Effect<TaskAction> {
        let repository = env.repository.clone();
        async_effect! {
            call: repository.insert(&description),
            on_success: |task| Some(TaskAction::TaskAdded { task }),
            on_error: |error| Some(TaskAction::OperationFailed {
                operation: Operation::Insert,
                error: error.to_string(),
            })
        }
    }

    fn update(env: &TaskEnvironment<R>, id: TaskId, completed: bool) -> Effect<TaskAction> {
        let repository = env.repository.clone();
        async_effect! {
            call: repository.update(id, completed),
            on_success: |()| Some(TaskAction::TaskToggled { id, completed }),
            on_error: |error| Some(TaskAction::OperationFailed {
                operation: Operation::Update,
                error: error.to_string(),
            })
        }
    }

    fn delete(env: &TaskEnvironment<R>, id: TaskId) -> Effect<TaskAction> {
        let repository = env.repository.clone();
        async_effect! {
            call: repository.delete(id),
            on_success: |()| Some(TaskAction::TaskDeleted { id }),
            on_error: |error| Some(TaskAction::OperationFailed {
                operation: Operation::Delete,
                error: error.to_string(),
            })
        }
    }

    /// Applies an event to state
    fn apply_event(state: &mut TaskState, action: &TaskAction) {
        match action {
            TaskAction::TasksLoaded { tasks } => {
                state.tasks.clone_from(tasks);
                state.loaded = true;
                state.last_error = None;
            },
            TaskAction::TaskAdded { task } => {
                // A reload that landed first already holds this row, possibly
                // with later changes
                if state.get(task.id).is_none() {
                    state.tasks.push(task.clone());
                }
                state.input.clear();
                state.last_error = None;
            },
            TaskAction::TaskToggled { id, completed } => {
                if let Some(task) = find_mut(&mut state.tasks, *id) {
                    task.completed = *completed;
                }
                state.last_error = None;
            },
            TaskAction::TaskDeleted { id } => {
                state.tasks.retain(|task| task.id != *id);
                state.last_error = None;
            },
            TaskAction::OperationFailed { operation, error } => {
                tracing::error!(%operation, %error, "Remote operation failed");
                state.last_error = Some(format!("Could not {operation}: {error}"));
            },
            // Commands are not applied to state
            TaskAction::Mount
            | TaskAction::Reload
            | TaskAction::InputChanged { .. }
            | TaskAction::AddTask
            | TaskAction::ToggleTask { .. }
            | TaskAction::DeleteTask { .. }
            | TaskAction::DismissError => {},
        }
    }
}

fn find_mut(tasks: &mut [Task], id: TaskId) -> Option<&mut Task> {
    tasks.iter_mut().find(|task| task.id == id)
}

impl<R> Reducer for TaskReducer<R>
where
    R: TaskRepository,
{
    type State = TaskState;
    type Action = TaskAction;
    type Environment = TaskEnvironment<R>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TaskAction::Mount => smallvec![Self::fetch_all(env)],

            TaskAction::Reload => {
                state.last_error = None;
                smallvec![Self::fetch_all(env)]
            },

            TaskAction::InputChanged { text } => {
                state.input = text;
                SmallVec::new()
            },

            TaskAction::AddTask => {
                let description = state.input.trim();
                if description.is_empty() {
                    return SmallVec::new();
                }
                smallvec![Self::insert(env, description.to_string())]
            },

            TaskAction::ToggleTask { id, completed } => smallvec![Self::update(env, id, !completed)],

            TaskAction::DeleteTask { id } => smallvec![Self::delete(env, id)],

            TaskAction::DismissError => {
                state.last_error = None;
                SmallVec::new()
            },

            // ========== Events ==========
            TaskAction::TasksLoaded { .. }
            | TaskAction::TaskAdded { .. }
            | TaskAction::TaskToggled { .. }
            | TaskAction::TaskDeleted { .. }
            | TaskAction::OperationFailed { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}
