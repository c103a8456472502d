//! In-memory [`TaskRepository`] used by the tests.
//!
//! Behaves like the remote table: ids are assigned on insert and never
//! reused, fetches return rows by ascending id, and updates or deletes that
//! match nothing succeed silently.

use crate::environment::{RemoteError, TaskRepository};
use crate::types::{Operation, Task, TaskId};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// One call received by the repository
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RepositoryCall {
    /// `fetch_all()`
    FetchAll,
    /// `insert(description)`
    Insert(String),
    /// `update(id, completed)`
    Update(TaskId, bool),
    /// `delete(id)`
    Delete(TaskId),
}

#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<TaskId, Task>,
    next_id: i64,
    calls: Vec<RepositoryCall>,
    failures: HashMap<Operation, String>,
    delays: HashMap<Operation, Duration>,
}

/// Thread-safe in-memory task table
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty table whose first id is 1
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding `tasks`; new ids continue after the largest one
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let repository = Self::new();
        {
            let mut inner = repository.lock();
            for task in tasks {
                inner.next_id = inner.next_id.max(task.id.get());
                inner.rows.insert(task.id, task);
            }
        }
        repository
    }

    /// Makes every later call of `operation` fail with `message`
    pub fn fail(&self, operation: Operation, message: impl Into<String>) {
        self.lock().failures.insert(operation, message.into());
    }

    /// Lets `operation` succeed again
    pub fn recover(&self, operation: Operation) {
        self.lock().failures.remove(&operation);
    }

    /// Delays every later call of `operation` by `delay`
    pub fn delay(&self, operation: Operation, delay: Duration) {
        self.lock().delays.insert(operation, delay);
    }

    /// Current rows in ascending id order
    #[must_use]
    pub fn rows(&self) -> Vec<Task> {
        self.lock().rows.values().cloned().collect()
    }

    /// Every call received so far, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<RepositoryCall> {
        self.lock().calls.clone()
    }

    /// Number of `insert` calls received so far
    #[must_use]
    pub fn insert_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, RepositoryCall::Insert(_)))
            .count()
    }

    // A poisoned lock still holds consistent rows; every mutation is a
    // single map operation.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Records the call, then returns its configured delay and failure
    fn begin(&self, operation: Operation, call: RepositoryCall) -> (Option<Duration>, Option<RemoteError>) {
        let mut inner = self.lock();
        inner.calls.push(call);
        (
            inner.delays.get(&operation).copied(),
            inner.failures.get(&operation).map(RemoteError::new),
        )
    }

    async fn enter(&self, operation: Operation, call: RepositoryCall) -> Result<(), RemoteError> {
        let (delay, failure) = self.begin(operation, call);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        failure.map_or(Ok(()), Err)
    }
}

impl TaskRepository for InMemoryTaskRepository {
    async fn fetch_all(&self) -> Result<Vec<Task>, RemoteError> {
        self.enter(Operation::Fetch, RepositoryCall::FetchAll).await?;
        Ok(self.rows())
    }

    async fn insert(&self, description: &str) -> Result<Task, RemoteError> {
        self.enter(Operation::Insert, RepositoryCall::Insert(description.to_string()))
            .await?;

        let mut inner = self.lock();
        inner.next_id += 1;
        let task = Task::new(TaskId::new(inner.next_id), description, false);
        inner.rows.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, completed: bool) -> Result<(), RemoteError> {
        self.enter(Operation::Update, RepositoryCall::Update(id, completed))
            .await?;

        if let Some(task) = self.lock().rows.get_mut(&id) {
            task.completed = completed;
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<(), RemoteError> {
        self.enter(Operation::Delete, RepositoryCall::Delete(id)).await?;

        self.lock().rows.remove(&id);
        Ok(())
    }
}
