//! Environment for the task reducer.
//!
//! The reducer never talks to the network itself. Every remote call goes
//! through a [`TaskRepository`] injected at startup.

use crate::types::{Task, TaskId};
use std::future::Future;
use thiserror::Error;

/// A remote operation failed
///
/// Network errors, rejected credentials, and constraint violations all end up
/// here. Only the store's message is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    message: String,
}

impl RemoteError {
    /// Creates an error carrying `message`
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The store's error message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Remote table of tasks
///
/// Implementations must be cheap to clone; the reducer clones the repository
/// into every effect it starts.
pub trait TaskRepository: Clone + Send + Sync + 'static {
    /// Fetch every task ordered by ascending id
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the store cannot be reached or rejects the query.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Task>, RemoteError>> + Send;

    /// Insert an open task and return it with its assigned id
    ///
    /// The caller passes non-blank, trimmed text.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the row was not created.
    fn insert(&self, description: &str) -> impl Future<Output = Result<Task, RemoteError>> + Send;

    /// Set the completion flag of the task with `id`
    ///
    /// Matching no row is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the store rejects the update.
    fn update(&self, id: TaskId, completed: bool) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Delete the task with `id`
    ///
    /// Matching no row is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the store rejects the delete.
    fn delete(&self, id: TaskId) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

/// Dependencies of the task reducer
#[derive(Clone, Debug)]
pub struct TaskEnvironment<R>
where
    R: TaskRepository,
{
    /// Remote task table
    pub repository: R,
}

impl<R> TaskEnvironment<R>
where
    R: TaskRepository,
{
    /// Creates a new `TaskEnvironment`
    #[must_use]
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }
}
