//! [`TaskRepository`] backed by a Supabase table.

use crate::environment::{RemoteError, TaskRepository};
use crate::types::{NewTask, Task, TaskId};
use serde::Serialize;
use supatodo_supabase::{SupabaseClient, SupabaseError, TableQuery};

/// Column holding the primary key
const ID_COLUMN: &str = "id";

#[derive(Serialize)]
struct CompletionPatch {
    is_completed: bool,
}

/// Tasks stored in a Supabase table with columns `id`, `task`, `is_completed`
#[derive(Debug, Clone)]
pub struct SupabaseTaskRepository {
    table: TableQuery,
}

impl SupabaseTaskRepository {
    /// Creates a repository for `table` in the client's project
    #[must_use]
    pub fn new(client: &SupabaseClient, table: impl Into<String>) -> Self {
        Self {
            table: client.from(table),
        }
    }

    /// Name of the backing table
    #[must_use]
    pub fn table(&self) -> &str {
        self.table.table()
    }
}

impl From<SupabaseError> for RemoteError {
    fn from(error: SupabaseError) -> Self {
        Self::new(error.to_string())
    }
}

impl TaskRepository for SupabaseTaskRepository {
    #[tracing::instrument(skip(self), fields(table = %self.table.table()))]
    async fn fetch_all(&self) -> Result<Vec<Task>, RemoteError> {
        let tasks: Vec<Task> = self.table.select_ascending(ID_COLUMN).await?;
        tracing::debug!(count = tasks.len(), "Fetched tasks");
        Ok(tasks)
    }

    #[tracing::instrument(skip(self), fields(table = %self.table.table()))]
    async fn insert(&self, description: &str) -> Result<Task, RemoteError> {
        let task: Task = self.table.insert_returning(&NewTask::new(description)).await?;
        tracing::debug!(id = %task.id, "Inserted task");
        Ok(task)
    }

    #[tracing::instrument(skip(self), fields(table = %self.table.table()))]
    async fn update(&self, id: TaskId, completed: bool) -> Result<(), RemoteError> {
        self.table
            .update_eq(ID_COLUMN, id, &CompletionPatch { is_completed: completed })
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(table = %self.table.table()))]
    async fn delete(&self, id: TaskId) -> Result<(), RemoteError> {
        self.table.delete_eq(ID_COLUMN, id).await?;
        Ok(())
    }
}
