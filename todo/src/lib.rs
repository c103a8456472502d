//! Task list mirrored from a Supabase table.
//!
//! The list is loaded once when the view mounts and then kept in step with
//! the remote table by patching it after every successful insert, update, or
//! delete. Remote calls run as effects; the user can keep typing while they
//! are in flight, and their results are applied as they arrive.
//!
//! # Quick Start
//!
//! ```no_run
//! use supatodo::{AppConfig, SupabaseTaskRepository, TaskAction, TaskEnvironment, TaskReducer, TaskState};
//! use supatodo_runtime::Store;
//! use supatodo_supabase::SupabaseClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let client = SupabaseClient::new(config.supabase.clone())?;
//! let repository = SupabaseTaskRepository::new(&client, config.table.clone());
//!
//! let store = Store::new(
//!     TaskState::new(),
//!     TaskReducer::<SupabaseTaskRepository>::new(),
//!     TaskEnvironment::new(repository),
//! );
//!
//! // Load the list and wait for the fetch to land
//! store.send(TaskAction::Mount).await?.wait().await;
//!
//! store.send(TaskAction::InputChanged { text: "Buy milk".to_string() }).await?;
//! store.send(TaskAction::AddTask).await?.wait().await;
//!
//! let count = store.state(|s| s.count()).await;
//! println!("{count} tasks");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod mocks;
pub mod reducer;
pub mod supabase_repository;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError};
pub use environment::{RemoteError, TaskEnvironment, TaskRepository};
pub use reducer::TaskReducer;
pub use supabase_repository::SupabaseTaskRepository;
pub use types::{NewTask, Operation, Task, TaskAction, TaskId, TaskState};
