//! # Supabase REST Client
//!
//! A small client for the PostgREST API that every Supabase project exposes
//! under `/rest/v1`. It covers the table operations a CRUD front end needs:
//! ordered select, insert with returned row, update by column match, and
//! delete by column match.
//!
//! ## Example
//!
//! ```no_run
//! use serde::Deserialize;
//! use supatodo_supabase::{SupabaseClient, SupabaseConfig};
//!
//! #[derive(Debug, Deserialize)]
//! struct Row {
//!     id: i64,
//!     task: String,
//! }
//!
//! # async fn example() -> Result<(), supatodo_supabase::SupabaseError> {
//! let client = SupabaseClient::new(SupabaseConfig::new(
//!     "https://project.supabase.co",
//!     "public-anon-key",
//! ))?;
//!
//! let rows: Vec<Row> = client.from("todos").select_ascending("id").await?;
//! println!("{} rows", rows.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod query;

pub use client::{SupabaseClient, SupabaseConfig};
pub use error::SupabaseError;
pub use query::TableQuery;
