//! Table operations over PostgREST

use crate::{client::SupabaseClient, error::SupabaseError};
use reqwest::{Method, Response};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Display;

/// Operations against one table of a Supabase project
///
/// Obtained from [`SupabaseClient::from`].
#[derive(Debug, Clone)]
pub struct TableQuery {
    client: SupabaseClient,
    table: String,
}

impl TableQuery {
    pub(crate) const fn new(client: SupabaseClient, table: String) -> Self {
        Self { client, table }
    }

    /// Name of the table this query targets
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Fetch every row, smallest `column` first
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, or rows
    /// that do not decode into `T`.
    pub async fn select_ascending<T>(&self, column: &str) -> Result<Vec<T>, SupabaseError>
    where
        T: DeserializeOwned,
    {
        let ordering = format!("{column}.asc");
        tracing::debug!(table = %self.table, order = %ordering, "select");

        let response = self
            .client
            .request(Method::GET, &self.table)
            .query(&[("select", "*"), ("order", ordering.as_str())])
            .send()
            .await
            .map_err(|e| SupabaseError::RequestFailed(e.to_string()))?;

        let response = ensure_success(response).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| SupabaseError::ResponseParseFailed(e.to_string()))
    }

    /// Insert one row and return it as stored
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::EmptyResponse` if the server reports success
    /// without echoing a row, plus the errors of any other request.
    pub async fn insert_returning<N, T>(&self, row: &N) -> Result<T, SupabaseError>
    where
        N: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(table = %self.table, "insert");

        let response = self
            .client
            .request(Method::POST, &self.table)
            .query(&[("select", "*")])
            .header("prefer", "return=representation")
            .json(&[row])
            .send()
            .await
            .map_err(|e| SupabaseError::RequestFailed(e.to_string()))?;

        let response = ensure_success(response).await?;
        let rows = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| SupabaseError::ResponseParseFailed(e.to_string()))?;

        rows.into_iter().next().ok_or(SupabaseError::EmptyResponse)
    }

    /// Apply `patch` to every row where `column` equals `value`
    ///
    /// Matching zero rows is not an error.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures or non-success statuses.
    pub async fn update_eq<P>(
        &self,
        column: &str,
        value: impl Display + Send,
        patch: &P,
    ) -> Result<(), SupabaseError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let filter = format!("eq.{value}");
        tracing::debug!(table = %self.table, column, filter = %filter, "update");

        let response = self
            .client
            .request(Method::PATCH, &self.table)
            .query(&[(column, filter.as_str())])
            .header("prefer", "return=minimal")
            .json(patch)
            .send()
            .await
            .map_err(|e| SupabaseError::RequestFailed(e.to_string()))?;

        ensure_success(response).await.map(drop)
    }

    /// Delete every row where `column` equals `value`
    ///
    /// Matching zero rows is not an error.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures or non-success statuses.
    pub async fn delete_eq(&self, column: &str, value: impl Display + Send) -> Result<(), SupabaseError> {
        let filter = format!("eq.{value}");
        tracing::debug!(table = %self.table, column, filter = %filter, "delete");

        let response = self
            .client
            .request(Method::DELETE, &self.table)
            .query(&[(column, filter.as_str())])
            .send()
            .await
            .map_err(|e| SupabaseError::RequestFailed(e.to_string()))?;

        ensure_success(response).await.map(drop)
    }
}

async fn ensure_success(response: Response) -> Result<Response, SupabaseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let error = SupabaseError::from_response(status.as_u16(), &body);
    tracing::warn!(status = status.as_u16(), %error, "request rejected");
    Err(error)
}
