use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::requests::models::{CreateRequest, HelpRequest, RequestStatus};

const REQUEST_COLUMNS: &str = "id, requestor_id, acceptor_id, topic, description, status, \
     latitude, longitude, created_at, updated_at";

/// Service owning the help-request lifecycle
pub struct RequestService {
    pool: PgPool,
}

impl RequestService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new request in the open state.
    ///
    /// The caller passes the requestor's current coordinates; they are
    /// stored on the request and never change afterwards.
    pub async fn create(&self, data: &CreateRequest) -> Result<HelpRequest> {
        let sql = format!(
            "INSERT INTO requests (requestor_id, topic, description, status, latitude, longitude) \
             VALUES ($1, $2, $3, 'open', $4, $5) \
             RETURNING {REQUEST_COLUMNS}"
        );

        let request = sqlx::query_as::<_, HelpRequest>(&sql)
            .bind(data.requestor_id)
            .bind(&data.topic)
            .bind(&data.description)
            .bind(data.latitude)
            .bind(data.longitude)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create request: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(
            "Created request: {} by user: {}",
            request.id,
            data.requestor_id
        );

        Ok(request)
    }

    /// Get request by ID
    pub async fn get_by_id(&self, id: i64) -> Result<HelpRequest> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM requests WHERE id = $1");

        sqlx::query_as::<_, HelpRequest>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get request: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
    }

    /// List requests created by a user, newest first
    pub async fn list_by_requestor(&self, requestor_id: Uuid) -> Result<Vec<HelpRequest>> {
        let sql = format!(
            "SELECT {REQUEST_COLUMNS} FROM requests \
             WHERE requestor_id = $1 \
             ORDER BY created_at DESC"
        );

        sqlx::query_as::<_, HelpRequest>(&sql)
            .bind(requestor_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list requests by requestor: {:?}", e);
                AppError::Database(e)
            })
    }

    /// An acceptor engages an open request, moving it to pending.
    ///
    /// The update is conditional on the request still being open, so two
    /// concurrent acceptors cannot both win.
    pub async fn accept(&self, id: i64, acceptor_id: Uuid) -> Result<HelpRequest> {
        let sql = format!(
            "UPDATE requests \
             SET status = 'pending', acceptor_id = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'open' \
             RETURNING {REQUEST_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, HelpRequest>(&sql)
            .bind(id)
            .bind(acceptor_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to accept request: {:?}", e);
                AppError::Database(e)
            })?;

        match updated {
            Some(request) => {
                tracing::info!("Request {} accepted by user: {}", id, acceptor_id);
                Ok(request)
            }
            None => {
                // Distinguish a missing request from one that is no longer open
                let existing = self.get_by_id(id).await?;
                Err(AppError::Conflict(format!(
                    "Request {} is {}, not open",
                    id, existing.status
                )))
            }
        }
    }

    /// Move a request along its lifecycle on behalf of a participant.
    ///
    /// Only the requestor or the recorded acceptor may change the status,
    /// and only along a legal transition.
    pub async fn update_status(
        &self,
        id: i64,
        next: RequestStatus,
        user_id: Uuid,
    ) -> Result<HelpRequest> {
        let current = self.get_by_id(id).await?;

        let is_participant =
            current.requestor_id == user_id || current.acceptor_id == Some(user_id);
        if !is_participant {
            return Err(AppError::Forbidden(
                "Only the requestor or acceptor may change this request".to_string(),
            ));
        }

        if !current.status.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Request {} cannot move from {} to {}",
                id, current.status, next
            )));
        }

        // Conditional on the status we just read, so a concurrent transition
        // loses cleanly instead of silently overwriting.
        let sql = format!(
            "UPDATE requests \
             SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {REQUEST_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, HelpRequest>(&sql)
            .bind(id)
            .bind(current.status)
            .bind(next)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update request status: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| {
                AppError::Conflict(format!("Request {} was modified concurrently", id))
            })?;

        tracing::info!("Request {} moved from {} to {}", id, current.status, next);
        Ok(updated)
    }

    /// Remove a request from the database
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete request: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Request {} not found", id)));
        }

        tracing::info!("Deleted request: {}", id);
        Ok(())
    }

    /// Mark open requests created before the cutoff as timed out.
    /// Returns how many rows were affected.
    pub async fn timeout_stale(&self, older_than: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE requests \
             SET status = 'timeout', updated_at = NOW() \
             WHERE status = 'open' AND created_at < $1",
        )
        .bind(older_than)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to time out stale requests: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected())
    }
}
