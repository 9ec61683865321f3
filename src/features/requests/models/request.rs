use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Open,
    Pending,
    Closed,
    Timeout,
}

impl RequestStatus {
    /// Closed and timed-out requests never change status again
    #[allow(dead_code)]
    pub fn is_terminal(self) -> bool {
        match self {
            RequestStatus::Open | RequestStatus::Pending => false,
            RequestStatus::Closed | RequestStatus::Timeout => true,
        }
    }

    /// Legal lifecycle moves: open -> pending (acceptor engages),
    /// open/pending -> closed, open -> timeout. A request is never reopened.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        match (self, next) {
            (RequestStatus::Open, RequestStatus::Pending) => true,
            (RequestStatus::Open, RequestStatus::Closed) => true,
            (RequestStatus::Open, RequestStatus::Timeout) => true,
            (RequestStatus::Pending, RequestStatus::Closed) => true,
            (RequestStatus::Pending, RequestStatus::Timeout) => false,
            (RequestStatus::Pending, RequestStatus::Open) => false,
            (RequestStatus::Open, RequestStatus::Open) => false,
            (RequestStatus::Pending, RequestStatus::Pending) => false,
            (RequestStatus::Closed, _) => false,
            (RequestStatus::Timeout, _) => false,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Open => write!(f, "open"),
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Closed => write!(f, "closed"),
            RequestStatus::Timeout => write!(f, "timeout"),
        }
    }
}

/// Database model for a help request
///
/// Coordinates are copied from the requestor's profile when the request is
/// created; later profile moves do not affect existing requests.
#[derive(Debug, Clone, FromRow)]
pub struct HelpRequest {
    pub id: i64,
    pub requestor_id: Uuid,
    pub acceptor_id: Option<Uuid>,
    pub topic: String,
    pub description: String,
    pub status: RequestStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new help request
#[derive(Debug)]
pub struct CreateRequest {
    pub requestor_id: Uuid,
    pub topic: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A help request paired with its distance from a search center
#[derive(Debug, Clone)]
pub struct NearbyRequest {
    pub request: HelpRequest,
    pub distance_meters: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_transitions() {
        assert!(RequestStatus::Open.can_transition_to(RequestStatus::Pending));
        assert!(RequestStatus::Open.can_transition_to(RequestStatus::Closed));
        assert!(RequestStatus::Open.can_transition_to(RequestStatus::Timeout));
        assert!(!RequestStatus::Open.can_transition_to(RequestStatus::Open));
    }

    #[test]
    fn test_pending_transitions() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Closed));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Open));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Timeout));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn test_terminal_states_never_leave() {
        for next in [
            RequestStatus::Open,
            RequestStatus::Pending,
            RequestStatus::Closed,
            RequestStatus::Timeout,
        ] {
            assert!(!RequestStatus::Closed.can_transition_to(next));
            assert!(!RequestStatus::Timeout.can_transition_to(next));
        }
        assert!(RequestStatus::Closed.is_terminal());
        assert!(RequestStatus::Timeout.is_terminal());
        assert!(!RequestStatus::Open.is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
    }
}
