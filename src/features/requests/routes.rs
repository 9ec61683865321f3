use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::requests::handlers::{request_handler, RequestState};
use crate::features::requests::services::{ProximityService, RequestService};
use crate::features::users::services::UserService;

/// Create routes for the requests feature (all require authentication)
pub fn routes(
    request_service: Arc<RequestService>,
    proximity_service: Arc<ProximityService>,
    user_service: Arc<UserService>,
) -> Router {
    let state = RequestState {
        request_service,
        proximity_service,
        user_service,
    };

    Router::new()
        .route(
            "/api/requests",
            post(request_handler::create_request).get(request_handler::list_my_requests),
        )
        .route(
            "/api/requests/nearby",
            get(request_handler::nearby_requests),
        )
        .route(
            "/api/requests/{id}",
            get(request_handler::get_request).delete(request_handler::delete_request),
        )
        .route(
            "/api/requests/{id}/status",
            patch(request_handler::update_request_status),
        )
        .route(
            "/api/requests/{id}/accept",
            post(request_handler::accept_request),
        )
        .with_state(state)
}
