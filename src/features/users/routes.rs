use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::users::handlers::{profile_handler, UserState};
use crate::features::users::services::UserService;
use crate::modules::geocoder::GeocoderClient;

/// Create routes for the users feature (all require authentication)
pub fn routes(user_service: Arc<UserService>, geocoder: Arc<GeocoderClient>) -> Router {
    let state = UserState {
        user_service,
        geocoder,
    };

    Router::new()
        .route(
            "/api/users/me",
            get(profile_handler::get_profile)
                .put(profile_handler::update_profile)
                .delete(profile_handler::delete_account),
        )
        .with_state(state)
}
