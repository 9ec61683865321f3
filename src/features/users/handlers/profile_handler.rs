use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{UpdateProfileDto, UserProfileResponseDto};
use crate::features::users::models::UpdateProfile;
use crate::features::users::services::UserService;
use crate::modules::geocoder::{AddressQuery, ConfidenceLevel, GeocoderClient};
use crate::shared::types::ApiResponse;

/// State for user profile handlers
#[derive(Clone)]
pub struct UserState {
    pub user_service: Arc<UserService>,
    pub geocoder: Arc<GeocoderClient>,
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current profile", body = ApiResponse<UserProfileResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_profile(
    user: AuthenticatedUser,
    State(state): State<UserState>,
) -> Result<Json<ApiResponse<UserProfileResponseDto>>> {
    let profile = state.user_service.get_by_id(user.id).await?;
    Ok(Json(ApiResponse::success(Some(profile.into()), None, None)))
}

/// Replace the authenticated user's profile
///
/// The new address is geocoded; requests created before the change keep the
/// coordinates they were created with.
#[utoipa::path(
    put,
    path = "/api/users/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserProfileResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 424, description = "Address could not be verified")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_profile(
    user: AuthenticatedUser,
    State(state): State<UserState>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<UserProfileResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let address = AddressQuery {
        street: dto.street.clone(),
        city: dto.city.clone(),
        zip: dto.zip.clone(),
        country: dto.country.clone(),
    };

    let validated = state
        .geocoder
        .validate_address(&address)
        .await?
        .filter(|v| v.confidence == ConfidenceLevel::High)
        .ok_or_else(|| AppError::FailedDependency("Address is invalid".to_string()))?;

    let update = UpdateProfile {
        first_name: dto.first_name,
        last_name: dto.last_name,
        street: dto.street,
        city: dto.city,
        zip: dto.zip,
        country: dto.country,
        latitude: validated.coordinate.latitude(),
        longitude: validated.coordinate.longitude(),
    };

    let profile = state.user_service.update_profile(user.id, &update).await?;
    Ok(Json(ApiResponse::success(Some(profile.into()), None, None)))
}

/// Delete the authenticated user's account and their requests
#[utoipa::path(
    delete,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Account deleted"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn delete_account(
    user: AuthenticatedUser,
    State(state): State<UserState>,
) -> Result<Json<ApiResponse<()>>> {
    state.user_service.delete(user.id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Account deleted".to_string()),
        None,
    )))
}
