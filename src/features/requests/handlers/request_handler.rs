use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::requests::dtos::{
    CreateRequestDto, CreateRequestResponseDto, NearbyQuery, NearbyRequestDto, RequestResponseDto,
    UpdateRequestStatusDto,
};
use crate::features::requests::models::CreateRequest;
use crate::features::requests::services::{ProximityQuery, ProximityService, RequestService};
use crate::features::users::services::UserService;
use crate::shared::geo::Coordinate;
use crate::shared::types::{ApiResponse, Meta};

/// State for request handlers
#[derive(Clone)]
pub struct RequestState {
    pub request_service: Arc<RequestService>,
    pub proximity_service: Arc<ProximityService>,
    pub user_service: Arc<UserService>,
}

/// Create a help request
///
/// The request inherits the requestor's current profile coordinates.
#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = CreateRequestDto,
    responses(
        (status = 201, description = "Request created", body = ApiResponse<CreateRequestResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "requests"
)]
pub async fn create_request(
    user: AuthenticatedUser,
    State(state): State<RequestState>,
    AppJson(dto): AppJson<CreateRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<CreateRequestResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let requestor = state.user_service.get_by_id(user.id).await?;

    let request = state
        .request_service
        .create(&CreateRequest {
            requestor_id: requestor.id,
            topic: dto.topic,
            description: dto.description,
            latitude: requestor.latitude,
            longitude: requestor.longitude,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(CreateRequestResponseDto { id: request.id }),
            None,
            None,
        )),
    ))
}

/// List the authenticated user's own requests, newest first
#[utoipa::path(
    get,
    path = "/api/requests",
    responses(
        (status = 200, description = "List of own requests", body = ApiResponse<Vec<RequestResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "requests"
)]
pub async fn list_my_requests(
    user: AuthenticatedUser,
    State(state): State<RequestState>,
) -> Result<Json<ApiResponse<Vec<RequestResponseDto>>>> {
    let requests = state.request_service.list_by_requestor(user.id).await?;
    let total = requests.len() as i64;
    let dtos: Vec<RequestResponseDto> = requests.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Find open requests near a point, closest first
///
/// Distances use the Haversine great-circle formula; a request exactly on
/// the perimeter is included.
#[utoipa::path(
    get,
    path = "/api/requests/nearby",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Open requests within the perimeter, ordered by distance", body = ApiResponse<Vec<NearbyRequestDto>>),
        (status = 400, description = "Invalid coordinates, amount or perimeter"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "requests"
)]
pub async fn nearby_requests(
    _user: AuthenticatedUser,
    State(state): State<RequestState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<ApiResponse<Vec<NearbyRequestDto>>>> {
    let center = Coordinate::new(query.latitude, query.longitude)?;
    let proximity_query = ProximityQuery::new(center, query.meters_perimeter, query.amount)?;

    let nearby = state.proximity_service.find_nearby(&proximity_query).await?;
    let total = nearby.len() as i64;
    let dtos: Vec<NearbyRequestDto> = nearby.into_iter().map(|n| n.into()).collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get request by id
#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    params(
        ("id" = i64, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request found", body = ApiResponse<RequestResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "requests"
)]
pub async fn get_request(
    _user: AuthenticatedUser,
    State(state): State<RequestState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<RequestResponseDto>>> {
    let request = state.request_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(request.into()), None, None)))
}

/// Accept an open request as helper
#[utoipa::path(
    post,
    path = "/api/requests/{id}/accept",
    params(
        ("id" = i64, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request accepted", body = ApiResponse<RequestResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is no longer open")
    ),
    security(("bearer_auth" = [])),
    tag = "requests"
)]
pub async fn accept_request(
    user: AuthenticatedUser,
    State(state): State<RequestState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<RequestResponseDto>>> {
    let existing = state.request_service.get_by_id(id).await?;
    if existing.requestor_id == user.id {
        return Err(AppError::Conflict(
            "You cannot accept your own request".to_string(),
        ));
    }

    let request = state.request_service.accept(id, user.id).await?;
    Ok(Json(ApiResponse::success(Some(request.into()), None, None)))
}

/// Update the status of a request
#[utoipa::path(
    patch,
    path = "/api/requests/{id}/status",
    params(
        ("id" = i64, Path, description = "Request ID")
    ),
    request_body = UpdateRequestStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<RequestResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a participant of this request"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Illegal status transition")
    ),
    security(("bearer_auth" = [])),
    tag = "requests"
)]
pub async fn update_request_status(
    user: AuthenticatedUser,
    State(state): State<RequestState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateRequestStatusDto>,
) -> Result<Json<ApiResponse<RequestResponseDto>>> {
    let request = state
        .request_service
        .update_status(id, dto.status, user.id)
        .await?;
    Ok(Json(ApiResponse::success(Some(request.into()), None, None)))
}

/// Remove a request
#[utoipa::path(
    delete,
    path = "/api/requests/{id}",
    params(
        ("id" = i64, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the requestor"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "requests"
)]
pub async fn delete_request(
    user: AuthenticatedUser,
    State(state): State<RequestState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    let existing = state.request_service.get_by_id(id).await?;
    if existing.requestor_id != user.id {
        return Err(AppError::Forbidden(
            "Only the requestor may delete this request".to_string(),
        ));
    }

    state.request_service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Request deleted".to_string()),
        None,
    )))
}
