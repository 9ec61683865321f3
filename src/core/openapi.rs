use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::requests::{dtos as requests_dtos, handlers::request_handler, models as requests_models};
use crate::features::users::{dtos as users_dtos, handlers::profile_handler};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::logged_in,
        // Users
        profile_handler::get_profile,
        profile_handler::update_profile,
        profile_handler::delete_account,
        // Requests
        request_handler::create_request,
        request_handler::list_my_requests,
        request_handler::nearby_requests,
        request_handler::get_request,
        request_handler::accept_request,
        request_handler::update_request_status,
        request_handler::delete_request,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::RegisterRequestDto,
            auth::dtos::CredentialsDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::model::AuthenticatedUser>,
            // Users
            users_dtos::UserProfileResponseDto,
            users_dtos::UpdateProfileDto,
            ApiResponse<users_dtos::UserProfileResponseDto>,
            // Requests
            requests_models::RequestStatus,
            requests_dtos::CreateRequestDto,
            requests_dtos::CreateRequestResponseDto,
            requests_dtos::RequestResponseDto,
            requests_dtos::NearbyRequestDto,
            requests_dtos::UpdateRequestStatusDto,
            ApiResponse<requests_dtos::CreateRequestResponseDto>,
            ApiResponse<requests_dtos::RequestResponseDto>,
            ApiResponse<Vec<requests_dtos::RequestResponseDto>>,
            ApiResponse<Vec<requests_dtos::NearbyRequestDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and token probes"),
        (name = "users", description = "User profile management"),
        (name = "requests", description = "Help requests and proximity search"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Voitheia API",
        version = "0.1.0",
        description = "API documentation for Voitheia",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
