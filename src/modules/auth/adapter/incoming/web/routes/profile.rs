use actix_web::{get, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::domain::entities::{Role, UserBio};
use crate::auth::application::use_cases::fetch_profile::{FetchProfileError, ProfileView};
use crate::auth::application::use_cases::update_profile::{
    UpdateProfileError, UpdateProfileRequest,
};
use crate::media::application::domain::entities::ImageUpload;
use crate::shared::api::ApiResponse;
use crate::AppState;

// ====== DTOs ======
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UserBioDto {
    #[schema(example = "Tech")]
    pub genre: Option<String>,
    pub about: Option<String>,
    #[schema(example = "Software engineer")]
    pub profession: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
}

impl From<UserBioDto> for UserBio {
    fn from(dto: UserBioDto) -> Self {
        Self {
            genre: dto.genre,
            about: dto.about,
            profession: dto.profession,
            linkedin: dto.linkedin,
            twitter: dto.twitter,
            facebook: dto.facebook,
        }
    }
}

impl From<UserBio> for UserBioDto {
    fn from(bio: UserBio) -> Self {
        Self {
            genre: bio.genre,
            about: bio.about,
            profession: bio.profession,
            linkedin: bio.linkedin,
            twitter: bio.twitter,
            facebook: bio.facebook,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AvatarUploadDto {
    #[schema(example = "me.jpg")]
    pub file_name: String,
    /// Base64 payload, optionally as a `data:` URI
    pub data: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileDto {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@example.com")]
    pub email: String,
    /// New avatar; the current one is kept when absent
    pub image: Option<AvatarUploadDto>,
    /// Bio fields are saved only when sent
    pub bio: Option<UserBioDto>,
}

impl UpdateProfileDto {
    fn into_request(self) -> Result<UpdateProfileRequest, String> {
        let image = self
            .image
            .map(|img| ImageUpload::from_base64(&img.file_name, &img.data))
            .transpose()
            .map_err(|e| e.to_string())?;

        UpdateProfileRequest::new(self.name, self.email, image, self.bio.map(UserBio::from))
            .map_err(|e| e.to_string())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(example = 1)]
    id: i32,
    name: String,
    email: String,
    avatar_url: String,
    #[schema(value_type = String, example = "author")]
    role: Role,
    is_confirmed: bool,
    bio: Option<UserBioDto>,
}

impl From<ProfileView> for ProfileResponse {
    fn from(view: ProfileView) -> Self {
        Self {
            id: view.id.value(),
            name: view.name,
            email: view.email,
            avatar_url: view.avatar_url,
            role: view.role,
            is_confirmed: view.is_confirmed,
            bio: view.bio.map(UserBioDto::from),
        }
    }
}

// ====== Handlers ======
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile of the logged in user", body = ProfileResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
    )
)]
#[get("/api/users/me")]
pub async fn fetch_profile_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.fetch_profile_use_case.execute(user.user_id).await {
        Ok(view) => ApiResponse::success(ProfileResponse::from(view)),
        Err(FetchProfileError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(FetchProfileError::QueryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to load profile");
            ApiResponse::internal_error()
        }
    }
}

fn map_update_error(err: UpdateProfileError, user: &AuthenticatedUser) -> HttpResponse {
    match err {
        UpdateProfileError::UserNotFound => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        e @ UpdateProfileError::EmailAlreadyExists => {
            ApiResponse::conflict("EMAIL_ALREADY_EXISTS", &e.to_string())
        }
        UpdateProfileError::ImageUploadFailed(e) => {
            error!(user_id = %user.user_id, error = %e, "Avatar upload failed");
            ApiResponse::bad_gateway("Image upload failed")
        }
        UpdateProfileError::RepositoryError(e) => {
            error!(user_id = %user.user_id, error = %e, "Failed to update profile");
            ApiResponse::internal_error()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "users",
    request_body = UpdateProfileDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 409, description = "Email used by another account", body = ErrorResponse),
        (status = 502, description = "Image host failed", body = ErrorResponse),
    )
)]
#[put("/api/users/me")]
pub async fn update_profile_handler(
    user: AuthenticatedUser,
    req: web::Json<UpdateProfileDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = match req.into_inner().into_request() {
        Ok(request) => request,
        Err(message) => return ApiResponse::validation_error(&message),
    };

    match data.update_profile_use_case.execute(user.user_id, request).await {
        Ok(view) => {
            info!(user_id = %user.user_id, "Profile saved");
            ApiResponse::success(ProfileResponse::from(view))
        }
        Err(e) => map_update_error(e, &user),
    }
}
