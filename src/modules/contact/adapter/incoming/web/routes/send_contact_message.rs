use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::contact::application::use_cases::send_contact_message::{
    ContactRequest, SendContactMessageError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct ContactRequestDto {
    #[schema(example = "Grace Hopper")]
    pub name: String,

    #[schema(example = "grace@example.com")]
    pub email: String,

    #[schema(example = "+1 555 010 2030")]
    pub phone: String,

    #[schema(example = "Loved your last post!")]
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ContactResponse {
    #[schema(example = "Your message has been successfully sent.")]
    message: String,
}

/// Send a message to the site owner
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactRequestDto,
    responses(
        (status = 200, description = "Message sent", body = inline(SuccessResponse<ContactResponse>)),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 502, description = "Mail server unavailable", body = ErrorResponse),
    )
)]
#[post("/api/contact")]
pub async fn send_contact_message_handler(
    req: web::Json<ContactRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match ContactRequest::new(dto.name, dto.email, dto.phone, dto.message) {
        Ok(request) => request,
        Err(e) => return ApiResponse::validation_error(&e.to_string()),
    };

    match data.send_contact_message_use_case.execute(request).await {
        Ok(()) => ApiResponse::success(ContactResponse {
            message: "Your message has been successfully sent.".to_string(),
        }),
        Err(SendContactMessageError::EmailSendingFailed(e)) => {
            error!(error = %e, "Contact message not delivered");
            ApiResponse::bad_gateway("Your message could not be sent. Please try again later.")
        }
    }
}
