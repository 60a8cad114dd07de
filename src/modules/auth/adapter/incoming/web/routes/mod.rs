mod confirm_email;
mod login_user;
mod logout_user;
mod profile;
mod register_user;
mod request_password_reset;
mod resend_confirmation;
mod reset_password;

pub use confirm_email::{confirm_email_handler, ConfirmEmailResponse};
pub use login_user::{login_user_handler, LoginRequestDto, LoginResponse, LoginUserInfo};
pub use logout_user::{logout_user_handler, LogoutResponseBody};
pub use profile::{
    fetch_profile_handler, update_profile_handler, AvatarUploadDto, ProfileResponse,
    UpdateProfileDto, UserBioDto,
};
pub use register_user::{register_user_handler, RegisterUserRequest, RegisterUserResponse, RegisteredUser};
pub use request_password_reset::request_password_reset_handler;
pub use resend_confirmation::{resend_confirmation_handler, EmailRequestDto, MessageResponse};
pub use reset_password::{
    check_reset_token_handler, reset_password_handler, ResetPasswordDto, ResetPasswordResponse,
    ResetTokenResponse,
};

// utoipa path structs, referenced by the OpenAPI derive
pub use confirm_email::{__path_confirm_email_handler};
pub use login_user::{__path_login_user_handler};
pub use logout_user::{__path_logout_user_handler};
pub use profile::{__path_fetch_profile_handler, __path_update_profile_handler};
pub use register_user::{__path_register_user_handler};
pub use request_password_reset::{__path_request_password_reset_handler};
pub use resend_confirmation::{__path_resend_confirmation_handler};
pub use reset_password::{__path_check_reset_token_handler, __path_reset_password_handler};
