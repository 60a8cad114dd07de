pub mod auth;
pub mod blog;
pub mod contact;
pub mod email;
pub mod media;
