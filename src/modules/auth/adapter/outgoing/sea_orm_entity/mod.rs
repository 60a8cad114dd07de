pub mod user_bios;
pub mod users;
