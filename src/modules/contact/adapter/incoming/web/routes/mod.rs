mod send_contact_message;

pub use send_contact_message::{send_contact_message_handler, ContactRequestDto, ContactResponse};

// utoipa path structs, referenced by the OpenAPI derive
pub use send_contact_message::{__path_send_contact_message_handler};
