pub mod auth;
pub mod extract;
pub mod security_headers;

pub use auth::{CurrentUser, TeacherUser};
