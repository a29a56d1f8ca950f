pub mod forms;
pub mod identity;

pub use identity::{ApplicationId, Identity, InternshipId, Role, UserId};
