//! Data transfer objects.

pub mod session_dto;
pub mod user_dto;

pub use session_dto::*;
pub use user_dto::*;
