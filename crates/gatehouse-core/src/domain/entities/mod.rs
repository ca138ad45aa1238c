//! Domain entities.

pub mod session;
pub mod user;

pub use session::*;
pub use user::*;
