//! Domain value objects.

pub mod email;
pub mod role;

pub use email::*;
pub use role::*;
