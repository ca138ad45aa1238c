//! Service implementations.

pub mod session_service_impl;
pub mod user_service_impl;

pub use session_service_impl::SessionServiceImpl;
pub use user_service_impl::UserServiceImpl;
