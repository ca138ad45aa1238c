//! # Gatehouse Service
//!
//! Business logic layer: user management and session reconciliation.
//!
//! Services depend on repository traits only and are wired with explicit
//! constructor injection; nothing here knows about PostgreSQL or HTTP.

pub mod dto;
pub mod r#impl;
pub mod reconcile;
pub mod session_service;
pub mod user_service;

pub use r#impl::{SessionServiceImpl, UserServiceImpl};
pub use session_service::SessionService;
pub use user_service::UserService;
