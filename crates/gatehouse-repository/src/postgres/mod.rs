//! PostgreSQL repository implementations.

pub mod session_repository;
pub mod user_repository;

pub use session_repository::PgSessionRepository;
pub use user_repository::PgUserRepository;
