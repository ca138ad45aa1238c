//! HTTP controllers.

pub mod health_controller;
pub mod session_controller;
pub mod user_controller;
