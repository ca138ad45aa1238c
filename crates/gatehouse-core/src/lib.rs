//! # Gatehouse Core
//!
//! Core types, traits, and error definitions for Gatehouse.
//! This crate provides the domain model (users, session records, and the
//! derived per-user session view) plus the unified error type used across
//! all layers of the application.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;
