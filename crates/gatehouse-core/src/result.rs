//! Result type alias used across all layers.

use crate::GatehouseError;

/// Result type for all Gatehouse operations.
pub type GatehouseResult<T> = Result<T, GatehouseError>;
