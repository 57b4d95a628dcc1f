//! Utility modules.

/// Timestamp serialization helpers shared by all resource DTOs.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
