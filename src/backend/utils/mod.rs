//! Utility modules for the backend.

/// Firebase project configuration.
pub mod config;
/// Trailing-edge debouncing.
pub mod debounce;
/// Embedded stylesheets and images.
pub mod resources;
