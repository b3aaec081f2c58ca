//! Frontend services for business logic and state management.

pub mod context;
pub mod toast;
pub mod username;
