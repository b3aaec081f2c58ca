//! Shared UI components.

pub mod toast;

pub use toast::ToastHost;
