//! Sign-in and username selection page.

pub mod form;
pub mod main;

pub use main::Enter;
