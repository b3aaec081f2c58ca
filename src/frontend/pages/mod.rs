//! Application pages.

pub mod enter;
