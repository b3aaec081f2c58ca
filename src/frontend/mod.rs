//! Frontend module for the `DreamEnter` application.

pub mod app;
pub mod components;
pub mod pages;
pub mod services;
