//! Backend integrations: identity, document storage and their helpers.

pub mod firebase;
pub mod identity;
pub mod store;
pub mod utils;
