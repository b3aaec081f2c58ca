//! Firebase Authentication and Cloud Firestore clients.

pub mod auth;
pub mod firestore;
pub mod oauth;
pub mod values;

pub use auth::GoogleAuth;
pub use firestore::FirestoreStore;
