//! Client for the Firebase Realtime Database REST API.
//!
//! Each database node is a JSON document at `https://{database}.firebaseio.com/{path}.json`.
//! [`FirebaseDatabase`] reads, writes, patches and deletes those nodes, one HTTP request per
//! call, with optional query filters and `print=silent` support.

pub mod core;
pub mod database;

pub use crate::core::middleware::TracingMiddleware;
pub use database::{
    DatabaseConfig, DatabaseError, DatabaseReference, DatabaseResponse, FirebaseDatabase,
    PushResponse, QueryParams,
};
