//! GraphQL API adapter
//!
//! One POST per call, body `{query, variables?}`, JSON response.

pub mod client;
pub mod models;

pub use client::{GraphQlApi, GraphQlClient};
pub use models::GraphQlRequest;
