//! External system integrations for Geotitres.
//!
//! - [`graphql`] - upstream GraphQL API client
//! - [`storage`] - output directory handling
//!
//! Both sit behind traits ([`graphql::GraphQlApi`], [`storage::OutputStore`])
//! so the export coordinator can be driven by test doubles.

pub mod graphql;
pub mod storage;
