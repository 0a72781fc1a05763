//! Configuration management for Geotitres.
//!
//! Geotitres reads a single TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GEOTITRES_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! url = "https://api.example.com/graphql"
//! token = "${GEOTITRES_TOKEN}"
//!
//! [queries]
//! titres = "queries/titres.gql"
//! types = "queries/types.gql"
//! domaines = "queries/domaines.gql"
//! statuts = "queries/statuts.gql"
//!
//! [export]
//! output_dir = "public/geojson"
//!
//! [schedule]
//! cron = "0 0 4 * * Mon-Fri"
//! timezone = "Europe/Paris"
//!
//! [[definitions]]
//! nom = "Titres miniers valides"
//! fichier = "titres-m-val"
//!
//! [definitions.variables]
//! domaineIds = ["m"]
//! statutIds = ["val"]
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApiConfig, ApplicationConfig, ExportConfig, GeotitresConfig, LoggingConfig, QueriesConfig,
    ScheduleConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
