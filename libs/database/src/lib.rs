//! MongoDB connector and utilities.
//!
//! Provides connection management with retry, env-sourced configuration,
//! and a health probe for the document store backing the meal catalog.
//!
//! # Features
//!
//! - `config` (default) - load `MongoConfig` from the environment via
//!   `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;
pub mod mongodb;

pub use mongodb::MongoError;
