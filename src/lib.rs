pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::schema_config::{DynamicSchema, ModelDefinition, SchemaConfig};
pub use crate::core::{diff::diff, model::Model};
pub use crate::domain::{
    ports::Schema,
    value::{Fields, Value},
};
pub use crate::utils::error::{ModelError, Result};
