pub mod schema_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "pojo-model")]
#[command(about = "Build a model from JSON, apply updates and print its changes")]
pub struct CliConfig {
    #[arg(long, help = "TOML file declaring the models")]
    pub schema: String,

    #[arg(long, help = "Name of the model to instantiate")]
    pub model: String,

    #[arg(long, help = "JSON object used to construct the model")]
    pub data: String,

    #[arg(long = "update", help = "JSON object to merge into the model (repeatable)")]
    pub updates: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("schema", &self.schema)?;
        validate_non_empty_string("model", &self.model)?;
        validate_non_empty_string("data", &self.data)
    }
}
