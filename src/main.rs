use anyhow::Context;
use clap::Parser;
use pojo_model::utils::{logger, validation::Validate};
use pojo_model::{CliConfig, Model, SchemaConfig};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting pojo-model CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        tracing::error!("❌ pojo-model failed: {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    let schemas = SchemaConfig::from_file(&config.schema)
        .with_context(|| format!("failed to load schema file {}", config.schema))?;
    schemas.validate()?;

    let schema = schemas.schema(&config.model)?;
    let mut model = Model::from_json(schema, &config.data).context("invalid --data")?;

    for (index, update) in config.updates.iter().enumerate() {
        let data: serde_json::Value = serde_json::from_str(update)
            .with_context(|| format!("invalid --update #{}", index + 1))?;
        model.update_value(data)?;
    }

    println!("{}", model);
    println!("{}", serde_json::to_string(&model.changes())?);

    Ok(())
}
