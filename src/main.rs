use anyhow::Context;
use clap::Parser;
use mega_api::utils::{logger, validation::Validate};
use mega_api::{ApiValue, CliConfig, MegaApi, TomlConfig};

fn load_file_config(path: Option<&str>) -> anyhow::Result<TomlConfig> {
    let Some(path) = path else {
        return Ok(TomlConfig::default());
    };
    let config = TomlConfig::from_file(path)
        .with_context(|| format!("failed to load config file '{}'", path))?;
    config
        .validate()
        .with_context(|| format!("invalid config file '{}'", path))?;
    Ok(config)
}

fn render(value: &ApiValue, pretty: bool) -> anyhow::Result<String> {
    Ok(match value {
        ApiValue::Json(json) if pretty => serde_json::to_string_pretty(json)?,
        other => other.to_string(),
    })
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let file_config = match load_file_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if cli.json_logs || file_config.json_logs() {
        logger::init_json_logger(cli.verbose, file_config.logging_level());
    } else {
        logger::init_cli_logger(cli.verbose, file_config.logging_level());
    }
    mega_api::init();

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let settings = match cli.settings(file_config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let api = match MegaApi::from_config(&settings) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("❌ Failed to build HTTP client: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let options = cli.request_options(&settings);
    match api.json(&cli.path, Some(options)).await {
        Ok(value) => match render(&value, cli.pretty) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("❌ {:#}", e);
                std::process::exit(2);
            }
        },
        Err(e) => {
            tracing::error!("❌ Request to {} failed: {}", cli.path, e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    }
}
