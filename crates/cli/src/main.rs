mod cli;

use blogi_core::clients::HttpConnector;
use blogi_core::config::{load_settings, Settings};
use blogi_core::engine::Controller;
use blogi_core::templates::TemplateStore;
use blogi_protocol::{AgentConfig, GenerationResult};
use clap::Parser;
use cli::{Cli, Commands, GenerateArgs};
use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries either POST_FILE_PATH or the --json result.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Arc::new(load_settings(cli.config.as_deref(), |name| {
        std::env::var(name).ok()
    })?);

    match cli.command {
        Commands::Generate(args) => generate(settings, args).await,
        Commands::Agents => {
            list_agents(&settings);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn generate(settings: Arc<Settings>, args: GenerateArgs) -> color_eyre::Result<ExitCode> {
    let config = AgentConfig {
        agent_name: args.agent_name,
        kind: args.agent_type,
        topic: args.topic,
        image_prompt: args.image_prompt,
        callback_url: args.webhook_url,
        model: args.model.unwrap_or_else(|| settings.model.clone()),
    };

    let controller = Controller::new(settings.clone(), HttpConnector::new(settings));
    let result = controller.run(&config).await;

    if let Some(report) = stdout_report(&result, args.json)? {
        println!("{report}");
    }
    if !args.json {
        if result.success {
            eprintln!("{} {}", "✓".green(), result.message);
        } else {
            eprintln!("{} {}", "✗".red(), result.message);
        }
    }

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// What a run writes to stdout: the JSON result under `--json`, otherwise
/// `POST_FILE_PATH=<path>` after a successful save.
fn stdout_report(result: &GenerationResult, json: bool) -> serde_json::Result<Option<String>> {
    if json {
        return serde_json::to_string_pretty(result).map(Some);
    }
    Ok(result
        .file_path
        .as_ref()
        .map(|path| format!("POST_FILE_PATH={}", path.display())))
}

fn list_agents(settings: &Settings) {
    let store = TemplateStore::for_prompts_dir(settings.prompts_dir.as_deref());
    for agent in store.list_agents() {
        println!("{agent}");
    }
}
