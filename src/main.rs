mod api;
mod handlers;
mod i18n;

use clap::{Parser, Subcommand};
use hello_core::{config, dispatch::Skill, envelope::RequestEnvelope};
use std::io::Read;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hello-skill",
    version,
    about = "Hello World voice skill: localized intent handlers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml", env = "HELLO_SKILL_CONFIG")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one request envelope through the skill and print the response.
    Invoke {
        /// Envelope JSON file. Reads stdin when omitted.
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Serve the skill as an HTTP endpoint.
    Serve,
    /// List loaded languages and their string counts.
    Locales,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Up before config load; the configured level is swapped in afterwards.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(log_filter("info"))
        .with_writer(std::io::stderr)
        .with_filter_reloading();
    let filter = subscriber.reload_handle();
    subscriber.init();

    let cfg = config::load(&cli.config)?;
    filter.reload(log_filter(&cfg.skill.log_level))?;

    match cli.command {
        Commands::Invoke { file } => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("failed to read {path}: {e}"))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            if raw.trim().is_empty() {
                anyhow::bail!("no request envelope provided. Usage: hello-skill invoke [--file <path>]");
            }

            let skill = build(&cfg)?;
            let envelope = RequestEnvelope::from_json(&raw)?;
            let response = skill.invoke(envelope).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Serve => {
            let skill = build(&cfg)?;
            tracing::info!(
                "{}: handlers {}",
                cfg.skill.name,
                skill.handler_names().join(", ")
            );
            api::serve(&cfg.api, Arc::new(skill)).await?;
        }
        Commands::Locales => {
            let catalog = i18n::load_catalog(&cfg.skill)?;
            println!("{}: string tables\n", cfg.skill.name);
            for language in catalog.languages() {
                let count = catalog.table(language).map_or(0, |t| t.len());
                let missing = i18n::missing_keys(&catalog, language);
                let marker = if language == catalog.default_language() {
                    " (default)"
                } else {
                    ""
                };
                if missing.is_empty() {
                    println!("  {language}{marker}: {count} strings");
                } else {
                    println!(
                        "  {language}{marker}: {count} strings, missing {}",
                        missing.join(", ")
                    );
                }
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` when set, otherwise `level`.
fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Load string tables and assemble the skill.
fn build(cfg: &config::Config) -> anyhow::Result<Skill> {
    let catalog = i18n::load_catalog(&cfg.skill)?;
    Ok(handlers::build_skill(catalog, &cfg.skill)?)
}
