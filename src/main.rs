//! mediator - CLI entry point.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mediator::config::Settings;
use mediator::llm::CompletionClient;
use mediator::mediation::{analyze, render_report};
use mediator::server::{self, AppState};
use mediator::{Audience, PromptConfiguration, Tone, build_mediator_prompt};

/// Value-translation mediator: prompt builder, completion proxy, and analysis.
#[derive(Parser, Debug)]
#[command(name = "mediator")]
#[command(about = "Value-translation mediator prompt builder and chat-completion proxy")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the chat proxy server
    Serve {
        /// Address to bind (overrides MEDIATOR_BIND)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Print the mediator system prompt
    Prompt(PromptArgs),

    /// Mediate a single statement and print the extracted fields
    Analyze {
        #[command(flatten)]
        prompt: PromptArgs,

        /// Model name (overrides MEDIATOR_MODEL)
        #[arg(long)]
        model: Option<String>,

        /// API key for this call (overrides OPENAI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Call the upstream API directly even if MEDIATOR_PROXY_URL is set
        #[arg(long)]
        direct: bool,

        /// The participant statement to mediate
        statement: String,
    },
}

#[derive(Args, Debug)]
struct PromptArgs {
    /// Tone of the constructive rewrite
    #[arg(long, value_enum, default_value_t = Tone::Gentle)]
    tone: Tone,

    /// Audience of the rewrite
    #[arg(long, value_enum, default_value_t = Audience::Citizen)]
    audience: Audience,

    /// Free-text participant background
    #[arg(long)]
    profile: Option<String>,
}

impl PromptArgs {
    fn configuration(&self) -> PromptConfiguration {
        PromptConfiguration {
            tone: self.tone,
            audience: self.audience,
            participant_profile: self.profile.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is the normal case
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    match cli.command {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or(settings.bind);
            server::serve(addr, AppState::from_settings(&settings))
                .await
                .with_context(|| format!("Chat proxy failed on {}", addr))?;
        }
        Command::Prompt(args) => {
            println!("{}", build_mediator_prompt(&args.configuration()));
        }
        Command::Analyze {
            prompt,
            model,
            api_key,
            direct,
            statement,
        } => {
            let client = CompletionClient::from_settings(&settings, direct);
            let model = model.unwrap_or_else(|| settings.model.clone());

            let analysis = analyze(
                &client,
                &prompt.configuration(),
                &statement,
                api_key,
                &model,
            )
            .await
            .context("Failed to mediate statement")?;

            print!("{}", render_report(&analysis));
        }
    }

    Ok(())
}
