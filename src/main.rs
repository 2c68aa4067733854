//! Legal Assistant CLI
//!
//! Terminal front end for the legal provision search service:
//! - Interactive chat (default)
//! - One-shot questions
//! - Theme preference
//! - Config file generation

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use legal_assistant::config::{generate_default_config, Config, LoggingConfig};
use legal_assistant::render::render_message;
use legal_assistant::{
    Conversation, FileThemeStore, IgnoreReason, LegalSearchClient, Message, SubmitOutcome, Theme,
    ThemePreference,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "legal-assistant")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ask legal questions and read the matching articles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ~/.config/legal-assistant/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Search service URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat session
    Chat,

    /// Ask a single question and print the answer
    Ask {
        /// The question
        #[arg(required = true)]
        question: Vec<String>,
    },

    /// Show or change the saved theme
    Theme {
        /// New theme (omit to show the current one)
        value: Option<ThemeArg>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        return write_default_config(output.as_deref());
    }

    // No subscriber yet: config problems must surface as errors.
    let config_path = cli.config.clone().or_else(Config::default_path);
    let mut config = match &config_path {
        Some(path) => Config::load_with_env(path)?,
        None => Config::from_env()?,
    };
    if let Some(url) = cli.api_url {
        config.client.base_url = url;
        config.validate()?;
    }

    init_logging(&config.logging);
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }
    tracing::debug!("Configuration: {:?}", config);

    let mut theme = ThemePreference::load(config.theme.store());

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let conversation = Conversation::with_top_k(
                Arc::new(LegalSearchClient::new(config.client.client_config())),
                config.client.top_k,
            );
            run_chat(&conversation, &mut theme).await?;
        }
        Commands::Ask { question } => {
            let conversation = Conversation::with_top_k(
                Arc::new(LegalSearchClient::new(config.client.client_config())),
                config.client.top_k,
            );
            let question = question.join(" ");
            match conversation.submit(&question).await {
                SubmitOutcome::Answered(reply) => print_message(&reply, theme.current()),
                SubmitOutcome::Failed(reply) => {
                    print_message(&reply, theme.current());
                    std::process::exit(1);
                }
                SubmitOutcome::Ignored(_) => {
                    eprintln!("Nothing to ask");
                    std::process::exit(2);
                }
            }
        }
        Commands::Theme { value } => match value {
            Some(value) => {
                theme.set(value.into())?;
                println!("Theme set to {}", theme.current());
            }
            None => println!("{}", theme.current()),
        },
        Commands::Config { output } => write_default_config(output.as_deref())?,
    }

    Ok(())
}

/// Install the tracing subscriber on stderr
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("legal_assistant={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Interactive loop. Slash commands are handled locally, everything else is
/// sent as a question.
async fn run_chat(
    conversation: &Conversation,
    theme: &mut ThemePreference<FileThemeStore>,
) -> anyhow::Result<()> {
    println!("Legal Assistant v{}", env!("CARGO_PKG_VERSION"));
    println!("Ask a legal question to get started. Commands: /theme [light|dark], /history, /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "/quit" | "/exit" => break,
            "/history" => {
                for message in conversation.messages().await {
                    print_message(&message, theme.current());
                }
                continue;
            }
            cmd if cmd == "/theme" || cmd.starts_with("/theme ") => {
                let arg = cmd.trim_start_matches("/theme").trim();
                let result = if arg.is_empty() {
                    theme.toggle().map(|_| ())
                } else {
                    arg.parse::<Theme>().and_then(|next| theme.set(next))
                };
                match result {
                    Ok(()) => println!("Theme: {}", theme.current()),
                    Err(e) => eprintln!("{}", e),
                }
                continue;
            }
            _ => {}
        }

        if !line.trim().is_empty() {
            println!("Searching...");
        }
        match conversation.submit(&line).await {
            SubmitOutcome::Answered(reply) | SubmitOutcome::Failed(reply) => {
                print_message(&reply, theme.current());
            }
            SubmitOutcome::Ignored(IgnoreReason::Empty) => {}
            SubmitOutcome::Ignored(IgnoreReason::Busy) => {
                println!("Still waiting for the previous answer");
            }
        }
    }

    Ok(())
}

fn print_message(message: &Message, theme: Theme) {
    let width = crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(80)
        .min(100);
    println!("{}", render_message(message, width, theme));
}
