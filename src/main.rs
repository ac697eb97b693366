//! Notes Assistant CLI
//!
//! Command-line front end for the notes backend:
//! - Sign up and log in
//! - List, add and delete notes
//! - Grammar correction and writing assistance
//! - Interactive shell

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use notes_assistant::config::{generate_default_config, Config, LoggingConfig};
use notes_assistant::terminal::format_view;
use notes_assistant::{
    shell, AssistMode, ClientError, FileTokenStore, HttpBackend, NotesClient, TerminalPresenter,
};

#[derive(Parser)]
#[command(name = "notes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI-assisted notes from the terminal")]
#[command(long_about = "Notes Assistant keeps your notes on a notes backend.\nSave notes, check their grammar and get writing help from the AI assistant.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config and NOTES_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Signup {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// List your notes
    List,

    /// Save a new note
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        content: String,
    },

    /// Delete a note by id
    Delete {
        id: i64,
    },

    /// Grammar-check a piece of text
    Correct {
        text: String,
    },

    /// Ask the writing assistant
    Assist {
        prompt: String,
        /// Prompt style
        #[arg(short, long, value_enum, default_value_t = AssistMode::Default)]
        mode: AssistMode,
    },

    /// Check that the backend is reachable
    Status,

    /// Interactive session
    Shell,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = generate_default_config();
        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", config),
        }
        return Ok(());
    }

    let (mut config, report) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => {
            let (config, report) = Config::load_default();
            (config, Some(report))
        }
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    init_logging(&config.logging);
    if let Some(report) = report {
        report.log();
    }

    let backend = HttpBackend::new(&config.api.base_url, config.api.request_timeout())?;
    let store = FileTokenStore::new(config.session.token_path());
    let client = NotesClient::new(backend, store, TerminalPresenter::new());

    if let Commands::Status = cli.command {
        match client.status().await {
            Ok(message) => {
                println!("Notes Assistant v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("Backend: {}", config.api.base_url);
                println!("Status: {}", message);
                return Ok(());
            }
            Err(e) => {
                eprintln!("Cannot connect to notes backend at {}", config.api.base_url);
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    let startup = client.start().await;

    let outcome = match cli.command {
        Commands::Signup { email, password } => {
            client.set_email(email);
            client.set_password(password);
            client.signup(client.credentials()).await
        }
        Commands::Login { email, password } => {
            client.set_email(email);
            client.set_password(password);
            client.login(client.credentials()).await
        }
        // The notes were fetched on startup
        Commands::List => match client.token() {
            Some(_) => startup,
            None => Err(ClientError::NotAuthenticated),
        },
        Commands::Add { title, content } => {
            client.set_title(title);
            client.set_content(content);
            client.submit_note(client.composer()).await
        }
        Commands::Delete { id } => client.delete_note(id).await,
        Commands::Correct { text } => client.correct_grammar(&text).await,
        Commands::Assist { prompt, mode } => {
            client.set_prompt(prompt.as_str());
            client.set_mode(mode);
            client.get_ai_completion(&prompt, mode).await
        }
        Commands::Shell => {
            shell::run(&client).await?;
            return Ok(());
        }
        Commands::Status | Commands::Config { .. } => Ok(()),
    };

    print!("{}", format_view(&client.presenter().latest()));

    if let Err(e) = outcome {
        tracing::debug!(error = %e, "Command failed");
        std::process::exit(1);
    }
    Ok(())
}

/// Initialize tracing to stderr, honoring RUST_LOG over the configured level
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            EnvFilter::new(format!("notes={0},notes_assistant={0}", config.level))
        });
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
