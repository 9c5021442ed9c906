//! # pressroom CLI
//!
//! Command-line interface and JSON API for the pressroom article repository.

mod commands;
mod envelope;

use clap::{Parser, Subcommand, ValueEnum};
use pressroom_core::{ArticleRepository, ContactForm};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pressroom")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "pressroom.yml")]
    config: PathBuf,

    /// Read articles from this directory instead of the configured source
    #[arg(long)]
    content: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all articles, newest first
    List {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single article
    Show {
        /// Article slug (filename without extension)
        slug: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = ArticleFormat::Json)]
        format: ArticleFormat,
    },

    /// List articles carrying a tag (exact match)
    Tag {
        /// Tag to filter by
        tag: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the most recent articles
    Recent {
        /// Number of articles (defaults to recent_count from config)
        #[arg(long)]
        count: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Load all content and report skipped documents
    Check {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Fail when any document was skipped
        #[arg(long)]
        strict: bool,
    },

    /// Validate a contact form and print the email service request
    Contact {
        /// Sender name
        #[arg(long)]
        name: String,

        /// Sender email address
        #[arg(long)]
        email: String,

        /// Sender company
        #[arg(long)]
        company: Option<String>,

        /// Message body
        #[arg(long)]
        message: String,
    },

    /// Serve the article repository as a JSON API
    Serve {
        /// Server port (defaults to server.port from config)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Copy, Clone, ValueEnum)]
pub enum ArticleFormat {
    Json,
    Markdown,
    Html,
    Raw,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = commands::load_config(&cli.config, cli.content.as_deref())?;
    // Content loading starts only for commands that read articles
    let repo = || ArticleRepository::new(config.content_source());

    match cli.command {
        Commands::List { json } => commands::list_articles(&repo(), json).await,
        Commands::Show { slug, format } => commands::show_article(&repo(), &slug, format).await,
        Commands::Tag { tag, json } => commands::tagged_articles(&repo(), &tag, json).await,
        Commands::Recent { count, json } => {
            let count = count.unwrap_or(config.recent_count);
            commands::recent_articles(&repo(), count, json).await
        }
        Commands::Check { json, strict } => commands::check_content(&repo(), json, strict).await,
        Commands::Contact {
            name,
            email,
            company,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                company,
                message,
            };
            commands::send_contact(config.contact.as_ref(), form).await
        }
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            commands::serve(repo(), config.recent_count, port).await
        }
    }
}
