//! Library catalog command-line service.
//!
//! Connects to the configured store once, runs a single catalog operation and
//! prints its result as JSON.
//!
//! ## Configuration
//!
//! Read from `config/default.toml`, an optional `config/local.toml` and `CATALOG_*`
//! environment variables. See [`catalog_service::config::AppConfig::load`].

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use catalog_service::{
    catalog::Catalog,
    config::{AppConfig, StoreKind},
    error::AppResult,
    model::{author::AuthorInput, book::BookInput},
    store::{StoreGateway, timeout::StoreTimeouts},
    tracing::tracer::Tracer,
};

/// Command-line interface configuration.
#[derive(Parser)]
#[command(name = "catalog_service")]
#[command(about = "Manage authors and books in the library catalog")]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Author operations
    Author {
        #[command(subcommand)]
        command: AuthorCommands,
    },
    /// Book operations
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
}

#[derive(Subcommand)]
pub enum AuthorCommands {
    /// Create a new author
    Create {
        /// Author name
        name: String,
        /// Birthdate as DD-MM-YYYY
        birthdate: String,
    },
    /// Get an author by ID
    Get {
        /// Author ID, 24 hexadecimal characters
        id: String,
    },
    /// List all authors
    List,
}

#[derive(Subcommand)]
pub enum BookCommands {
    /// Create a new book
    Create {
        /// Book title
        title: String,
        /// ID of an existing author
        author_id: String,
    },
    /// Get a book by ID
    Get {
        /// Book ID, 24 hexadecimal characters
        id: String,
    },
    /// List all books
    List,
    /// List the books of one author
    ByAuthor {
        /// Author ID
        author_id: String,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    Tracer::install(&config)?;

    info!(
        "Starting {} v{}",
        config.distribution.name,
        config.distribution.version.as_deref().unwrap_or_default(),
    );

    let catalog = start(&config).await?;

    if let Err(err) = run(&catalog, cli.command).await {
        error!(%err, "Catalog operation failed");
        return Err(err);
    }

    Ok(())
}

async fn start(config: &AppConfig) -> AppResult<Catalog> {
    let timeouts = StoreTimeouts::from(config.store.timeouts);

    match config.store.kind {
        StoreKind::Memory => Ok(Catalog::in_memory(timeouts)),
        StoreKind::Mongo => {
            let gateway =
                StoreGateway::connect(&config.store.uri, &config.store.database, timeouts).await?;
            Ok(Catalog::from_gateway(&gateway))
        }
    }
}

async fn run(catalog: &Catalog, command: Commands) -> AppResult<()> {
    match command {
        Commands::Author { command } => match command {
            AuthorCommands::Create { name, birthdate } => {
                print_json(&catalog.create_author(&AuthorInput { name, birthdate }).await?)
            }
            AuthorCommands::Get { id } => print_json(&catalog.get_author(&id).await?),
            AuthorCommands::List => print_json(&catalog.list_authors().await?),
        },
        Commands::Book { command } => match command {
            BookCommands::Create { title, author_id } => {
                print_json(&catalog.create_book(&BookInput { title, author_id }).await?)
            }
            BookCommands::Get { id } => print_json(&catalog.get_book(&id).await?),
            BookCommands::List => print_json(&catalog.list_books().await?),
            BookCommands::ByAuthor { author_id } => {
                print_json(&catalog.list_books_by_author(&author_id).await?)
            }
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
