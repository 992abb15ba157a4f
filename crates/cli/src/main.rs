//! Apricot catalog CLI.
//!
//! # Usage
//!
//! ```bash
//! # Split a multi-color product into one product per color (DRAFT)
//! apricot split --title "Wool Coat"
//!
//! # Set absolute stock for a SKU at a named location
//! apricot inventory set --sku COAT-IV-S --location "Tokyo Warehouse" --quantity 12
//!
//! # Replace file-library images with new local bytes
//! apricot media replace-files ./new/coat_01.jpg ./new/coat_02.jpg
//!
//! # Re-point a product's description at freshly uploaded images
//! apricot media replace-description-images --product-id 8051 ./desc/01.jpg ./desc/02.jpg
//!
//! # Bulk-write rich-text descriptions from a TSV file
//! apricot describe --file descriptions.tsv
//! ```
//!
//! Credentials and shop settings come from the environment (or a
//! `.env` file); see `apricot_admin::Config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use apricot_admin::{AdminClient, Config};

mod commands;

#[derive(Parser)]
#[command(name = "apricot")]
#[command(author, version, about = "Apricot Studios catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a multi-color product into one product per color
    Split {
        /// Title of the source product
        #[arg(long)]
        title: String,

        /// Status of the created products (`DRAFT`, `ACTIVE`)
        #[arg(long, default_value = "DRAFT")]
        status: String,
    },
    /// Manage inventory levels
    Inventory {
        #[command(subcommand)]
        action: InventoryAction,
    },
    /// Manage product and library media
    Media {
        #[command(subcommand)]
        action: MediaAction,
    },
    /// Write rich-text product descriptions from a TSV file
    Describe {
        /// TSV with columns: title, description, care, size, material,
        /// origin, and optionally size_table_html
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum InventoryAction {
    /// Set the available quantity of a SKU at a location
    Set {
        #[arg(long)]
        sku: String,

        /// Location name, e.g. "Tokyo Warehouse"
        #[arg(long)]
        location: String,

        #[arg(long)]
        quantity: i64,
    },
}

#[derive(Subcommand)]
enum MediaAction {
    /// Replace existing file-library images, filename by filename
    ReplaceFiles {
        /// Local image files; basenames select the library files
        paths: Vec<PathBuf>,
    },
    /// Upload description images and rewrite a product's description
    ReplaceDescriptionImages {
        /// The product whose description is rewritten
        #[arg(long)]
        product_id: String,

        /// Local image files, in display order
        paths: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let client = AdminClient::new(&config);

    match cli.command {
        Commands::Split { title, status } => {
            commands::split::run(&client, &title, &status).await?;
        }
        Commands::Inventory { action } => match action {
            InventoryAction::Set {
                sku,
                location,
                quantity,
            } => commands::inventory::set(&client, &sku, &location, quantity).await?,
        },
        Commands::Media { action } => match action {
            MediaAction::ReplaceFiles { paths } => {
                commands::media::replace_files(&client, &paths).await?;
            }
            MediaAction::ReplaceDescriptionImages { product_id, paths } => {
                commands::media::replace_description_images(&client, &product_id, &paths).await?;
            }
        },
        Commands::Describe { file } => commands::describe::run(&client, &file).await?,
    }
    Ok(())
}
