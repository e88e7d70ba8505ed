pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Catalog CLI - manage categories and products through the catalog admin API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "CATALOG_API_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the catalog admin API"
    )]
    pub api_url: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Category list and create/edit/delete")]
    Category {
        #[command(subcommand)]
        cmd: commands::category::CategoryCommands,
    },

    #[command(about = "Product list and create/edit/delete")]
    Product {
        #[command(subcommand)]
        cmd: commands::product::ProductCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let http = reqwest::Client::new();

    match cli.command {
        Commands::Category { cmd } => {
            commands::category::handle(cmd, http, &cli.api_url, output_format).await
        }
        Commands::Product { cmd } => {
            commands::product::handle(cmd, http, &cli.api_url, output_format).await
        }
    }
}
