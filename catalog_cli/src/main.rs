mod commands;
mod output;

use anyhow::Result;
use catalog_lib::Client;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Browse the product catalog from the terminal")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Catalog API base URL (defaults to $CATALOG_API_URL, then https://dummyjson.com)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, loading more pages as the listing is scrolled
    Products(commands::products::ProductsArgs),
    /// List product categories
    Categories,
}

fn resolve_base_url(flag: Option<&str>, env: Option<String>) -> Option<String> {
    flag.map(str::to_string)
        .or(env)
        .filter(|url| !url.trim().is_empty())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("catalog=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let client = match resolve_base_url(
        cli.base_url.as_deref(),
        std::env::var("CATALOG_API_URL").ok(),
    ) {
        Some(url) => Client::with_base_url(&url),
        None => Client::new(),
    };

    match &cli.command {
        Commands::Products(args) => commands::products::run(args, &client, &format).await?,
        Commands::Categories => commands::categories::run(&client, &format).await?,
    }

    Ok(())
}
