//! The `categories` subcommand: lists the category slugs usable with `products --category`.

use anyhow::Result;
use catalog_lib::Client;

use crate::output::{print_categories, OutputFormat};

pub async fn run(client: &Client, format: &OutputFormat) -> Result<()> {
    let categories = client.get_categories().await?;
    print_categories(&categories, format)?;
    Ok(())
}
