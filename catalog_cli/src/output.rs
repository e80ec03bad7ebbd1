use anyhow::Result;
use catalog_lib::types::{Category, Product};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to the table format.
    pub fn parse(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ProductRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Product")]
    #[serde(rename = "Product")]
    title: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Rating")]
    #[serde(rename = "Rating")]
    rating: f64,
    #[tabled(rename = "Image")]
    #[serde(rename = "Image")]
    thumbnail: String,
}

#[derive(Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "Slug")]
    #[serde(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
}

// -- Row builders --

fn build_product_rows(products: &[Product]) -> Vec<ProductRow> {
    products
        .iter()
        .map(|p| ProductRow {
            id: p.id,
            title: p.title.clone(),
            price: format_price(p.price),
            category: p.category.clone(),
            rating: p.rating,
            thumbnail: p.thumbnail.clone(),
        })
        .collect()
}

fn build_category_rows(categories: &[Category]) -> Vec<CategoryRow> {
    categories
        .iter()
        .map(|c| CategoryRow {
            slug: c.slug.clone(),
            name: c.name.clone(),
        })
        .collect()
}

// -- Dispatch --

pub fn print_products(products: &[Product], format: &OutputFormat) -> Result<()> {
    let rows = build_product_rows(products);
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => println!("{}", markdown(rows)),
        OutputFormat::Csv => print_csv(rows)?,
        OutputFormat::Json => print_json(&products),
    }
    Ok(())
}

pub fn print_categories(categories: &[Category], format: &OutputFormat) -> Result<()> {
    let rows = build_category_rows(categories);
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => println!("{}", markdown(rows)),
        OutputFormat::Csv => print_csv(rows)?,
        OutputFormat::Json => print_json(&categories),
    }
    Ok(())
}

fn markdown<R: Tabled>(rows: Vec<R>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    table.to_string()
}

// -- CSV output --

fn print_csv<R: Serialize>(rows: Vec<R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Footer summarising how much of the result set is loaded.
pub fn summary_line(shown: usize, total: Option<u64>) -> String {
    match total {
        Some(total) => format!("Showing {} of {} products", shown, total),
        None => format!("Showing {} products", shown),
    }
}

fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}
