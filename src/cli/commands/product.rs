use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{confirmation, output_collection, output_error, output_outcome, output_success, Outcome};
use crate::cli::OutputFormat;
use crate::client::{format_price, Fetched, ProductPage, ResourceClient};
use crate::database::models::Product;
use crate::types::{Collection, DocumentId};

#[derive(Subcommand)]
pub enum ProductCommands {
    #[command(about = "List all products")]
    List,

    #[command(about = "Show one product with its category")]
    Show {
        #[arg(help = "Product ID")]
        id: DocumentId,
    },

    #[command(about = "Create a product")]
    Add {
        #[arg(long, help = "Product code")]
        code: String,
        #[arg(long, help = "Product name")]
        name: String,
        #[arg(long, help = "Product description")]
        description: String,
        #[arg(long, default_value = "", help = "Price; empty leaves it unset")]
        price: String,
        #[arg(long, help = "Category ID (defaults to the first category)")]
        category: Option<String>,
    },

    #[command(about = "Edit a product; omitted fields keep their current value")]
    Edit {
        #[arg(help = "Product ID")]
        id: DocumentId,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "New price; an empty string clears it")]
        price: Option<String>,
        #[arg(long, help = "New category ID")]
        category: Option<String>,
    },

    #[command(about = "Delete a product")]
    Delete {
        #[arg(help = "Product ID")]
        id: DocumentId,
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(
    cmd: ProductCommands,
    http: reqwest::Client,
    api_url: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut page = ProductPage::connect(http.clone(), api_url)?;

    match cmd {
        ProductCommands::List => {
            page.load().await?;
            print_rows(&page, &output_format, None)
        }
        ProductCommands::Show { id } => {
            let client: ResourceClient<Product> =
                ResourceClient::new(http, api_url, Collection::Products.resource())?;
            match client.fetch(id).await? {
                Fetched::Found(product) => {
                    let category = product
                        .category
                        .expanded()
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| "<missing category>".to_string());
                    output_success(
                        &output_format,
                        &format!(
                            "{} {} [{}] {} - {}",
                            product.code,
                            product.name,
                            category,
                            format_price(product.price),
                            product.description
                        ),
                        Some(serde_json::to_value(&product)?),
                    )
                }
                Fetched::Rejected(status) => {
                    output_error(&output_format, &format!("product {} not found ({})", id, status), Some("NOT_FOUND"))
                }
            }
        }
        ProductCommands::Add { code, name, description, price, category } => {
            // Categories first: the blank form defaults to the first one
            page.load().await?;
            let form = page.form_mut();
            form.code = code;
            form.name = name;
            form.description = description;
            form.price = price;
            if let Some(category) = category {
                form.category = category;
            }
            let outcome = Outcome::submitted("Product", &page.submit().await?)?;
            print_rows(&page, &output_format, Some(outcome))
        }
        ProductCommands::Edit { id, code, name, description, price, category } => {
            page.load_categories().await?;
            if !page.start_edit(id).await? {
                return output_error(&output_format, &format!("product {} not found", id), Some("NOT_FOUND"));
            }
            let form = page.form_mut();
            if let Some(code) = code {
                form.code = code;
            }
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(price) = price {
                form.price = price;
            }
            if let Some(category) = category {
                form.category = category;
            }
            let outcome = Outcome::submitted("Product", &page.submit().await?)?;
            print_rows(&page, &output_format, Some(outcome))
        }
        ProductCommands::Delete { id, yes } => {
            page.load().await?;
            if !page.delete(id, &confirmation(yes)).await? {
                return output_success(&output_format, "Delete cancelled", None);
            }
            let outcome = if page.rows().iter().any(|p| p.id == id) {
                Outcome::Failure {
                    message: format!("product {} is still listed", id),
                    code: "NOT_DELETED",
                }
            } else {
                Outcome::Success {
                    message: format!("Product {} deleted", id),
                    data: Some(json!({ "id": id })),
                }
            };
            print_rows(&page, &output_format, Some(outcome))
        }
    }
}

fn print_rows(page: &ProductPage, output_format: &OutputFormat, outcome: Option<Outcome>) -> anyhow::Result<()> {
    let lines = page.display_rows().into_iter().map(|row| {
        format!(
            "{}  {:<10}  {:<24}  {:<16}  {:>12}",
            row.id, row.code, row.name, row.category_name, row.price
        )
    });
    match outcome {
        Some(outcome) => output_outcome(output_format, outcome, page.rows(), lines, "No products"),
        None => output_collection(output_format, page.rows(), lines, "No products"),
    }
}
