use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{confirmation, output_collection, output_error, output_outcome, output_success, Outcome};
use crate::cli::OutputFormat;
use crate::client::{CategoryPage, Fetched, ResourceClient};
use crate::database::models::Category;
use crate::types::{Collection, DocumentId};

#[derive(Subcommand)]
pub enum CategoryCommands {
    #[command(about = "List all categories")]
    List,

    #[command(about = "Show one category")]
    Show {
        #[arg(help = "Category ID")]
        id: DocumentId,
    },

    #[command(about = "Create a category")]
    Add {
        #[arg(long, help = "Category name")]
        name: String,
        #[arg(long, help = "Display order", allow_hyphen_values = true)]
        order: String,
    },

    #[command(about = "Edit a category; omitted fields keep their current value")]
    Edit {
        #[arg(help = "Category ID")]
        id: DocumentId,
        #[arg(long, help = "New name")]
        name: Option<String>,
        #[arg(long, help = "New display order", allow_hyphen_values = true)]
        order: Option<String>,
    },

    #[command(about = "Delete a category (products referencing it are left as they are)")]
    Delete {
        #[arg(help = "Category ID")]
        id: DocumentId,
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(
    cmd: CategoryCommands,
    http: reqwest::Client,
    api_url: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut page = CategoryPage::connect(http.clone(), api_url)?;

    match cmd {
        CategoryCommands::List => {
            page.refresh().await?;
            print_rows(&page, &output_format, None)
        }
        CategoryCommands::Show { id } => {
            let client: ResourceClient<Category> =
                ResourceClient::new(http, api_url, Collection::Categories.resource())?;
            match client.fetch(id).await? {
                Fetched::Found(category) => output_success(
                    &output_format,
                    &format!("{} (order {})", category.name, category.order),
                    Some(serde_json::to_value(&category)?),
                ),
                Fetched::Rejected(status) => {
                    output_error(&output_format, &format!("category {} not found ({})", id, status), Some("NOT_FOUND"))
                }
            }
        }
        CategoryCommands::Add { name, order } => {
            let form = page.form_mut();
            form.name = name;
            form.order = order;
            let outcome = Outcome::submitted("Category", &page.submit().await?)?;
            print_rows(&page, &output_format, Some(outcome))
        }
        CategoryCommands::Edit { id, name, order } => {
            if !page.start_edit(id).await? {
                return output_error(&output_format, &format!("category {} not found", id), Some("NOT_FOUND"));
            }
            let form = page.form_mut();
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(order) = order {
                form.order = order;
            }
            let outcome = Outcome::submitted("Category", &page.submit().await?)?;
            print_rows(&page, &output_format, Some(outcome))
        }
        CategoryCommands::Delete { id, yes } => {
            // Load the list so the prompt can name the record
            page.refresh().await?;
            if !page.delete(id, &confirmation(yes)).await? {
                return output_success(&output_format, "Delete cancelled", None);
            }
            // The refreshed list is the only truth about whether it is gone
            let outcome = if page.row(id).is_some() {
                Outcome::Failure {
                    message: format!("category {} is still listed", id),
                    code: "NOT_DELETED",
                }
            } else {
                Outcome::Success {
                    message: format!("Category {} deleted", id),
                    data: Some(json!({ "id": id })),
                }
            };
            print_rows(&page, &output_format, Some(outcome))
        }
    }
}

/// The list, preceded by a mutation's outcome when there is one
fn print_rows(page: &CategoryPage, output_format: &OutputFormat, outcome: Option<Outcome>) -> anyhow::Result<()> {
    let lines = page
        .rows()
        .iter()
        .map(|c| format!("{}  {:>5}  {}", c.id, c.order, c.name));
    match outcome {
        Some(outcome) => output_outcome(output_format, outcome, page.rows(), lines, "No categories"),
        None => output_collection(output_format, page.rows(), lines, "No categories"),
    }
}
