mod common;

use std::cell::RefCell;

use anyhow::Result;
use catalog_admin::client::{CategoryForm, CategoryPage, FormMode, Submitted};
use catalog_admin::types::DocumentId;

use common::spawn_server;

async fn connected_page() -> Result<(common::TestServer, CategoryPage)> {
    let server = spawn_server().await?;
    let mut page = CategoryPage::connect(reqwest::Client::new(), &server.base_url)?;
    page.refresh().await?;
    Ok((server, page))
}

async fn add(page: &mut CategoryPage, name: &str, order: &str) -> Result<DocumentId> {
    *page.form_mut() = CategoryForm {
        name: name.into(),
        order: order.into(),
    };
    match page.submit().await? {
        Submitted::Created(category) => Ok(category.id),
        other => anyhow::bail!("expected a created category, got {:?}", other),
    }
}

#[tokio::test]
async fn add_resets_form_and_refetches() -> Result<()> {
    let (_server, mut page) = connected_page().await?;
    assert!(page.rows().is_empty());

    let id = add(&mut page, "Drinks", "1").await?;

    assert_eq!(page.form(), &CategoryForm::default());
    assert_eq!(page.mode(), FormMode::Create);
    assert_eq!(page.rows().len(), 1);
    let row = page.row(id).expect("created row listed");
    assert_eq!(row.name, "Drinks");
    assert_eq!(row.order, 1);
    Ok(())
}

#[tokio::test]
async fn edit_flow_updates_and_returns_to_create() -> Result<()> {
    let (_server, mut page) = connected_page().await?;
    let id = add(&mut page, "Drinks", "1").await?;

    assert!(page.start_edit(id).await?);
    assert_eq!(page.mode(), FormMode::Edit { id });
    assert_eq!(page.submit_label(), "Update");
    assert_eq!(
        page.form(),
        &CategoryForm {
            name: "Drinks".into(),
            order: "1".into()
        }
    );

    page.form_mut().order = "2".into();
    let outcome = page.submit().await?;
    assert!(matches!(outcome, Submitted::Updated(ref c) if c.order == 2), "got {:?}", outcome);

    assert_eq!(page.mode(), FormMode::Create);
    assert_eq!(page.submit_label(), "Add");
    assert_eq!(page.rows().len(), 1);
    assert_eq!(page.row(id).map(|c| c.order), Some(2));
    Ok(())
}

#[tokio::test]
async fn edit_of_missing_record_changes_nothing() -> Result<()> {
    let (_server, mut page) = connected_page().await?;
    page.form_mut().name = "half typed".into();

    assert!(!page.start_edit(DocumentId::generate()).await?);
    assert_eq!(page.mode(), FormMode::Create);
    assert_eq!(page.form().name, "half typed");
    Ok(())
}

#[tokio::test]
async fn cancel_leaves_the_record_alone() -> Result<()> {
    let (_server, mut page) = connected_page().await?;
    let id = add(&mut page, "Drinks", "1").await?;

    assert!(page.start_edit(id).await?);
    page.form_mut().name = "Beverages".into();
    page.cancel_edit();

    assert_eq!(page.mode(), FormMode::Create);
    assert_eq!(page.form(), &CategoryForm::default());
    page.refresh().await?;
    assert_eq!(page.row(id).map(|c| c.name.as_str()), Some("Drinks"));
    Ok(())
}

#[tokio::test]
async fn update_of_vanished_record_is_absorbed() -> Result<()> {
    let server = spawn_server().await?;
    let mut page = CategoryPage::connect(reqwest::Client::new(), &server.base_url)?;
    let mut other = CategoryPage::connect(reqwest::Client::new(), &server.base_url)?;
    page.refresh().await?;

    let id = add(&mut page, "Drinks", "1").await?;
    assert!(page.start_edit(id).await?);

    // Someone else deletes it while the form is open
    other.refresh().await?;
    assert!(other.delete(id, &|_: &str| true).await?);

    page.form_mut().order = "5".into();
    let outcome = page.submit().await?;
    assert!(matches!(outcome, Submitted::Rejected(status) if status.as_u16() == 404));
    assert_eq!(page.mode(), FormMode::Create);
    assert!(page.rows().is_empty());
    Ok(())
}

#[tokio::test]
async fn delete_prompts_with_the_name() -> Result<()> {
    let (_server, mut page) = connected_page().await?;
    let id = add(&mut page, "Drinks", "1").await?;
    let prompts = RefCell::new(Vec::new());

    let decline = |prompt: &str| {
        prompts.borrow_mut().push(prompt.to_string());
        false
    };
    assert!(!page.delete(id, &decline).await?);
    assert!(page.row(id).is_some());

    let accept = |prompt: &str| {
        prompts.borrow_mut().push(prompt.to_string());
        true
    };
    assert!(page.delete(id, &accept).await?);
    assert!(page.rows().is_empty());

    assert_eq!(
        *prompts.borrow(),
        vec![
            "Are you sure to delete [Drinks]".to_string(),
            "Are you sure to delete [Drinks]".to_string(),
        ]
    );

    // A second confirmed delete still refetches without failing
    assert!(page.delete(id, &accept).await?);
    assert!(page.rows().is_empty());
    Ok(())
}
