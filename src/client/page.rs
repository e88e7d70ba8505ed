use reqwest::StatusCode;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, warn};

use super::form::{CategoryForm, FormError, ProductForm};
use super::http::{Fetched, ResourceClient};
use super::ClientError;
use crate::database::models::{Category, Document, NewCategory, NewProduct, Product};
use crate::types::DocumentId;

/// A document type that can be listed and edited through a [`Page`]
pub trait Editable: Document + Clone {
    type Form: Clone + Default + PartialEq + Debug + Send;
    type Draft: Serialize + Send + Sync;

    /// Shown in the delete confirmation prompt
    fn label(&self) -> &str;

    fn to_form(&self) -> Self::Form;

    fn draft(form: &Self::Form) -> Result<Self::Draft, FormError>;

    /// The full record sent on update
    fn with_id(id: DocumentId, draft: Self::Draft) -> Self;
}

impl Editable for Category {
    type Form = CategoryForm;
    type Draft = NewCategory;

    fn label(&self) -> &str {
        &self.name
    }

    fn to_form(&self) -> CategoryForm {
        CategoryForm::from_record(self)
    }

    fn draft(form: &CategoryForm) -> Result<NewCategory, FormError> {
        form.to_draft()
    }

    fn with_id(id: DocumentId, draft: NewCategory) -> Self {
        Category::from_new(id, draft)
    }
}

impl Editable for Product {
    type Form = ProductForm;
    type Draft = NewProduct;

    fn label(&self) -> &str {
        &self.name
    }

    fn to_form(&self) -> ProductForm {
        ProductForm::from_record(self)
    }

    fn draft(form: &ProductForm) -> Result<NewProduct, FormError> {
        form.to_draft()
    }

    fn with_id(id: DocumentId, draft: NewProduct) -> Self {
        Product::from_new(id, draft)
    }
}

/// Which record, if any, the shared form is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit { id: DocumentId },
}

/// Asks the user before a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What the server made of a form submission
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted<T> {
    Created(T),
    Updated(T),
    /// Non-success status; absorbed, the page still resets and refreshes
    Rejected(StatusCode),
}

/// List mirror plus a single create/edit form for one resource.
///
/// The list is never patched locally: every mutation is followed by a full
/// refetch, so after each action the rows match the server as of that fetch.
pub struct Page<E: Editable> {
    client: ResourceClient<E>,
    rows: Vec<E>,
    form: E::Form,
    defaults: E::Form,
    mode: FormMode,
}

pub type CategoryPage = Page<Category>;

impl<E: Editable> Page<E> {
    pub fn new(client: ResourceClient<E>) -> Self {
        Self {
            client,
            rows: Vec::new(),
            form: E::Form::default(),
            defaults: E::Form::default(),
            mode: FormMode::Create,
        }
    }

    pub fn connect(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let client = ResourceClient::new(http, base_url, E::COLLECTION.resource())?;
        Ok(Self::new(client))
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    pub fn row(&self, id: DocumentId) -> Option<&E> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn form(&self) -> &E::Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut E::Form {
        &mut self.form
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add",
            FormMode::Edit { .. } => "Update",
        }
    }

    /// Values the form resets to after a submission or cancel
    pub fn set_form_defaults(&mut self, defaults: E::Form) {
        self.defaults = defaults;
    }

    /// Replace the rows with the server's current list
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.rows = self.client.list().await?;
        debug!("{} list refreshed: {} rows", self.client.resource(), self.rows.len());
        Ok(())
    }

    /// Load one record into the form. Any non-success answer leaves the page
    /// as it was and returns `false`.
    pub async fn start_edit(&mut self, id: DocumentId) -> Result<bool, ClientError> {
        match self.client.fetch(id).await? {
            Fetched::Found(record) => {
                self.form = record.to_form();
                self.mode = FormMode::Edit { id };
                Ok(true)
            }
            Fetched::Rejected(status) => {
                debug!("edit of {} {} ignored: {}", self.client.resource(), id, status);
                Ok(false)
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    fn reset_form(&mut self) {
        self.form = self.defaults.clone();
        self.mode = FormMode::Create;
    }

    /// Create or update from the current form, then reset and refetch.
    ///
    /// Field checks fail before any request and leave the form untouched.
    pub async fn submit(&mut self) -> Result<Submitted<E>, ClientError> {
        let draft = E::draft(&self.form)?;

        let outcome = match self.mode {
            FormMode::Create => match self.client.create(&draft).await? {
                Fetched::Found(created) => Submitted::Created(created),
                Fetched::Rejected(status) => Submitted::Rejected(status),
            },
            FormMode::Edit { id } => {
                let replacement = E::with_id(id, draft);
                match self.client.replace(&replacement).await? {
                    Fetched::Found(updated) => Submitted::Updated(updated),
                    Fetched::Rejected(status) => Submitted::Rejected(status),
                }
            }
        };
        if let Submitted::Rejected(status) = &outcome {
            warn!("{} submission rejected: {}", self.client.resource(), status);
        }

        self.reset_form();
        self.refresh().await?;
        Ok(outcome)
    }

    /// Delete after confirmation, then refetch whether or not the record was
    /// still there. Returns `false` when the user declined.
    pub async fn delete(&mut self, id: DocumentId, confirm: &dyn Confirm) -> Result<bool, ClientError> {
        let label = self
            .row(id)
            .map(|row| row.label().to_string())
            .unwrap_or_else(|| id.to_string());
        if !confirm.confirm(&format!("Are you sure to delete [{}]", label)) {
            return Ok(false);
        }

        if let Fetched::Rejected(status) = self.client.delete(id).await? {
            warn!("delete of {} {} rejected: {}", self.client.resource(), id, status);
        }
        self.refresh().await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_page() -> CategoryPage {
        // Nothing listens on port 9; only offline operations are exercised here
        Page::connect(reqwest::Client::new(), "http://127.0.0.1:9").unwrap()
    }

    #[test]
    fn starts_in_create_mode_with_blank_form() {
        let page = offline_page();
        assert_eq!(page.mode(), FormMode::Create);
        assert_eq!(page.form(), &CategoryForm::default());
        assert_eq!(page.submit_label(), "Add");
        assert!(page.rows().is_empty());
    }

    #[tokio::test]
    async fn invalid_form_fails_before_any_request() {
        let mut page = offline_page();
        page.form_mut().name = "Drinks".into();
        let err = page.submit().await.unwrap_err();
        assert!(matches!(err, ClientError::Form(FormError::Required("order"))));
        // Form untouched
        assert_eq!(page.form().name, "Drinks");
        assert_eq!(page.mode(), FormMode::Create);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let mut page = offline_page();
        let prompts = std::cell::RefCell::new(Vec::new());
        let decline = |prompt: &str| {
            prompts.borrow_mut().push(prompt.to_string());
            false
        };
        let id = DocumentId::generate();
        assert!(!page.delete(id, &decline).await.unwrap());
        assert_eq!(*prompts.borrow(), vec![format!("Are you sure to delete [{}]", id)]);
    }

    #[test]
    fn cancel_restores_defaults() {
        let mut page = offline_page();
        page.set_form_defaults(CategoryForm { name: String::new(), order: "0".into() });
        page.form_mut().name = "half typed".into();
        page.cancel_edit();
        assert_eq!(page.form(), &CategoryForm { name: String::new(), order: "0".into() });
    }
}
