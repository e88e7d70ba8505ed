use futures::future::try_join;
use rust_decimal::Decimal;

use super::form::ProductForm;
use super::http::ResourceClient;
use super::page::{Confirm, FormMode, Page, Submitted};
use super::ClientError;
use crate::database::models::{Category, Product};
use crate::types::{Collection, DocumentId};

/// One rendered line of the product list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: DocumentId,
    pub code: String,
    pub name: String,
    /// Empty when the category is unknown to the page
    pub category_name: String,
    pub price: String,
}

/// Product page: a [`Page`] over products plus the category list that feeds
/// the category picker and the blank form's default category.
pub struct ProductPage {
    page: Page<Product>,
    category_client: ResourceClient<Category>,
    categories: Vec<Category>,
}

impl ProductPage {
    pub fn connect(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let category_client = ResourceClient::new(http.clone(), base_url, Collection::Categories.resource())?;
        Ok(Self {
            page: Page::connect(http, base_url)?,
            category_client,
            categories: Vec::new(),
        })
    }

    /// Initial load: categories and products are fetched concurrently
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let (categories, ()) = try_join(self.category_client.list(), self.page.refresh()).await?;
        self.apply_categories(categories);
        Ok(())
    }

    pub async fn load_categories(&mut self) -> Result<(), ClientError> {
        let categories = self.category_client.list().await?;
        self.apply_categories(categories);
        Ok(())
    }

    fn apply_categories(&mut self, categories: Vec<Category>) {
        if let Some(first) = categories.first() {
            let first = first.id.to_string();
            self.page.set_form_defaults(ProductForm {
                category: first.clone(),
                ..ProductForm::default()
            });
            if self.page.mode() == FormMode::Create && self.page.form().category.is_empty() {
                self.page.form_mut().category = first;
            }
        }
        self.categories = categories;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn rows(&self) -> &[Product] {
        self.page.rows()
    }

    /// List rows with category names resolved against the loaded categories
    pub fn display_rows(&self) -> Vec<ProductRow> {
        self.page
            .rows()
            .iter()
            .map(|product| {
                let category_name = match product.category.expanded() {
                    Some(category) => category.name.clone(),
                    None => self
                        .categories
                        .iter()
                        .find(|c| Some(c.id) == product.category.id())
                        .map(|c| c.name.clone())
                        .unwrap_or_default(),
                };
                ProductRow {
                    id: product.id,
                    code: product.code.clone(),
                    name: product.name.clone(),
                    category_name,
                    price: format_price(product.price),
                }
            })
            .collect()
    }

    pub fn form(&self) -> &ProductForm {
        self.page.form()
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        self.page.form_mut()
    }

    pub fn mode(&self) -> FormMode {
        self.page.mode()
    }

    pub fn submit_label(&self) -> &'static str {
        self.page.submit_label()
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.page.refresh().await
    }

    pub async fn start_edit(&mut self, id: DocumentId) -> Result<bool, ClientError> {
        self.page.start_edit(id).await
    }

    pub fn cancel_edit(&mut self) {
        self.page.cancel_edit()
    }

    pub async fn submit(&mut self) -> Result<Submitted<Product>, ClientError> {
        self.page.submit().await
    }

    pub async fn delete(&mut self, id: DocumentId, confirm: &dyn Confirm) -> Result<bool, ClientError> {
        self.page.delete(id, confirm).await
    }
}

/// `-` when unset, otherwise baht sign plus grouped digits (at most three
/// fraction digits)
pub fn format_price(price: Option<Decimal>) -> String {
    let Some(price) = price else {
        return "-".to_string();
    };
    let text = price.round_dp(3).normalize().abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price.is_sign_negative() && !price.is_zero() { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("฿{}{}.{}", sign, grouped, fraction),
        None => format!("฿{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Option<Decimal> {
        Some(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn formats_prices() {
        assert_eq!(format_price(None), "-");
        assert_eq!(format_price(d("0")), "฿0");
        assert_eq!(format_price(d("1.5")), "฿1.5");
        assert_eq!(format_price(d("19.990")), "฿19.99");
        assert_eq!(format_price(d("1234567.891")), "฿1,234,567.891");
        assert_eq!(format_price(d("999")), "฿999");
        assert_eq!(format_price(d("1000")), "฿1,000");
        assert_eq!(format_price(d("2.00049")), "฿2");
    }
}
