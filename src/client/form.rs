use rust_decimal::Decimal;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

use crate::database::models::{Category, CategoryRef, NewCategory, NewProduct, Product};
use crate::types::DocumentId;

/// Client-side field checks, run before anything goes over the wire
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("category '{0}' is not a valid id")]
    InvalidReference(String),
}

/// Numbers live in form state as text; unset becomes the empty string
pub fn number_text<N: Display>(value: Option<N>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

/// Empty text is unset; anything else must parse
pub fn parse_optional_integer(field: &'static str, text: &str) -> Result<Option<i64>, FormError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse().map(Some).map_err(|_| FormError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}

pub fn parse_optional_decimal(field: &'static str, text: &str) -> Result<Option<Decimal>, FormError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(text)
        .map(|d| Some(d.normalize()))
        .map_err(|_| FormError::InvalidNumber {
            field,
            value: text.to_string(),
        })
}

fn required(field: &'static str, text: &str) -> Result<String, FormError> {
    if text.trim().is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(text.to_string())
}

/// Category create/edit form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub order: String,
}

impl CategoryForm {
    pub fn from_record(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            order: number_text(Some(category.order)),
        }
    }

    pub fn to_draft(&self) -> Result<NewCategory, FormError> {
        let name = required("name", &self.name)?;
        let order = parse_optional_integer("order", &self.order)?.ok_or(FormError::Required("order"))?;
        Ok(NewCategory { name, order })
    }
}

/// Product create/edit form state. `category` holds a bare id even when the
/// record it was loaded from carried the expanded category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
}

impl ProductForm {
    pub fn from_record(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: number_text(product.price),
            // A category that no longer exists leaves the picker blank
            category: product.category.id().map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    pub fn to_draft(&self) -> Result<NewProduct, FormError> {
        let code = required("code", &self.code)?;
        let name = required("name", &self.name)?;
        let description = required("description", &self.description)?;
        let price = parse_optional_decimal("price", &self.price)?;
        if price.is_some_and(|p| p.is_sign_negative() && !p.is_zero()) {
            return Err(FormError::Negative("price"));
        }
        let category = required("category", &self.category)?;
        let category: DocumentId = category
            .parse()
            .map_err(|_| FormError::InvalidReference(category.clone()))?;

        Ok(NewProduct {
            code,
            name,
            description,
            price,
            category: CategoryRef::Id(category),
        })
    }
}
