use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateProductRequest {
    pub(crate) title: String,
    pub(crate) price: f64,
    pub(crate) photo: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) user_id: i64,
}

impl CreateProductRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_positive_i64("user_id", self.user_id)?;
        Ok(Self {
            title: normalize_title(&self.title)?,
            price: validate_price(self.price)?,
            photo: self.photo,
            description: self.description,
            user_id: self.user_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdateProductRequest {
    pub(crate) title: String,
    pub(crate) price: f64,
    pub(crate) photo: Option<String>,
    pub(crate) description: Option<String>,
}

impl UpdateProductRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            price: validate_price(self.price)?,
            photo: self.photo,
            description: self.description,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Product {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) price: f64,
    pub(crate) photo: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<f64, DomainError> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::Validation {
            field: "price",
            message: "must be >= 0",
        });
    }
    Ok(price)
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.len() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}
