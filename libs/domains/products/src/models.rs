use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::ProductError;

const PRICE_NOT_A_NUMBER: &str = "Field price must be a number";

/// Product category, embedded by value into every product that uses it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Server-generated identifier, absent until first saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "65f1c2a9e4b0a1b2c3d4e5f6")]
    pub id: Option<String>,
    #[schema(example = "Electronic")]
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// Product entity as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Server-generated identifier, absent until first saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "65f1c2a9e4b0a1b2c3d4e5f7")]
    pub id: Option<String>,
    #[schema(example = "Samsung S25")]
    pub name: String,
    #[schema(example = 3200500.0)]
    pub price: f64,
    /// Generated file name of the uploaded image
    #[serde(default)]
    pub image: Option<String>,
    /// Copy of the category at the time the product was saved
    #[serde(default)]
    pub category: Option<Category>,
    /// Set by the store on first insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64, category: Option<Category>) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            image: None,
            category,
            created_at: None,
        }
    }

    /// Set `created_at` to now, at millisecond precision, when unset.
    pub fn stamp_created_at(&mut self) {
        if self.created_at.is_none() {
            self.created_at = DateTime::from_timestamp_millis(Utc::now().timestamp_millis());
        }
    }

    /// Copy name and price from `payload` where present.
    ///
    /// Image, category and timestamps are left untouched.
    pub fn apply_update(&mut self, payload: &ProductPayload) {
        if let Some(name) = &payload.name {
            self.name = name.clone();
        }
        if let Some(price) = payload.price {
            self.price = price;
        }
    }
}

/// Request body for creating or updating a product
///
/// Every field is optional so that missing values surface as field errors
/// instead of JSON rejections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(
        required(message = "must not be null"),
        length(min = 1, message = "must not be empty")
    )]
    #[schema(example = "Samsung S25")]
    pub name: Option<String>,

    #[validate(required(message = "must not be null"))]
    #[schema(example = 3200500.0)]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl ProductPayload {
    /// Decode a JSON body; a price that is not a number is a field error.
    pub fn from_json(mut value: serde_json::Value) -> Result<Self, ProductError> {
        let bad_price = value
            .get("price")
            .is_some_and(|price| !price.is_null() && !price.is_number());
        if bad_price {
            if let Some(fields) = value.as_object_mut() {
                fields.remove("price");
            }
        }

        let product: ProductPayload = serde_json::from_value(value)
            .map_err(|e| ProductError::BadRequest(format!("Invalid product: {}", e)))?;

        if bad_price {
            return Err(ProductError::ValidationFailed {
                product,
                errors: vec![PRICE_NOT_A_NUMBER.to_string()],
            });
        }
        Ok(product)
    }
}

impl TryFrom<ProductPayload> for Product {
    type Error = ProductError;

    fn try_from(payload: ProductPayload) -> Result<Self, Self::Error> {
        let name = payload
            .name
            .ok_or_else(|| ProductError::BadRequest("Field name must not be null".to_string()))?;
        let price = payload
            .price
            .ok_or_else(|| ProductError::BadRequest("Field price must not be null".to_string()))?;

        Ok(Self {
            image: payload.image,
            ..Product::new(name, price, payload.category)
        })
    }
}

/// Text fields of a multipart product form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
}

impl ProductForm {
    /// Convert to a payload; a price that is not a number is a field error.
    pub fn into_payload(self) -> Result<ProductPayload, ProductError> {
        let category = match (self.category_id, self.category_name) {
            (None, None) => None,
            (id, name) => Some(Category {
                id: id.filter(|id| !id.is_empty()),
                name: name.unwrap_or_default(),
            }),
        };

        let mut payload = ProductPayload {
            name: self.name,
            price: None,
            image: None,
            category,
        };

        if let Some(raw) = self.price {
            match raw.trim().parse::<f64>() {
                Ok(price) if price.is_finite() => payload.price = Some(price),
                _ => {
                    return Err(ProductError::ValidationFailed {
                        product: payload,
                        errors: vec![PRICE_NOT_A_NUMBER.to_string()],
                    });
                }
            }
        }

        Ok(payload)
    }
}

/// Multipart body for creating a product with an image
#[derive(ToSchema)]
pub struct ProductImageForm {
    pub name: String,
    pub price: f64,
    #[schema(rename = "category.id")]
    pub category_id: Option<String>,
    #[schema(rename = "category.name")]
    pub category_name: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Multipart body carrying only an image
#[derive(ToSchema)]
pub struct ImageForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Uploaded file taken from the `file` part of a multipart request
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: axum::body::Bytes,
}

/// Body of a successful validated create
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductEnvelope {
    pub product: Product,
}

/// Body of a failed validated create
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    /// The product as submitted
    pub product: ProductPayload,
    /// One `"Field {name} {message}"` entry per violation
    #[schema(example = json!(["Field name must not be empty"]))]
    pub errors: Vec<String>,
}
