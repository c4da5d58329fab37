//! Wire DTOs shared by the session and product endpoints.
//!
//! DESIGN
//! ======
//! User and product payloads are closed records. Anything missing a required
//! field is rejected at decode time instead of travelling deeper as an
//! untyped value.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

/// Username/password pair posted to `/login`, `/sign_up` and `/update`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account role as reported by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[serde(alias = "USER", alias = "ROLE_USER")]
    User,
    #[serde(alias = "ADMIN", alias = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Parse a role claim such as `admin`, `ADMIN` or `ROLE_ADMIN`.
    #[must_use]
    pub fn from_claim(claim: &str) -> Option<Self> {
        let claim = claim.trim();
        let lowered = claim.to_ascii_lowercase();
        let bare = lowered.strip_prefix("role_").unwrap_or(&lowered);
        match bare {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Display-only projection of the signed-in user, cached in storage.
///
/// Never consulted for authorization; only the bearer token is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub role: Role,
}

/// A product as served by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    /// Calendar release date; tolerates full timestamps on the wire.
    #[serde(default, with = "release_date")]
    pub release_date: Option<Date>,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(rename = "productAvailable", alias = "available", default)]
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
}

/// Validated product payload sent in the `product` multipart part.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub price: f64,
    pub category: String,
    #[serde(serialize_with = "release_date::serialize_required")]
    pub release_date: Date,
    pub product_available: bool,
    pub stock_quantity: u32,
}

/// Raw product form fields as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub price: String,
    pub category: String,
    pub release_date: String,
    pub stock_quantity: String,
    pub available: bool,
}

/// Reasons a product form cannot be submitted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Product name is required")]
    BlankName,
    #[error("Price must be a number")]
    InvalidPrice,
    #[error("Price cannot be negative")]
    NegativePrice,
    #[error("Stock quantity must be a whole number of zero or more")]
    InvalidStock,
    #[error("Release date must be in yyyy-MM-dd format")]
    InvalidReleaseDate,
    #[error("Please upload a PNG image")]
    UnsupportedImage,
}

impl ProductForm {
    /// Prefill the form from an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            brand: product.brand.clone(),
            price: product.price.to_string(),
            category: product.category.clone(),
            release_date: product.release_date.map(format_release_date).unwrap_or_default(),
            stock_quantity: product.stock_quantity.to_string(),
            available: product.available,
        }
    }

    /// Check every field and build the wire payload.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self, id: Option<i64>) -> Result<ProductDraft, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::BlankName);
        }
        let price: f64 = self.price.trim().parse().map_err(|_| DraftError::InvalidPrice)?;
        if !price.is_finite() {
            return Err(DraftError::InvalidPrice);
        }
        if price < 0.0 {
            return Err(DraftError::NegativePrice);
        }
        let stock_quantity: u32 = self
            .stock_quantity
            .trim()
            .parse()
            .map_err(|_| DraftError::InvalidStock)?;
        let release_date = parse_release_date(&self.release_date).map_err(|_| DraftError::InvalidReleaseDate)?;
        Ok(ProductDraft {
            id,
            name: name.to_owned(),
            description: self.description.trim().to_owned(),
            brand: self.brand.trim().to_owned(),
            price,
            category: self.category.trim().to_owned(),
            release_date,
            product_available: self.available,
            stock_quantity,
        })
    }
}

/// An image file selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The only image type the backend stores.
pub const PNG_CONTENT_TYPE: &str = "image/png";

impl ImageUpload {
    /// Accept a selected file if it is a PNG.
    ///
    /// # Errors
    ///
    /// Returns `DraftError::UnsupportedImage` for any other content type.
    pub fn new(file_name: impl Into<String>, content_type: &str, bytes: Vec<u8>) -> Result<Self, DraftError> {
        if !content_type.eq_ignore_ascii_case(PNG_CONTENT_TYPE) {
            return Err(DraftError::UnsupportedImage);
        }
        Ok(Self { file_name: file_name.into(), content_type: PNG_CONTENT_TYPE.to_owned(), bytes })
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Parse a `yyyy-MM-dd` date, ignoring any time suffix.
///
/// # Errors
///
/// Returns the parse error when the leading ten characters are not a date.
pub fn parse_release_date(text: &str) -> Result<Date, time::error::Parse> {
    let text = text.trim();
    let head = text.get(..10).unwrap_or(text);
    Date::parse(head, release_date::FORMAT)
}

/// Format a date as `yyyy-MM-dd`.
#[must_use]
pub fn format_release_date(date: Date) -> String {
    date.format(release_date::FORMAT).unwrap_or_default()
}

mod release_date {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;

    pub(super) const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    #[allow(clippy::ref_option)]
    pub(super) fn serialize<S: Serializer>(value: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serialize_required(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn serialize_required<S: Serializer>(value: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = value.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => super::parse_release_date(text).map(Some).map_err(D::Error::custom),
        }
    }
}
