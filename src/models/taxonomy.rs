//! Brands and categories: named groupings that products reference.
//!
//! Both tables have the same shape (unique name, optional photo) and the same
//! delete guard, so they share one service parameterized by [`Taxonomy`].

use crate::service::validation::{RuleSet, Validate, BRAND_RULES, CATEGORY_RULES};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;

pub trait Taxonomy: for<'r> sqlx::FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static {
    type Input: Validate + Into<NamedInput> + Send;

    const TABLE: &'static str;
    const PHOTO_COLUMN: &'static str;
    /// Column in `products` referencing this table.
    const PRODUCT_COLUMN: &'static str;
    /// Capitalized entity name used in messages ("Brand").
    const LABEL: &'static str;
}

/// Normalized create/update payload shared by brands and categories.
#[derive(Debug, Clone)]
pub struct NamedInput {
    pub name: String,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Brand {
    pub id: i32,
    pub name: String,
    pub brand_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct BrandInput {
    pub name: String,
    #[serde(default)]
    pub brand_photo: Option<String>,
}

impl Validate for BrandInput {
    fn rules() -> &'static RuleSet {
        &BRAND_RULES
    }
}

impl From<BrandInput> for NamedInput {
    fn from(input: BrandInput) -> Self {
        NamedInput {
            name: input.name,
            photo: input.brand_photo.filter(|p| !p.is_empty()),
        }
    }
}

impl Taxonomy for Brand {
    type Input = BrandInput;

    const TABLE: &'static str = "brands";
    const PHOTO_COLUMN: &'static str = "brand_photo";
    const PRODUCT_COLUMN: &'static str = "brand_id";
    const LABEL: &'static str = "Brand";
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub category_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub category_photo: Option<String>,
}

impl Validate for CategoryInput {
    fn rules() -> &'static RuleSet {
        &CATEGORY_RULES
    }
}

impl From<CategoryInput> for NamedInput {
    fn from(input: CategoryInput) -> Self {
        NamedInput {
            name: input.name,
            photo: input.category_photo.filter(|p| !p.is_empty()),
        }
    }
}

impl Taxonomy for Category {
    type Input = CategoryInput;

    const TABLE: &'static str = "categories";
    const PHOTO_COLUMN: &'static str = "category_photo";
    const PRODUCT_COLUMN: &'static str = "category_id";
    const LABEL: &'static str = "Category";
}
