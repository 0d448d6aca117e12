use crate::service::validation::{RuleSet, Validate, PHOTO_RULES, PRODUCT_RULES, VARIANT_RULES};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product with the names of its brand and category (null when unset or deleted).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub brand_id: Option<i32>,
    pub category_id: Option<i32>,
    pub total_sold: i32,
    pub avg_rating: f64,
    pub total_raters: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub brand_name: Option<String>,
    pub category_name: Option<String>,
}

/// Product as returned by get-by-id: the row plus its variants and photos.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub variants: Vec<Variant>,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand_id: Option<i32>,
    #[serde(default)]
    pub category_id: Option<i32>,
}

impl Validate for ProductInput {
    fn rules() -> &'static RuleSet {
        &PRODUCT_RULES
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Variant {
    pub id: i32,
    pub product_id: i32,
    pub variant_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct VariantInput {
    pub variant_name: String,
    /// Kept as the JSON number so the two-decimal text form survives until conversion.
    pub price: serde_json::Number,
}

impl VariantInput {
    pub fn price(&self) -> Option<Decimal> {
        self.price.to_string().parse::<Decimal>().ok().map(|d| d.round_dp(2))
    }
}

impl Validate for VariantInput {
    fn rules() -> &'static RuleSet {
        &VARIANT_RULES
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Photo {
    pub id: i32,
    pub product_id: i32,
    pub photo_url: String,
}

#[derive(Debug, Deserialize)]
pub struct PhotoInput {
    pub photo_url: String,
}

impl Validate for PhotoInput {
    fn rules() -> &'static RuleSet {
        &PHOTO_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn variant_price_keeps_cents() {
        let input: VariantInput = serde_json::from_value(json!({"variant_name": "S", "price": 19.99})).unwrap();
        assert_eq!(input.price(), Some(Decimal::new(1999, 2)));

        let input: VariantInput = serde_json::from_value(json!({"variant_name": "S", "price": 5})).unwrap();
        assert_eq!(input.price(), Some(Decimal::new(5, 0)));
    }

    #[test]
    fn variant_serializes_price_as_number() {
        let v = Variant {
            id: 1,
            product_id: 2,
            variant_name: "Large".into(),
            price: Decimal::new(1250, 2),
        };
        let out = serde_json::to_value(&v).unwrap();
        assert_eq!(out["price"], json!(12.5));
    }
}
