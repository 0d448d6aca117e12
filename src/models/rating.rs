use crate::service::validation::{RuleSet, Validate, RATING_RULES};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Rating {
    pub id: i32,
    pub product_id: i32,
    pub star: i32,
    pub review_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RatingInput {
    pub star: i32,
    #[serde(default)]
    pub review_text: Option<String>,
}

impl Validate for RatingInput {
    fn rules() -> &'static RuleSet {
        &RATING_RULES
    }
}

/// Product statistics after a rating insert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, sqlx::FromRow)]
pub struct RatingStats {
    pub avg_rating: f64,
    pub total_raters: i32,
}
