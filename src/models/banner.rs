use crate::service::validation::{RuleSet, Validate, BANNER_RULES};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Banner {
    pub id: i32,
    pub title: Option<String>,
    pub banner_image_url: Option<String>,
    pub redirect_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create and update payload. Missing `active` means active.
#[derive(Debug, Deserialize)]
pub struct BannerInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub banner_image_url: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl Validate for BannerInput {
    fn rules() -> &'static RuleSet {
        &BANNER_RULES
    }
}
