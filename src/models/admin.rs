use crate::service::validation::{RuleSet, Validate, ADMIN_RULES, LOGIN_RULES};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin as listed by the API. The password hash is never selected into this record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Admin {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Credentials row used only by login.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminCredentials {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminInput {
    pub username: String,
    pub password: String,
}

impl Validate for AdminInput {
    fn rules() -> &'static RuleSet {
        &ADMIN_RULES
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl Validate for LoginInput {
    fn rules() -> &'static RuleSet {
        &LOGIN_RULES
    }
}
