//! Declarative request validation: per-field rules evaluated over the raw JSON body.
//!
//! Every failing check of every field is reported; nothing stops at the first failure.

use crate::error::FieldViolation;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:https?|ftp)://[A-Za-z0-9](?:[A-Za-z0-9.-]*[A-Za-z0-9])?(?::\d{1,5})?(?:[/?#]\S*)?$")
        .expect("static url pattern")
});
static IMAGE_EXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp)$").expect("static image pattern"));
static PRICE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("static price pattern"));

#[derive(Debug)]
pub enum Check {
    /// String length in characters, inclusive bounds.
    Length { min: usize, max: usize },
    Pattern(Regex),
    /// JSON integer within inclusive bounds.
    Int { min: i64, max: i64 },
    /// Finite JSON number within inclusive bounds.
    Number { min: f64, max: f64 },
    /// JSON number written with at most two decimal places.
    Price,
    Url,
    ImageUrl,
    Boolean,
}

impl Check {
    fn passes(&self, value: Option<&Value>) -> bool {
        match self {
            Check::Length { min, max } => {
                let n = match value {
                    None | Some(Value::Null) => 0,
                    Some(Value::String(s)) => s.chars().count(),
                    Some(_) => return false,
                };
                n >= *min && n <= *max
            }
            Check::Pattern(re) => as_str(value).map(|s| re.is_match(s)).unwrap_or(false),
            Check::Int { min, max } => value
                .and_then(Value::as_i64)
                .map(|n| n >= *min && n <= *max)
                .unwrap_or(false),
            Check::Number { min, max } => value
                .and_then(Value::as_f64)
                .map(|n| n.is_finite() && n >= *min && n <= *max)
                .unwrap_or(false),
            Check::Price => match value {
                Some(Value::Number(n)) => PRICE_RE.is_match(&n.to_string()),
                _ => false,
            },
            Check::Url => as_str(value).map(|s| URL_RE.is_match(s)).unwrap_or(false),
            Check::ImageUrl => as_str(value).map(|s| IMAGE_EXT_RE.is_match(s)).unwrap_or(false),
            Check::Boolean => matches!(value, Some(Value::Bool(_))),
        }
    }
}

fn as_str(value: Option<&Value>) -> Option<&str> {
    match value {
        None | Some(Value::Null) => Some(""),
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => None,
    }
}

#[derive(Debug)]
pub struct FieldRule {
    field: &'static str,
    optional: bool,
    trim: bool,
    checks: Vec<(Check, &'static str)>,
}

impl FieldRule {
    pub fn required(field: &'static str) -> Self {
        FieldRule {
            field,
            optional: false,
            trim: false,
            checks: Vec::new(),
        }
    }

    /// Skipped entirely when the field is missing or null.
    pub fn optional(field: &'static str) -> Self {
        FieldRule {
            optional: true,
            ..Self::required(field)
        }
    }

    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn check(mut self, check: Check, message: &'static str) -> Self {
        self.checks.push((check, message));
        self
    }

    pub fn length(self, min: usize, max: usize, message: &'static str) -> Self {
        self.check(Check::Length { min, max }, message)
    }

    pub fn matches(self, pattern: &str, message: &'static str) -> Self {
        // Patterns are compile-time literals in this module.
        let re = Regex::new(pattern).expect("static field pattern");
        self.check(Check::Pattern(re), message)
    }

    pub fn int(self, min: i64, max: i64, message: &'static str) -> Self {
        self.check(Check::Int { min, max }, message)
    }

    pub fn url(self, message: &'static str) -> Self {
        self.check(Check::Url, message)
    }
}

#[derive(Debug)]
pub struct RuleSet {
    fields: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(fields: Vec<FieldRule>) -> Self {
        RuleSet { fields }
    }

    /// Trim the fields marked for trimming, then run every check. Returns all violations.
    pub fn apply(&self, body: &mut Map<String, Value>) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        for rule in &self.fields {
            if rule.trim {
                if let Some(Value::String(s)) = body.get_mut(rule.field) {
                    let trimmed = s.trim();
                    if trimmed.len() != s.len() {
                        *s = trimmed.to_string();
                    }
                }
            }
            let value = body.get(rule.field);
            if rule.optional && matches!(value, None | Some(Value::Null)) {
                continue;
            }
            for (check, message) in &rule.checks {
                if !check.passes(value) {
                    violations.push(FieldViolation {
                        field: rule.field.to_string(),
                        location: "body",
                        message: (*message).to_string(),
                        value: value.cloned(),
                    });
                }
            }
        }
        violations
    }
}

/// A request record with a rule set checked against the raw body before deserializing.
pub trait Validate: serde::de::DeserializeOwned {
    fn rules() -> &'static RuleSet;
}

const NAME_PATTERN: &str = r"^[a-zA-Z0-9\s\-&.]+$";

pub static ADMIN_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        FieldRule::required("username")
            .trim()
            .length(3, 50, "Username must be between 3 and 50 characters")
            .matches(r"^[a-zA-Z0-9_]+$", "Username can only contain letters, numbers, and underscores"),
        FieldRule::required("password").length(8, 1024, "Password must be at least 8 characters"),
    ])
});

pub static LOGIN_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        FieldRule::required("username")
            .trim()
            .length(1, usize::MAX, "Username and password are required"),
        FieldRule::required("password").length(8, 1024, "Password must be at least 8 characters"),
    ])
});

pub static BRAND_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        FieldRule::required("name")
            .trim()
            .length(1, 100, "Brand name must be between 1 and 100 characters")
            .matches(NAME_PATTERN, "Brand name contains invalid characters"),
        FieldRule::optional("brand_photo").url("Brand photo must be a valid URL"),
    ])
});

pub static CATEGORY_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        FieldRule::required("name")
            .trim()
            .length(1, 100, "Category name must be between 1 and 100 characters")
            .matches(NAME_PATTERN, "Category name contains invalid characters"),
        FieldRule::optional("category_photo").url("Category photo must be a valid URL"),
    ])
});

pub static PRODUCT_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        FieldRule::required("name")
            .trim()
            .length(1, 255, "Product name must be between 1 and 255 characters"),
        FieldRule::optional("description")
            .trim()
            .length(0, 5000, "Description must not exceed 5000 characters"),
        FieldRule::optional("brand_id").int(1, i32::MAX as i64, "Brand ID must be a positive integer"),
        FieldRule::optional("category_id").int(1, i32::MAX as i64, "Category ID must be a positive integer"),
    ])
});

/// Largest value a `NUMERIC(12, 2)` price column holds.
const MAX_PRICE: f64 = 9_999_999_999.99;

pub static VARIANT_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        FieldRule::required("variant_name")
            .trim()
            .length(1, 100, "Variant name must be between 1 and 100 characters"),
        FieldRule::required("price")
            .check(Check::Number { min: 0.0, max: f64::MAX }, "Price must be a positive number")
            .check(
                Check::Number { min: f64::MIN, max: MAX_PRICE },
                "Price must not exceed 9999999999.99",
            )
            .check(Check::Price, "Price must have at most 2 decimal places"),
    ])
});

pub static PHOTO_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![FieldRule::required("photo_url")
        .url("Photo URL must be a valid URL")
        .check(
            Check::ImageUrl,
            "Photo URL must point to a valid image file (jpg, jpeg, png, gif, webp)",
        )])
});

pub static RATING_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        FieldRule::required("star").int(1, 5, "Star rating must be an integer between 1 and 5"),
        FieldRule::optional("review_text")
            .trim()
            .length(0, 2000, "Review text must not exceed 2000 characters"),
    ])
});

pub static BANNER_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        FieldRule::optional("title")
            .trim()
            .length(0, 255, "Title must not exceed 255 characters"),
        FieldRule::optional("banner_image_url").url("Banner image URL must be a valid URL"),
        FieldRule::optional("redirect_url").url("Redirect URL must be a valid URL"),
        FieldRule::optional("active").check(Check::Boolean, "Active must be a boolean value"),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(rules: &RuleSet, body: Value) -> (Map<String, Value>, Vec<FieldViolation>) {
        let mut map = match body {
            Value::Object(m) => m,
            _ => panic!("test body must be an object"),
        };
        let violations = rules.apply(&mut map);
        (map, violations)
    }

    fn messages(v: &[FieldViolation]) -> Vec<&str> {
        v.iter().map(|v| v.message.as_str()).collect()
    }

    #[test]
    fn valid_brand_passes_and_is_trimmed() {
        let (body, v) = run(&BRAND_RULES, json!({"name": "  Acme & Sons.  ", "brand_photo": "https://cdn.example.com/a.png"}));
        assert!(v.is_empty(), "{:?}", v);
        assert_eq!(body["name"], "Acme & Sons.");
    }

    #[test]
    fn all_brand_violations_are_reported_together() {
        let (_, v) = run(&BRAND_RULES, json!({"name": "   ", "brand_photo": "not a url"}));
        assert_eq!(
            messages(&v),
            vec![
                "Brand name must be between 1 and 100 characters",
                "Brand name contains invalid characters",
                "Brand photo must be a valid URL",
            ]
        );
    }

    #[test]
    fn missing_required_field_is_reported() {
        let (_, v) = run(&CATEGORY_RULES, json!({}));
        assert_eq!(v.len(), 2);
        assert!(v.iter().all(|v| v.field == "name" && v.value.is_none()));
    }

    #[test]
    fn optional_fields_skip_null() {
        let (_, v) = run(&BANNER_RULES, json!({"title": null, "redirect_url": null}));
        assert!(v.is_empty());
    }

    #[test]
    fn star_must_be_integer_in_range() {
        for ok in [1, 3, 5] {
            let (_, v) = run(&RATING_RULES, json!({ "star": ok }));
            assert!(v.is_empty(), "star {} should pass", ok);
        }
        for bad in [json!(0), json!(6), json!(4.5), json!("5"), json!(null)] {
            let (_, v) = run(&RATING_RULES, json!({ "star": bad }));
            assert_eq!(messages(&v), vec!["Star rating must be an integer between 1 and 5"]);
        }
    }

    #[test]
    fn price_allows_two_decimals_only() {
        let (_, v) = run(&VARIANT_RULES, json!({"variant_name": "Large", "price": 19.99}));
        assert!(v.is_empty());
        let (_, v) = run(&VARIANT_RULES, json!({"variant_name": "Large", "price": 20}));
        assert!(v.is_empty());
        let (_, v) = run(&VARIANT_RULES, json!({"variant_name": "Large", "price": 1.005}));
        assert_eq!(messages(&v), vec!["Price must have at most 2 decimal places"]);
        let (_, v) = run(&VARIANT_RULES, json!({"variant_name": "Large", "price": -1}));
        assert_eq!(v.len(), 2);
        let (_, v) = run(&VARIANT_RULES, json!({"variant_name": "Large", "price": 9999999999.99}));
        assert!(v.is_empty());
        for price in [json!(1e10), json!(12345678901u64)] {
            let (_, v) = run(&VARIANT_RULES, json!({"variant_name": "Large", "price": price}));
            assert_eq!(messages(&v), vec!["Price must not exceed 9999999999.99"]);
        }
    }

    #[test]
    fn photo_url_needs_image_extension() {
        let (_, v) = run(&PHOTO_RULES, json!({"photo_url": "https://img.example.com/p/1.JPEG"}));
        assert!(v.is_empty());
        let (_, v) = run(&PHOTO_RULES, json!({"photo_url": "https://img.example.com/p/1.pdf"}));
        assert_eq!(v.len(), 1);
        assert!(v[0].message.contains("valid image file"));
    }

    #[test]
    fn url_check_rejects_whitespace_and_missing_scheme() {
        for bad in ["example.com/a.png", "https://exa mple.com", "mailto:x@example.com", "https://"] {
            let (_, v) = run(&BANNER_RULES, json!({ "redirect_url": bad }));
            assert_eq!(v.len(), 1, "{} should be rejected", bad);
        }
        let (_, v) = run(&BANNER_RULES, json!({"redirect_url": "http://localhost:3000/sale?x=1"}));
        assert!(v.is_empty());
    }

    #[test]
    fn banner_active_must_be_boolean() {
        let (_, v) = run(&BANNER_RULES, json!({"active": "yes"}));
        assert_eq!(messages(&v), vec!["Active must be a boolean value"]);
    }

    #[test]
    fn admin_username_charset() {
        let (_, v) = run(&ADMIN_RULES, json!({"username": "bad name!", "password": "longenough"}));
        assert_eq!(messages(&v), vec!["Username can only contain letters, numbers, and underscores"]);
        let (_, v) = run(&ADMIN_RULES, json!({"username": "ok_admin", "password": "short"}));
        assert_eq!(messages(&v), vec!["Password must be at least 8 characters"]);
    }

    #[test]
    fn login_only_requires_a_username() {
        let long = "u".repeat(80);
        let (_, v) = run(&LOGIN_RULES, json!({"username": long, "password": "longenough"}));
        assert!(v.is_empty(), "{:?}", v);
        let (_, v) = run(&LOGIN_RULES, json!({"username": "   ", "password": "longenough"}));
        assert_eq!(messages(&v), vec!["Username and password are required"]);
    }

    #[test]
    fn product_ids_must_be_positive() {
        let (_, v) = run(&PRODUCT_RULES, json!({"name": "Widget", "brand_id": 0, "category_id": -3}));
        assert_eq!(
            messages(&v),
            vec!["Brand ID must be a positive integer", "Category ID must be a positive integer"]
        );
    }
}
