//! Database operations per entity, plus request validation rules.

mod admin;
mod banner;
mod product;
mod rating;
mod taxonomy;
pub mod validation;

pub use admin::AdminService;
pub use banner::BannerService;
pub use product::{PhotoService, ProductService, VariantService};
pub use rating::RatingService;
pub use taxonomy::TaxonomyService;
pub use validation::{RuleSet, Validate};
