//! Shared types, error model, and configuration for ReviewHarvest.
//!
//! This crate is the foundation depended on by all other ReviewHarvest crates.
//! It provides:
//! - [`HarvestError`] - the unified error type
//! - Domain types ([`ProductId`], [`RawReviewEntry`], [`NormalizedReview`])
//! - The target-script profile ([`ScriptProfile`])
//! - Configuration ([`AppConfig`], [`HarvestConfig`], config loading)

pub mod config;
pub mod error;
pub mod regions;
pub mod script;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, EndpointsConfig, HarvestConfig, HttpConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{HarvestError, Result};
pub use regions::{FALLBACK_REGION, STOREFRONTS};
pub use script::ScriptProfile;
pub use types::{NormalizedReview, ProductId, RawReviewEntry};
