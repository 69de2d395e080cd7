//! Storefront access: source identity, availability probe, and the
//! per-region review feed walker.
//!
//! This crate provides:
//! - [`reference`] - product id and default region from a reference URL
//! - [`lookup`] - availability probe and display-name resolution
//! - [`feed`] - review feed URL layout and decoding
//! - [`walker`] - paginated, cap- and recency-bounded feed walk
//! - [`pacing`] - randomized inter-request delay

pub mod feed;
pub mod lookup;
pub mod pacing;
pub mod reference;
pub mod walker;

pub use feed::{feed_url, parse_feed, parse_timestamp};
pub use lookup::{Listing, ProbeError, probe_region, resolve_display_name};
pub use pacing::Pacer;
pub use reference::{SourceIdentity, extract_default_region, extract_product_id};
pub use walker::{FeedWalker, MAX_FEED_PAGES, WalkReport, WalkRequest, WalkState};
