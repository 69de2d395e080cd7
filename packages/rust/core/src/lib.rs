//! Harvest orchestration for ReviewHarvest.
//!
//! This crate ties the storefront walker, filters, and topic classifier into
//! one run (`harvest`) and owns the output table and its CSV export.

pub mod export;
pub mod pipeline;
pub mod table;

pub use export::{default_output_name, write_csv, write_csv_file};
pub use pipeline::{
    HarvestResult, ProgressReporter, RegionOutcome, RegionReport, SilentProgress, harvest,
    harvest_at, recency_cutoff, region_scan_order,
};
pub use reviewharvest_storefront::{WalkReport, WalkState};
pub use table::{OutputRecord, ReviewTable, columns};
