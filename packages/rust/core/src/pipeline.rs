//! End-to-end harvest: reference → storefronts → walk → dedup → language → topics → table.

use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, instrument, warn};

use reviewharvest_fetcher::Fetch;
use reviewharvest_filter::{DedupContext, DedupVerdict, LanguageFilter};
use reviewharvest_shared::{HarvestConfig, ProductId, Result, ScriptProfile};
use reviewharvest_storefront::{
    FeedWalker, Pacer, SourceIdentity, WalkReport, WalkRequest, probe_region,
    resolve_display_name,
};
use reviewharvest_topics::TopicClassifier;

use crate::table::{OutputRecord, ReviewTable};

/// Result of one harvest run.
#[derive(Debug)]
pub struct HarvestResult {
    pub product_id: ProductId,
    /// Display name from the lookup endpoint, if any storefront reported one.
    pub product_name: Option<String>,
    /// Storefront named by the reference; scanned first.
    pub default_region: String,
    pub table: ReviewTable,
    /// One report per storefront, in scan order.
    pub regions: Vec<RegionReport>,
    pub elapsed: Duration,
}

impl HarvestResult {
    /// Storefronts whose feed was walked.
    pub fn regions_walked(&self) -> usize {
        self.regions
            .iter()
            .filter(|r| matches!(r.outcome, RegionOutcome::Walked { .. }))
            .count()
    }

    /// Storefronts skipped because the product is not listed there.
    pub fn regions_unavailable(&self) -> usize {
        self.regions.len() - self.regions_walked()
    }
}

/// What happened in one storefront.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionReport {
    pub region: String,
    pub outcome: RegionOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegionOutcome {
    /// The availability probe failed; the feed was not touched.
    Unavailable { reason: String },
    /// The feed was walked.
    Walked {
        walk: WalkReport,
        kept: u32,
        duplicates: u32,
        off_language: u32,
    },
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before storefront `current` of `total` (1-based) is processed.
    fn region(&self, current: usize, total: usize, region: &str);
    /// Called when the pipeline completes.
    fn done(&self, result: &HarvestResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn region(&self, _current: usize, _total: usize, _region: &str) {}
    fn done(&self, _result: &HarvestResult) {}
}

/// Scan order: `default_region` first, then `regions` in their given order
/// without it.
pub fn region_scan_order(default_region: &str, regions: &[String]) -> Vec<String> {
    std::iter::once(default_region.to_string())
        .chain(regions.iter().filter(|r| *r != default_region).cloned())
        .collect()
}

/// Start of the recency window: `now - days`, clamped to the earliest
/// representable instant.
pub fn recency_cutoff(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Run the full harvest for `reference` with the current time as "now".
pub async fn harvest<F: Fetch>(
    reference: &str,
    config: &HarvestConfig,
    fetcher: &F,
    progress: &dyn ProgressReporter,
) -> Result<HarvestResult> {
    harvest_at(reference, config, fetcher, progress, Utc::now()).await
}

/// Run the full harvest with an explicit "now" for the recency window.
///
/// 1. Validate config, resolve the reference (both fatal)
/// 2. Resolve the display name
/// 3. Per storefront: probe, walk, dedup, language filter, classify
/// 4. Return the table with per-storefront reports
#[instrument(skip_all, fields(reference = %reference))]
pub async fn harvest_at<F: Fetch>(
    reference: &str,
    config: &HarvestConfig,
    fetcher: &F,
    progress: &dyn ProgressReporter,
    now: DateTime<Utc>,
) -> Result<HarvestResult> {
    let start = Instant::now();

    config.validate()?;
    let identity = SourceIdentity::resolve(reference)?;
    let profile = ScriptProfile::default();
    let classifier = TopicClassifier::new(profile)?;
    let cutoff = recency_cutoff(now, config.recency_days);

    info!(
        product_id = %identity.product_id,
        default_region = %identity.default_region,
        cap = config.per_region_cap,
        days = config.recency_days,
        threshold = config.language_threshold,
        "starting harvest"
    );

    // --- Phase 1: Display name ---
    progress.phase("Resolving product name");
    let product_name = resolve_display_name(
        fetcher,
        &config.endpoints.lookup_url,
        &identity.product_id,
        &identity.default_region,
    )
    .await;
    if product_name.is_none() {
        warn!(product_id = %identity.product_id, "no display name found");
    }

    // --- Phase 2: Storefronts ---
    progress.phase("Collecting reviews");
    let regions = region_scan_order(&identity.default_region, &config.regions);
    let total = regions.len();

    let language = LanguageFilter::new(profile, config.language_threshold);
    let walker = FeedWalker::new(
        fetcher,
        &config.endpoints.feed_base_url,
        Pacer::new(config.min_delay_secs, config.max_delay_secs),
    );
    let mut dedup = DedupContext::new(profile);
    let mut table = ReviewTable::new();
    let mut reports = Vec::with_capacity(total);

    for (i, region) in regions.iter().enumerate() {
        progress.region(i + 1, total, region);

        if let Err(e) =
            probe_region(fetcher, &config.endpoints.lookup_url, &identity.product_id, region).await
        {
            debug!(region = %region, error = %e, "storefront unavailable, skipping");
            reports.push(RegionReport {
                region: region.clone(),
                outcome: RegionOutcome::Unavailable {
                    reason: e.to_string(),
                },
            });
            continue;
        }

        let request = WalkRequest {
            product_id: &identity.product_id,
            region,
            cap: config.per_region_cap,
            cutoff,
        };

        let (mut kept, mut duplicates, mut off_language) = (0u32, 0u32, 0u32);
        let walk = walker
            .walk(&request, |review| {
                if dedup.admit(&review) != DedupVerdict::Accepted {
                    duplicates += 1;
                    return;
                }
                if !language.accepts(&review) {
                    off_language += 1;
                    return;
                }
                let topics = classifier.classify(&review.entry.title, &review.entry.body);
                table.push(OutputRecord::new(
                    review,
                    &identity.product_id,
                    product_name.as_deref(),
                    profile.tag,
                    topics,
                    reference,
                ));
                kept += 1;
            })
            .await;

        debug!(region = %region, kept, duplicates, off_language, "storefront done");
        reports.push(RegionReport {
            region: region.clone(),
            outcome: RegionOutcome::Walked {
                walk,
                kept,
                duplicates,
                off_language,
            },
        });
    }

    let result = HarvestResult {
        product_id: identity.product_id,
        product_name,
        default_region: identity.default_region,
        table,
        regions: reports,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        product_id = %result.product_id,
        records = result.table.len(),
        regions_walked = result.regions_walked(),
        regions_unavailable = result.regions_unavailable(),
        elapsed_ms = result.elapsed.as_millis(),
        "harvest complete"
    );

    Ok(result)
}
