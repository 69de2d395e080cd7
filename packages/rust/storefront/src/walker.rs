//! Per-storefront feed walker.
//!
//! Pages through one region's newest-first review feed, emitting normalized
//! reviews until the scan cap is reached, an entry falls outside the recency
//! window, a page comes back empty, a fetch fails, or [`MAX_FEED_PAGES`] pages
//! have been read. None of these stops is an error for the run; the caller
//! simply moves on to the next region.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use url::Url;

use reviewharvest_fetcher::Fetch;
use reviewharvest_shared::{NormalizedReview, ProductId};

use crate::feed::{feed_url, parse_feed, parse_timestamp};
use crate::pacing::Pacer;

/// The customer-review feed serves at most this many pages per region.
pub const MAX_FEED_PAGES: u32 = 10;

/// Walker state. A finished walk is always in one of the `Stopped*` states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    Scanning,
    /// The per-region scan cap was reached.
    StoppedCap,
    /// An entry older than the cutoff was seen.
    StoppedOld,
    /// A page held no entries.
    StoppedEmpty,
    /// A page could not be fetched or decoded.
    StoppedFetchFail,
    /// [`MAX_FEED_PAGES`] pages were read without another stop.
    StoppedPageLimit,
}

impl WalkState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scanning => "scanning",
            Self::StoppedCap => "cap",
            Self::StoppedOld => "old",
            Self::StoppedEmpty => "empty",
            Self::StoppedFetchFail => "fetch-fail",
            Self::StoppedPageLimit => "page-limit",
        }
    }
}

impl std::fmt::Display for WalkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to walk.
#[derive(Debug, Clone)]
pub struct WalkRequest<'a> {
    pub product_id: &'a ProductId,
    pub region: &'a str,
    /// Maximum in-window entries to emit.
    pub cap: u32,
    /// Entries strictly older than this end the walk.
    pub cutoff: DateTime<Utc>,
}

/// Summary of one region's walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkReport {
    pub region: String,
    pub state: WalkState,
    /// Pages fetched successfully.
    pub pages_fetched: u32,
    /// In-window entries emitted; counts against the cap.
    pub scanned: u32,
    /// Entries skipped because their timestamp did not parse.
    pub skipped_bad_timestamp: u32,
}

/// Walks review feeds through a [`Fetch`] implementation.
#[derive(Debug)]
pub struct FeedWalker<'a, F> {
    fetcher: &'a F,
    feed_base: &'a Url,
    pacer: Pacer,
}

impl<'a, F: Fetch> FeedWalker<'a, F> {
    pub fn new(fetcher: &'a F, feed_base: &'a Url, pacer: Pacer) -> Self {
        Self {
            fetcher,
            feed_base,
            pacer,
        }
    }

    /// Walk one region, handing every in-window entry to `sink` in feed order.
    ///
    /// Each emitted entry counts toward the cap whatever the sink decides to do
    /// with it. The pacer runs before the first request and before every
    /// following page.
    #[instrument(skip_all, fields(region = %request.region, cap = request.cap))]
    pub async fn walk<S>(&self, request: &WalkRequest<'_>, mut sink: S) -> WalkReport
    where
        S: FnMut(NormalizedReview),
    {
        let mut report = WalkReport {
            region: request.region.to_string(),
            state: WalkState::Scanning,
            pages_fetched: 0,
            scanned: 0,
            skipped_bad_timestamp: 0,
        };

        if request.cap == 0 {
            report.state = WalkState::StoppedCap;
            return report;
        }

        let mut page = 1;
        while report.state == WalkState::Scanning {
            if page > MAX_FEED_PAGES {
                report.state = WalkState::StoppedPageLimit;
                break;
            }
            self.pacer.pause().await;

            let url = match feed_url(self.feed_base, request.region, request.product_id, page) {
                Ok(url) => url,
                Err(e) => {
                    debug!(error = %e, "cannot build feed URL");
                    report.state = WalkState::StoppedFetchFail;
                    break;
                }
            };

            let body = match self.fetcher.fetch(&url, &[]).await {
                Ok(body) => body,
                Err(e) => {
                    debug!(page, error = %e, "feed fetch failed");
                    report.state = WalkState::StoppedFetchFail;
                    break;
                }
            };

            let entries = match parse_feed(&body) {
                Ok(entries) => entries,
                Err(e) => {
                    debug!(page, error = %e, "feed page undecodable");
                    report.state = WalkState::StoppedFetchFail;
                    break;
                }
            };
            report.pages_fetched += 1;

            if entries.is_empty() {
                report.state = WalkState::StoppedEmpty;
                break;
            }

            debug!(page, entries = entries.len(), "feed page fetched");

            for entry in entries {
                let Some(updated_at) = parse_timestamp(&entry.updated_raw) else {
                    report.skipped_bad_timestamp += 1;
                    continue;
                };

                if updated_at < request.cutoff {
                    report.state = WalkState::StoppedOld;
                    break;
                }

                report.scanned += 1;
                sink(NormalizedReview {
                    entry,
                    updated_at,
                    region: request.region.to_string(),
                });

                if report.scanned >= request.cap {
                    report.state = WalkState::StoppedCap;
                    break;
                }
            }

            page += 1;
        }

        info!(
            state = %report.state,
            pages = report.pages_fetched,
            scanned = report.scanned,
            skipped = report.skipped_bad_timestamp,
            "region walk finished"
        );

        report
    }
}
