//! Availability probe: is the product listed in a storefront, and under what
//! name.

use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use reviewharvest_fetcher::{Fetch, FetchError};
use reviewharvest_shared::{FALLBACK_REGION, ProductId};

/// A product listing confirmed by the lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub region: String,
    pub result_count: u64,
    /// Display name of the first result, if it has a non-blank one.
    pub display_name: Option<String>,
}

/// Why a storefront probe produced no listing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("lookup request failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("lookup body for {region} is malformed: {message}")]
    Malformed { region: String, message: String },

    #[error("product not listed in {region}")]
    Empty { region: String },
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default, rename = "resultCount")]
    result_count: u64,
    #[serde(default)]
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    #[serde(default, rename = "trackName")]
    track_name: Option<String>,
}

/// Query the lookup endpoint for `product_id` in `region`.
#[instrument(skip_all, fields(product_id = %product_id, region = %region))]
pub async fn probe_region<F: Fetch>(
    fetcher: &F,
    lookup_url: &Url,
    product_id: &ProductId,
    region: &str,
) -> Result<Listing, ProbeError> {
    let body = fetcher
        .fetch(lookup_url, &[("id", product_id.as_str()), ("country", region)])
        .await?;

    let response: LookupResponse =
        serde_json::from_str(&body).map_err(|e| ProbeError::Malformed {
            region: region.to_string(),
            message: e.to_string(),
        })?;

    if response.result_count < 1 {
        return Err(ProbeError::Empty {
            region: region.to_string(),
        });
    }

    let display_name = response
        .results
        .into_iter()
        .next()
        .and_then(|r| r.track_name)
        .filter(|name| !name.trim().is_empty());

    debug!(result_count = response.result_count, ?display_name, "product listed");

    Ok(Listing {
        region: region.to_string(),
        result_count: response.result_count,
        display_name,
    })
}

/// Find the product's display name: the preferred storefront first, then
/// [`FALLBACK_REGION`].
pub async fn resolve_display_name<F: Fetch>(
    fetcher: &F,
    lookup_url: &Url,
    product_id: &ProductId,
    preferred_region: &str,
) -> Option<String> {
    let mut candidates = vec![preferred_region];
    if preferred_region != FALLBACK_REGION {
        candidates.push(FALLBACK_REGION);
    }

    for region in candidates {
        match probe_region(fetcher, lookup_url, product_id, region).await {
            Ok(Listing {
                display_name: Some(name),
                ..
            }) => return Some(name),
            Ok(_) => debug!(region, "listing has no display name"),
            Err(e) => debug!(region, error = %e, "display name lookup failed"),
        }
    }

    None
}
