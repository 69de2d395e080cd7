//! Source identity: product id and default storefront from a reference URL.

use std::sync::LazyLock;

use regex::Regex;

use reviewharvest_shared::{FALLBACK_REGION, HarvestError, ProductId, Result};

/// Product id and default storefront parsed from one source reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIdentity {
    pub product_id: ProductId,
    pub default_region: String,
}

impl SourceIdentity {
    /// Resolve both parts; fails only when the product id is missing.
    pub fn resolve(reference: &str) -> Result<Self> {
        Ok(Self {
            product_id: extract_product_id(reference)?,
            default_region: extract_default_region(reference),
        })
    }
}

/// Extract the digits of the `/id<digits>` segment.
pub fn extract_product_id(reference: &str) -> Result<ProductId> {
    static ID_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"/id(\d+)").expect("valid regex"));

    ID_RE
        .captures(reference)
        .and_then(|caps| ProductId::new(&caps[1]))
        .ok_or_else(|| HarvestError::malformed_reference(reference))
}

/// Extract the two-letter storefront after `apps.apple.com/`, falling back to
/// [`FALLBACK_REGION`].
pub fn extract_default_region(reference: &str) -> String {
    static REGION_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"apps\.apple\.com/([a-z]{2})/").expect("valid regex"));

    REGION_RE
        .captures(&reference.to_lowercase())
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| FALLBACK_REGION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_product_id() {
        let id = extract_product_id(
            "https://apps.apple.com/us/app/duolingo-language-lessons/id570060128",
        )
        .unwrap();
        assert_eq!(id.as_str(), "570060128");

        let id = extract_product_id("https://apps.apple.com/ru/app/x/id42?l=ru").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn missing_product_id_is_malformed() {
        for reference in [
            "https://apps.apple.com/us/app/duolingo",
            "https://apps.apple.com/us/app/x/idabc",
            "",
            "id570060128",
        ] {
            let err = extract_product_id(reference).unwrap_err();
            assert!(
                matches!(err, HarvestError::MalformedReference { .. }),
                "{reference}"
            );
        }
    }

    #[test]
    fn extracts_default_region() {
        assert_eq!(
            extract_default_region("https://apps.apple.com/ru/app/x/id1"),
            "ru"
        );
        assert_eq!(
            extract_default_region("https://APPS.APPLE.COM/KZ/app/x/id1"),
            "kz"
        );
    }

    #[test]
    fn default_region_falls_back() {
        assert_eq!(extract_default_region("https://apps.apple.com/app/x/id1"), "us");
        assert_eq!(extract_default_region("not a url"), "us");
    }

    #[test]
    fn resolve_combines_both() {
        let identity = SourceIdentity::resolve("https://apps.apple.com/de/app/x/id77").unwrap();
        assert_eq!(identity.product_id.as_str(), "77");
        assert_eq!(identity.default_region, "de");
        assert!(SourceIdentity::resolve("https://apps.apple.com/de/app/x").is_err());
    }
}
