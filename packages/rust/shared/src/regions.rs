//! Storefront (region) codes.

/// Region used when the source reference names none, and the universal
/// market consulted when a product's display name cannot be found elsewhere.
pub const FALLBACK_REGION: &str = "us";

/// Every storefront the harvester scans, in scan order.
pub const STOREFRONTS: &[&str] = &[
    "ae", "ag", "ai", "al", "am", "ao", "ar", "at", "au", "az",
    "bb", "be", "bf", "bg", "bh", "bj", "bm", "bn", "bo", "br", "bs", "bt", "bw", "by", "bz",
    "ca", "cg", "ch", "cl", "cn", "co", "cr", "cv", "cy", "cz",
    "de", "dk", "dm", "do", "dz",
    "ec", "ee", "eg", "es",
    "fi", "fj", "fm", "fr",
    "gb", "gd", "ge", "gh", "gm", "gr", "gt", "gy",
    "hk", "hn", "hr", "hu",
    "id", "ie", "il", "in", "iq", "is", "it",
    "jm", "jo", "jp",
    "ke", "kg", "kh", "kn", "kr", "kw", "ky", "kz",
    "la", "lb", "lc", "li", "lk", "lr", "lt", "lu", "lv", "ly",
    "ma", "md", "me", "mg", "mk", "ml", "mn", "mo", "mr", "ms", "mt", "mu", "mv", "mw", "mx",
    "my", "mz",
    "na", "ne", "ng", "ni", "nl", "no", "np", "nz",
    "om",
    "pa", "pe", "pg", "ph", "pk", "pl", "pt", "py",
    "qa",
    "ro", "rs", "ru", "rw",
    "sa", "sb", "sc", "se", "sg", "si", "sk", "sl", "sn", "sr", "st", "sv", "sz",
    "tc", "td", "th", "tj", "tm", "tn", "tr", "tt", "tw", "tz",
    "ua", "ug", "us", "uy", "uz",
    "vc", "ve", "vg", "vn",
    "za",
];
