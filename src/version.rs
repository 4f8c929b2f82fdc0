// Version information for the Vehicle Price Node

/// Full version string with feature description
pub const VERSION: &str = "v1.0.0-damage-price-fusion-2026-08-31";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

/// Build date
pub const BUILD_DATE: &str = "2026-08-31";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "damage-classification",
    "price-regression",
    "multipart-upload",
    "inr-formatting",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Vehicle Price Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
