// Version information for the Fabstir Dictionary Node

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

/// Build date
pub const BUILD_DATE: &str = "2025-10-13";

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fabstir Dictionary Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
