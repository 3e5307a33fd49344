//! Compile-time identification of the binary

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_REVISION: &str = env!("RADAR_GIT_REVISION");
/// UTC, RFC 3339
pub const BUILT_AT: &str = env!("RADAR_BUILT_AT");
pub const PROFILE: &str = env!("RADAR_BUILD_PROFILE");

/// One-line description for the startup log
pub fn banner() -> String {
    format!(
        "radar-preprocess v{} [{}] built {} ({})",
        VERSION, GIT_REVISION, BUILT_AT, PROFILE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_names_version_and_revision() {
        let banner = banner();

        assert!(banner.starts_with("radar-preprocess v"));
        assert!(banner.contains(env!("CARGO_PKG_VERSION")));
        assert!(banner.contains(GIT_REVISION));
        assert!(!GIT_REVISION.is_empty());
    }

    #[test]
    fn test_build_time_is_utc() {
        assert!(BUILT_AT.ends_with('Z'), "{}", BUILT_AT);
    }
}
