//! Compile-time build information, written by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `dino-dash <version> (<date>, <commit>)` for `--version`.
pub fn version_string() -> String {
    format!(
        "dino-dash {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_is_short_hash_or_unknown() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_string_mentions_package_version() {
        let v = version_string();
        assert!(v.starts_with("dino-dash "));
        assert!(v.contains(env!("CARGO_PKG_VERSION")));
        assert!(v.contains(BUILD_DATE));
    }
}
