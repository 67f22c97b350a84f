/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// Label/value rows for the `version` command.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Version", self.version.to_string()),
            ("Build hash", format!("{} ({})", self.git_hash, self.git_status)),
            ("Built at", self.timestamp.to_string()),
            ("Target", self.target.to_string()),
            ("Profile", self.profile.to_string()),
            ("Rustc", self.rustc.to_string()),
        ]
    }
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("HOMECLEAN_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("HOMECLEAN_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("HOMECLEAN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("HOMECLEAN_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("HOMECLEAN_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("HOMECLEAN_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
