//! Client configuration
//!
//! Holds the settings an `ApiClient` is built from: the service root, whether
//! cached responses may be read, and where the on-disk cache lives.

use directories::ProjectDirs;
use std::path::PathBuf;

/// Root of the YNAB v1 API
pub const DEFAULT_BASE_URL: &str = "https://api.youneedabudget.com/v1";

/// Directory name used when no platform cache directory is available
const FALLBACK_CACHE_DIR: &str = "cache";

/// Settings for constructing an `ApiClient`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root that endpoint paths are appended to
    pub base_url: String,
    /// Client-wide switch for reading from the cache
    pub use_cache: bool,
    /// Directory for cache files
    pub cache_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            use_cache: true,
            cache_dir: default_cache_dir(),
        }
    }
}

impl ClientConfig {
    /// Overrides the service root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Enables or disables cache reads
    pub fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Overrides the cache directory
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }
}

/// Returns the XDG-compliant cache directory (`~/.cache/rynab/` on Linux)
///
/// Falls back to `./cache` when no home directory can be determined.
pub fn default_cache_dir() -> PathBuf {
    ProjectDirs::from("", "", "rynab")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_CACHE_DIR))
}
