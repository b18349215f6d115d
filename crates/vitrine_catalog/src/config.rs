//! Configuration loading for the catalog engine.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, instrument};
use vitrine_core::Category;
use vitrine_error::{ConfigError, VitrineError, VitrineResult};
use vitrine_storage::{CategoryPaths, ScanLimits};

/// Local filesystem backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct LocalConfig {
    /// Directory holding one subdirectory per category; unset disables the backend
    #[serde(default)]
    #[setters(strip_option, into)]
    media_root: Option<PathBuf>,

    /// URL path prefix under which the media root is published
    #[serde(default = "default_public_prefix")]
    #[setters(into)]
    public_prefix: String,
}

fn default_public_prefix() -> String {
    "/media".to_string()
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            media_root: None,
            public_prefix: default_public_prefix(),
        }
    }
}

/// Object store backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct ObjectStoreConfig {
    /// Base URL of the store's REST API
    #[serde(default = "default_api_url")]
    #[setters(into)]
    api_url: String,

    /// Host suffix identifying URLs served by the store
    #[serde(default = "default_public_domain")]
    #[setters(into)]
    public_domain: String,

    /// Environment variable holding the access credential
    #[serde(default = "default_token_env")]
    #[setters(into)]
    token_env: String,

    /// Maximum objects requested per list call
    #[serde(default = "default_list_page_size")]
    list_page_size: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://blob.vercel-storage.com".to_string()
}

fn default_public_domain() -> String {
    "public.blob.vercel-storage.com".to_string()
}

fn default_token_env() -> String {
    "BLOB_READ_WRITE_TOKEN".to_string()
}

fn default_list_page_size() -> usize {
    1000
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            public_domain: default_public_domain(),
            token_env: default_token_env(),
            list_page_size: default_list_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ObjectStoreConfig {
    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Credential from the configured environment variable, if set and non-empty.
    pub fn token_from_env(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

/// Query bounds and scan budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct CatalogConfig {
    /// Page size when the request gives none
    #[serde(default = "default_limit")]
    default_limit: usize,

    /// Smallest page size a request may ask for
    #[serde(default = "default_min_limit")]
    min_limit: usize,

    /// Largest page size a request may ask for
    #[serde(default = "default_max_limit")]
    max_limit: usize,

    /// Category scans in flight at once
    #[serde(default = "default_scan_concurrency")]
    scan_concurrency: usize,

    /// Time budget per category scan in seconds
    #[serde(default = "default_scan_timeout_secs")]
    scan_timeout_secs: u64,

    /// Objects listed per category, as a multiple of the page size
    #[serde(default = "default_scan_ceiling_factor")]
    scan_ceiling_factor: usize,

    /// Hard cap on objects listed per category
    #[serde(default = "default_scan_ceiling_max")]
    scan_ceiling_max: usize,
}

fn default_limit() -> usize {
    50
}

fn default_min_limit() -> usize {
    10
}

fn default_max_limit() -> usize {
    100
}

fn default_scan_concurrency() -> usize {
    4
}

fn default_scan_timeout_secs() -> u64 {
    20
}

fn default_scan_ceiling_factor() -> usize {
    10
}

fn default_scan_ceiling_max() -> usize {
    1000
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            min_limit: default_min_limit(),
            max_limit: default_max_limit(),
            scan_concurrency: default_scan_concurrency(),
            scan_timeout_secs: default_scan_timeout_secs(),
            scan_ceiling_factor: default_scan_ceiling_factor(),
            scan_ceiling_max: default_scan_ceiling_max(),
        }
    }
}

impl CatalogConfig {
    /// Clamp a requested page size into `[min_limit, max_limit]`.
    pub fn clamp_limit(&self, limit: usize) -> usize {
        let min = self.min_limit.max(1);
        limit.clamp(min, self.max_limit.max(min))
    }

    /// Per-category listing ceiling for a request.
    ///
    /// Proportional to the page size, never below what the requested page
    /// needs, and never above `scan_ceiling_max`.
    pub fn scan_ceiling(&self, page: usize, limit: usize) -> usize {
        let proportional = limit.saturating_mul(self.scan_ceiling_factor.max(1));
        let needed = page.max(1).saturating_mul(limit);
        proportional.max(needed).min(self.scan_ceiling_max.max(1))
    }

    /// Parallelism and timeout for category scans.
    pub fn scan_limits(&self) -> ScanLimits {
        ScanLimits::new(
            self.scan_concurrency,
            Duration::from_secs(self.scan_timeout_secs.max(1)),
        )
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct VitrineConfig {
    /// Local filesystem backend
    #[serde(default)]
    local: LocalConfig,

    /// Object store backend
    #[serde(default)]
    object_store: ObjectStoreConfig,

    /// Query bounds and scan budget
    #[serde(default)]
    catalog: CatalogConfig,

    /// Category slug to directory / key prefix overrides
    #[serde(default)]
    categories: BTreeMap<String, String>,
}

impl VitrineConfig {
    /// Load configuration from a specific file path, over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> VitrineResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                VitrineError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                VitrineError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: environment > user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (vitrine.toml shipped with the library)
    /// 2. User config in home directory (~/.config/vitrine/vitrine.toml)
    /// 3. User config in current directory (./vitrine.toml)
    /// 4. `VITRINE__SECTION__KEY` environment variables
    ///
    /// User config files are optional and will be silently skipped if not found.
    #[instrument]
    pub fn load() -> VitrineResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/vitrine/vitrine.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("vitrine").required(false))
            .add_source(Environment::with_prefix("VITRINE").separator("__"));

        builder
            .build()
            .map_err(|e| {
                VitrineError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                VitrineError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Validated category-to-path mapping.
    ///
    /// # Errors
    ///
    /// Unknown category slugs and overlapping paths are rejected.
    pub fn category_paths(&self) -> VitrineResult<CategoryPaths> {
        let overrides = self
            .categories
            .iter()
            .map(|(slug, path)| Ok((slug.parse::<Category>()?, path.clone())))
            .collect::<VitrineResult<Vec<_>>>()?;
        CategoryPaths::with_overrides(overrides)
    }
}

/// Bundled default configuration
const DEFAULT_CONFIG: &str = include_str!("../../../vitrine.toml");
