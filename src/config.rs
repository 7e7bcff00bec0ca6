use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::headers::HeaderMap;

/// Configuration for a store adapter instance.
///
/// `container`, `username`, and `api_key` must be non-empty before any remote
/// operation; [`StoreConfig::require_complete`] enforces this so that a setup
/// problem surfaces as [`StoreError::NotConfigured`] rather than a transport
/// failure. The remaining fields feed region- and URL-dependent glue and are
/// validated only when that behavior is invoked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Target container (bucket) name
    pub container: String,

    /// Principal used to authenticate against the store
    pub username: String,

    /// Secret for the principal
    pub api_key: String,

    /// Region code; validated lazily via [`StoreConfig::resolved_region`]
    pub region: Option<String>,

    /// Default headers applied to every write, lowest merge precedence
    pub storage_headers: HeaderMap,

    /// Scheme for externally visible object URLs
    pub url_scheme: Option<String>,

    /// Host override for externally visible object URLs
    pub url_host: Option<String>,
}

impl StoreConfig {
    /// Create a config with the three required fields set
    pub fn new<C, U, K>(container: C, username: U, api_key: K) -> Self
    where
        C: Into<String>,
        U: Into<String>,
        K: Into<String>,
    {
        Self {
            container: container.into(),
            username: username.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Set the region code
    pub fn with_region<S: Into<String>>(mut self, region: S) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Add a default header applied to every write
    pub fn with_storage_header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.storage_headers.insert(key.into(), value.into());
        self
    }

    /// Set the URL scheme
    pub fn with_url_scheme<S: Into<String>>(mut self, scheme: S) -> Self {
        self.url_scheme = Some(scheme.into());
        self
    }

    /// Set the URL host override
    pub fn with_url_host<S: Into<String>>(mut self, host: S) -> Self {
        self.url_host = Some(host.into());
        self
    }

    /// Check that every field required for remote calls is present,
    /// naming the first missing one
    pub fn require_complete(&self) -> StoreResult<()> {
        for (field, value) in [
            ("container", &self.container),
            ("username", &self.username),
            ("api_key", &self.api_key),
        ] {
            if value.is_empty() {
                return Err(StoreError::not_configured(field));
            }
        }
        Ok(())
    }

    /// Resolve the configured region, defaulting to [`Region::Ord`].
    ///
    /// An out-of-set value is an error here and only here - storing an
    /// invalid region is harmless until region-dependent behavior runs.
    pub fn resolved_region(&self) -> StoreResult<Region> {
        match self.region.as_deref() {
            None => Ok(Region::Ord),
            Some(raw) => raw
                .parse()
                .map_err(|_| StoreError::invalid_region(raw)),
        }
    }

    /// Scheme for externally visible URLs, defaulting to plain http
    pub fn url_scheme(&self) -> &str {
        self.url_scheme.as_deref().unwrap_or("http")
    }
}

/// Closed set of deployment regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Dfw,
    Ord,
    Iad,
    Lon,
    Syd,
    Hkg,
}

impl Region {
    /// All known region codes
    pub const ALL: [Region; 6] = [
        Region::Dfw,
        Region::Ord,
        Region::Iad,
        Region::Lon,
        Region::Syd,
        Region::Hkg,
    ];

    /// The lowercase wire code for this region
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Dfw => "dfw",
            Region::Ord => "ord",
            Region::Iad => "iad",
            Region::Lon => "lon",
            Region::Syd => "syd",
            Region::Hkg => "hkg",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dfw" => Ok(Region::Dfw),
            "ord" => Ok(Region::Ord),
            "iad" => Ok(Region::Iad),
            "lon" => Ok(Region::Lon),
            "syd" => Ok(Region::Syd),
            "hkg" => Ok(Region::Hkg),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_complete_names_the_missing_field() {
        let mut config = StoreConfig::new("photos", "acme", "secret");
        assert!(config.require_complete().is_ok());

        config.username = String::new();
        match config.require_complete() {
            Err(StoreError::NotConfigured { field }) => assert_eq!(field, "username"),
            other => panic!("expected NotConfigured, got {other:?}"),
        }
    }

    #[test]
    fn region_defaults_to_ord_and_rejects_unknown_codes() {
        let config = StoreConfig::new("photos", "acme", "secret");
        assert_eq!(config.resolved_region().unwrap(), Region::Ord);

        let config = config.with_region("lon");
        assert_eq!(config.resolved_region().unwrap(), Region::Lon);

        let config = config.with_region("mars");
        assert!(matches!(
            config.resolved_region(),
            Err(StoreError::InvalidRegion { .. })
        ));
    }
}
