use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use crate::models::GeoPoint;

/// Status shown when the device supplied a position
pub const STATUS_CAPTURED: &str = "Location captured";

/// Status shown when the default area is used instead
pub const STATUS_DEFAULT_AREA: &str = "Location set to default area.";

/// Default location (New Delhi) used when no position can be obtained
pub const DEFAULT_LATITUDE: f64 = 28.6139;
pub const DEFAULT_LONGITUDE: f64 = 77.2090;

const FIX_KEY: &str = "device";

/// Errors that can occur while obtaining a position
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported")]
    Unsupported,

    #[error("Geolocation permission denied")]
    PermissionDenied,

    #[error("Geolocation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Position unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Options for a single position request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeolocationOptions {
    pub timeout: Duration,
    pub maximum_age: Duration,
    pub high_accuracy: bool,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            maximum_age: Duration::from_secs(60),
            high_accuracy: true,
        }
    }
}

/// Source of the device's current position
#[async_trait]
pub trait GeolocationProvider: Send + Sync + Debug {
    async fn current_position(&self, options: &GeolocationOptions) -> Result<GeoPoint, GeolocationError>;
}

/// Where a resolved location came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Device,
    Fallback,
}

impl LocationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationSource::Device => "device",
            LocationSource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Fix {
    point: GeoPoint,
    acquired_at: DateTime<Utc>,
}

/// A location ready for searching, with the status line to show the user
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub point: GeoPoint,
    pub source: LocationSource,
    pub status: &'static str,
    pub acquired_at: DateTime<Utc>,
}

impl ResolvedLocation {
    fn device(fix: Fix) -> Self {
        Self {
            point: fix.point,
            source: LocationSource::Device,
            status: STATUS_CAPTURED,
            acquired_at: fix.acquired_at,
        }
    }

    fn fallback(point: GeoPoint) -> Self {
        Self {
            point,
            source: LocationSource::Fallback,
            status: STATUS_DEFAULT_AREA,
            acquired_at: Utc::now(),
        }
    }
}

/// Resolves the user's location, never failing
///
/// At most one provider request is outstanding: concurrent callers wait for
/// it and share its answer. A successful fix is reused for the configured
/// maximum age. Errors and timeouts fall back to the default location and
/// are not cached, so the next call asks the provider again.
pub struct LocationResolver {
    provider: Option<Arc<dyn GeolocationProvider>>,
    fallback: GeoPoint,
    options: GeolocationOptions,
    fixes: moka::future::Cache<&'static str, Fix>,
}

impl LocationResolver {
    /// Create a resolver; `None` models a client without geolocation support
    pub fn new(
        provider: Option<Arc<dyn GeolocationProvider>>,
        fallback: GeoPoint,
        options: GeolocationOptions,
    ) -> Self {
        // A zero maximum age still coalesces concurrent requests
        let ttl = options.maximum_age.max(Duration::from_millis(1));
        let fixes = moka::future::Cache::builder()
            .max_capacity(1)
            .time_to_live(ttl)
            .build();

        Self {
            provider,
            fallback,
            options,
            fixes,
        }
    }

    /// Resolver that always answers with the fallback location
    pub fn fallback_only(fallback: GeoPoint) -> Self {
        Self::new(None, fallback, GeolocationOptions::default())
    }

    pub fn fallback(&self) -> GeoPoint {
        self.fallback
    }

    pub fn options(&self) -> &GeolocationOptions {
        &self.options
    }

    pub async fn resolve(&self) -> ResolvedLocation {
        let Some(provider) = self.provider.as_ref() else {
            tracing::debug!("No geolocation provider configured, using default area");
            return ResolvedLocation::fallback(self.fallback);
        };

        let provider = Arc::clone(provider);
        let options = self.options;

        let result = self
            .fixes
            .try_get_with(FIX_KEY, async move {
                tracing::debug!("Requesting current position from {:?}", provider);
                let point = tokio::time::timeout(options.timeout, provider.current_position(&options))
                    .await
                    .map_err(|_| GeolocationError::Timeout(options.timeout))??;

                Ok::<_, GeolocationError>(Fix {
                    point,
                    acquired_at: Utc::now(),
                })
            })
            .await;

        match result {
            Ok(fix) => ResolvedLocation::device(fix),
            Err(e) => {
                tracing::warn!("Geolocation failed ({}), using default area", e);
                ResolvedLocation::fallback(self.fallback)
            }
        }
    }

    /// Drop the cached fix so the next resolve asks the provider again
    pub async fn invalidate(&self) {
        self.fixes.invalidate(&FIX_KEY).await;
    }
}

impl Debug for LocationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationResolver")
            .field("provider", &self.provider)
            .field("fallback", &self.fallback)
            .field("options", &self.options)
            .finish()
    }
}

/// The default area as a point
pub fn default_location() -> GeoPoint {
    GeoPoint {
        latitude: DEFAULT_LATITUDE,
        longitude: DEFAULT_LONGITUDE,
    }
}
