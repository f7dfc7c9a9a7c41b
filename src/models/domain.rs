use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label shown for offers whose owner never shared a location
pub const LOCATION_NOT_SET: &str = "Location not set";

/// Label shown before a distance has been computed for an offer
pub const DISTANCE_UNKNOWN: &str = "—";

/// Errors raised when constructing geographic values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("Latitude out of range: {0} (expected -90..=90)")]
    InvalidLatitude(f64),

    #[error("Longitude out of range: {0} (expected -180..=180)")]
    InvalidLongitude(f64),

    #[error("Radius must be a positive number of kilometers, got {0}")]
    InvalidRadius(f64),
}

/// A point on the globe in degrees
///
/// Deserialization goes through [`GeoPoint::new`], so decoded points are
/// always in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = GeoError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Build a point, rejecting non-finite or out-of-range coordinates
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }

        Ok(Self { latitude, longitude })
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

/// A skill offered by a member, as listed on the nearby map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillOffer {
    pub id: u64,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub rating: f64,
    #[serde(rename = "ratePerHour")]
    pub rate_per_hour: u32,
    #[serde(rename = "ownerName")]
    pub owner_name: String,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(rename = "distanceKm", default)]
    pub distance_km: Option<f64>,
    #[serde(default = "default_distance_label")]
    pub distance: String,
}

impl SkillOffer {
    /// Initial of the owner, used as the avatar on cards and map pins
    pub fn avatar(&self) -> char {
        self.owner_name
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }
}

fn default_true() -> bool { true }

fn default_distance_label() -> String {
    DISTANCE_UNKNOWN.to_string()
}

/// Filter controls for one nearby search
///
/// Rebuilt by the caller whenever the radius slider, category chip, search
/// box or location changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchContext {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub category: Option<String>,
    pub query: Option<String>,
    pub available_only: bool,
}

impl SearchContext {
    pub fn new(center: GeoPoint, radius_km: f64) -> Result<Self, GeoError> {
        validate_radius(radius_km)?;

        Ok(Self {
            center,
            radius_km,
            category: None,
            query: None,
            available_only: false,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn available_only(mut self, available_only: bool) -> Self {
        self.available_only = available_only;
        self
    }
}

/// Reject radii that are not strictly positive and finite
pub fn validate_radius(radius_km: f64) -> Result<f64, GeoError> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(radius_km)
    } else {
        Err(GeoError::InvalidRadius(radius_km))
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(rename = "minLat")]
    pub min_lat: f64,
    #[serde(rename = "maxLat")]
    pub max_lat: f64,
    #[serde(rename = "minLon")]
    pub min_lon: f64,
    #[serde(rename = "maxLon")]
    pub max_lon: f64,
}
