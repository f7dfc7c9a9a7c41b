use serde::{Deserialize, Serialize};
use crate::models::domain::{GeoPoint, SkillOffer};
use crate::services::map_scene::MapSnapshot;

/// Response for the nearby skills endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySkillsResponse {
    pub skills: Vec<SkillOffer>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    pub zoom: u8,
    pub center: GeoPoint,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
    #[serde(rename = "locationStatus")]
    pub location_status: String,
    pub map: MapSnapshot,
}

/// Current resolved location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResponse {
    pub center: GeoPoint,
    pub source: String,
    pub status: String,
    #[serde(rename = "acquiredAt")]
    pub acquired_at: chrono::DateTime<chrono::Utc>,
}

/// Zoom level suggested for a radius
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoomResponse {
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
    pub zoom: u8,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub offers: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
