//! SkillSwap Nearby - proximity search engine for the SkillSwap marketplace
//!
//! Finds skill offers around a user's location, annotates them with
//! great-circle distances, and renders them as markers on an interactive map.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{compute_distance_km, filter_by_radius, zoom_level_for_radius, render_markers, Explorer, ProximityEngine};
pub use models::{GeoPoint, SkillOffer, SearchContext, NearbySkillsResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let delhi = GeoPoint::new(28.6139, 77.2090).unwrap();
        assert_eq!(compute_distance_km(delhi, delhi), 0.0);
        assert_eq!(zoom_level_for_radius(1.0), 15);
    }
}
