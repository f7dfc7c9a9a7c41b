use crate::models::{GeoPoint, SkillOffer, SearchContext, LOCATION_NOT_SET};
use crate::core::{
    distance::{compute_distance_km, format_distance},
    filters::{matches_availability, matches_category, matches_query, matches_search_filters},
    zoom::zoom_level_for_radius,
};

/// Largest radius the engine accepts unless configured otherwise
pub const DEFAULT_MAX_RADIUS_KM: f64 = 100.0;

/// Keep offers within `radius_km` of `center`, annotating each kept offer
///
/// Offers without a location are always kept and labelled
/// [`LOCATION_NOT_SET`]. Every kept offer with a location gets a freshly
/// computed `distance_km` and display label, so callers never show a
/// distance from an older center or radius. Input order is preserved.
pub fn filter_by_radius<I>(center: GeoPoint, offers: I, radius_km: f64) -> Vec<SkillOffer>
where
    I: IntoIterator<Item = SkillOffer>,
{
    offers
        .into_iter()
        .filter_map(|mut offer| match offer.location {
            None => {
                offer.distance_km = None;
                offer.distance = LOCATION_NOT_SET.to_string();
                Some(offer)
            }
            Some(location) => {
                let distance_km = compute_distance_km(center, location);
                if distance_km <= radius_km {
                    offer.distance_km = Some(distance_km);
                    offer.distance = format_distance(distance_km);
                    Some(offer)
                } else {
                    None
                }
            }
        })
        .collect()
}

/// Result of one nearby search
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub offers: Vec<SkillOffer>,
    pub total_candidates: usize,
    pub zoom: u8,
    pub radius_km: f64,
    pub center: Option<GeoPoint>,
}

/// Nearby search orchestrator
///
/// # Pipeline Stages
/// 1. Radius filter and distance annotation
/// 2. Category filter
/// 3. Free-text filter on title and description
/// 4. Availability filter
#[derive(Debug, Clone, Copy)]
pub struct ProximityEngine {
    max_radius_km: f64,
}

impl ProximityEngine {
    pub fn new(max_radius_km: f64) -> Self {
        Self { max_radius_km }
    }

    pub fn with_default_limits() -> Self {
        Self::new(DEFAULT_MAX_RADIUS_KM)
    }

    pub fn max_radius_km(&self) -> f64 {
        self.max_radius_km
    }

    /// Cap a requested radius at the configured maximum
    pub fn effective_radius(&self, radius_km: f64) -> f64 {
        radius_km.min(self.max_radius_km)
    }

    /// Run the full pipeline for a located user
    pub fn search(&self, context: &SearchContext, candidates: Vec<SkillOffer>) -> SearchResult {
        let total_candidates = candidates.len();
        let radius_km = self.effective_radius(context.radius_km);

        let offers: Vec<SkillOffer> = filter_by_radius(context.center, candidates, radius_km)
            .into_iter()
            .filter(|offer| matches_search_filters(offer, context))
            .collect();

        tracing::debug!(
            "Nearby search kept {} of {} offers within {} km",
            offers.len(),
            total_candidates,
            radius_km
        );

        SearchResult {
            offers,
            total_candidates,
            zoom: zoom_level_for_radius(radius_km),
            radius_km,
            center: Some(context.center),
        }
    }

    /// Run the non-geographic stages only, for when no location is known yet
    pub fn browse(
        &self,
        candidates: Vec<SkillOffer>,
        radius_km: f64,
        category: Option<&str>,
        query: Option<&str>,
        available_only: bool,
    ) -> SearchResult {
        let total_candidates = candidates.len();
        let radius_km = self.effective_radius(radius_km);

        let offers: Vec<SkillOffer> = candidates
            .into_iter()
            .filter(|offer| matches_category(offer, category))
            .filter(|offer| matches_query(offer, query))
            .filter(|offer| matches_availability(offer, available_only))
            .collect();

        SearchResult {
            offers,
            total_candidates,
            zoom: zoom_level_for_radius(radius_km),
            radius_km,
            center: None,
        }
    }
}

impl Default for ProximityEngine {
    fn default() -> Self {
        Self::with_default_limits()
    }
}
