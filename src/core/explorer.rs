use crate::models::{GeoError, GeoPoint, SearchContext, SkillOffer, domain::validate_radius};
use crate::core::{
    markers::{render_markers, CircleStyle, LayerHandle, MapBackend, MarkerSet, MarkerStyle},
    proximity::{ProximityEngine, SearchResult},
    zoom::zoom_level_for_radius,
};

/// State behind the "find a skill" map and list
///
/// Owns the user's location, the filter controls and every layer it has put
/// on the map. Each setter ends with a [`refresh`](Explorer::refresh) so the
/// list and markers always reflect the latest controls.
#[derive(Debug)]
pub struct Explorer {
    engine: ProximityEngine,
    location: Option<GeoPoint>,
    radius_km: f64,
    category: Option<String>,
    query: Option<String>,
    available_only: bool,
    markers: MarkerSet,
    user_marker: Option<LayerHandle>,
    radius_circle: Option<LayerHandle>,
}

impl Explorer {
    pub fn new(engine: ProximityEngine, radius_km: f64) -> Result<Self, GeoError> {
        let radius_km = engine.effective_radius(validate_radius(radius_km)?);

        Ok(Self {
            engine,
            location: None,
            radius_km,
            category: None,
            query: None,
            available_only: false,
            markers: MarkerSet::new(),
            user_marker: None,
            radius_circle: None,
        })
    }

    /// Preset the non-geographic controls without touching the map
    pub fn with_filters(mut self, category: Option<String>, query: Option<String>, available_only: bool) -> Self {
        self.category = category;
        self.query = query;
        self.available_only = available_only;
        self
    }

    pub fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Search context for the current controls, once a location is known
    pub fn context(&self) -> Option<SearchContext> {
        self.location.map(|center| SearchContext {
            center,
            radius_km: self.radius_km,
            category: self.category.clone(),
            query: self.query.clone(),
            available_only: self.available_only,
        })
    }

    /// Center the map on a new user location and refresh results
    pub fn apply_location<M: MapBackend + ?Sized>(
        &mut self,
        map: &mut M,
        point: GeoPoint,
        offers: Vec<SkillOffer>,
    ) -> SearchResult {
        self.location = Some(point);
        map.set_view(point, zoom_level_for_radius(self.radius_km));

        if let Some(previous) = self.user_marker.take() {
            map.remove_marker(previous);
        }
        self.user_marker = Some(map.add_marker(point, MarkerStyle::user_position()));

        self.draw_radius(map, point);
        self.refresh(map, offers)
    }

    pub fn set_radius<M: MapBackend + ?Sized>(
        &mut self,
        map: &mut M,
        radius_km: f64,
        offers: Vec<SkillOffer>,
    ) -> Result<SearchResult, GeoError> {
        self.radius_km = self.engine.effective_radius(validate_radius(radius_km)?);

        if let Some(center) = self.location {
            map.set_view(center, zoom_level_for_radius(self.radius_km));
            self.draw_radius(map, center);
        }

        Ok(self.refresh(map, offers))
    }

    pub fn set_category<M: MapBackend + ?Sized>(
        &mut self,
        map: &mut M,
        category: Option<String>,
        offers: Vec<SkillOffer>,
    ) -> SearchResult {
        self.category = category;
        self.refresh(map, offers)
    }

    pub fn set_query<M: MapBackend + ?Sized>(
        &mut self,
        map: &mut M,
        query: Option<String>,
        offers: Vec<SkillOffer>,
    ) -> SearchResult {
        self.query = query;
        self.refresh(map, offers)
    }

    pub fn set_available_only<M: MapBackend + ?Sized>(
        &mut self,
        map: &mut M,
        available_only: bool,
        offers: Vec<SkillOffer>,
    ) -> SearchResult {
        self.available_only = available_only;
        self.refresh(map, offers)
    }

    /// Re-run the search and rebuild the offer markers
    ///
    /// Until a location arrives no radius filter is applied.
    pub fn refresh<M: MapBackend + ?Sized>(&mut self, map: &mut M, offers: Vec<SkillOffer>) -> SearchResult {
        let result = match self.context() {
            Some(context) => self.engine.search(&context, offers),
            None => self.engine.browse(
                offers,
                self.radius_km,
                self.category.as_deref(),
                self.query.as_deref(),
                self.available_only,
            ),
        };

        render_markers(map, &mut self.markers, &result.offers);
        result
    }

    fn draw_radius<M: MapBackend + ?Sized>(&mut self, map: &mut M, center: GeoPoint) {
        if let Some(previous) = self.radius_circle.take() {
            map.remove_marker(previous);
        }
        self.radius_circle = Some(map.draw_circle(center, self.radius_km * 1000.0, CircleStyle::default()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::map_scene::MapScene;
    use crate::models::DISTANCE_UNKNOWN;

    fn create_offer(id: u64, category: &str, lat: f64, lon: f64) -> SkillOffer {
        SkillOffer {
            id,
            title: format!("Offer {}", id),
            category: category.to_string(),
            description: String::new(),
            rating: 5.0,
            rate_per_hour: 1,
            owner_name: "Emma L.".to_string(),
            available: true,
            location: Some(GeoPoint::new(lat, lon).unwrap()),
            distance_km: None,
            distance: DISTANCE_UNKNOWN.to_string(),
        }
    }

    fn offers() -> Vec<SkillOffer> {
        vec![
            create_offer(1, "arts", 19.0760, 72.8777),
            create_offer(2, "technology", 19.1136, 72.8697),
            create_offer(3, "home", 19.2183, 72.9781),
        ]
    }

    #[test]
    fn test_unlocated_explorer_shows_everything() {
        let mut explorer = Explorer::new(ProximityEngine::default(), 1.0).unwrap();
        let mut scene = MapScene::new();

        let result = explorer.refresh(&mut scene, offers());

        assert_eq!(result.offers.len(), 3);
        assert_eq!(scene.marker_count(), 3);
        assert!(explorer.context().is_none());
    }

    #[test]
    fn test_apply_location_centers_and_filters() {
        let mut explorer = Explorer::new(ProximityEngine::default(), 5.0).unwrap();
        let mut scene = MapScene::new();
        let dadar = GeoPoint::new(19.0760, 72.8777).unwrap();

        let result = explorer.apply_location(&mut scene, dadar, offers());

        // Andheri is ~4.2km from Dadar, Borivali ~19km
        let ids: Vec<u64> = result.offers.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.center, Some(dadar));
        assert_eq!(snapshot.zoom, Some(13));
        assert!(snapshot.user.is_some());
        assert_eq!(snapshot.circle.as_ref().map(|c| c.radius_meters), Some(5000.0));
        assert_eq!(snapshot.markers.len(), 2);
    }

    #[test]
    fn test_relocating_replaces_user_marker_and_circle() {
        let mut explorer = Explorer::new(ProximityEngine::default(), 2.0).unwrap();
        let mut scene = MapScene::new();

        explorer.apply_location(&mut scene, GeoPoint::new(19.0760, 72.8777).unwrap(), offers());
        let borivali = GeoPoint::new(19.2183, 72.9781).unwrap();
        explorer.apply_location(&mut scene, borivali, offers());

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.circle_count, 1);
        assert_eq!(snapshot.markers.len(), 1);
        assert_eq!(snapshot.user.map(|u| u.position), Some(borivali));
        assert_eq!(explorer.markers().len(), 1);
        assert!(explorer.markers().contains(3));
    }

    #[test]
    fn test_set_radius_widens_results() {
        let mut explorer = Explorer::new(ProximityEngine::default(), 1.0).unwrap();
        let mut scene = MapScene::new();
        explorer.apply_location(&mut scene, GeoPoint::new(19.0760, 72.8777).unwrap(), offers());

        let result = explorer.set_radius(&mut scene, 25.0, offers()).unwrap();

        assert_eq!(result.offers.len(), 3);
        assert_eq!(scene.snapshot().zoom, Some(10));
        assert!(explorer.set_radius(&mut scene, 0.0, offers()).is_err());
        assert_eq!(explorer.radius_km(), 25.0);
    }

    #[test]
    fn test_category_and_query_controls() {
        let mut explorer = Explorer::new(ProximityEngine::default(), 50.0).unwrap();
        let mut scene = MapScene::new();
        explorer.apply_location(&mut scene, GeoPoint::new(19.0760, 72.8777).unwrap(), offers());

        let result = explorer.set_category(&mut scene, Some("technology".to_string()), offers());
        assert_eq!(result.offers.len(), 1);

        let result = explorer.set_query(&mut scene, Some("offer 3".to_string()), offers());
        assert!(result.offers.is_empty());
        assert_eq!(explorer.markers().len(), 0);

        explorer.set_category(&mut scene, None, offers());
        let result = explorer.set_available_only(&mut scene, true, offers());
        assert_eq!(result.offers.len(), 1);
    }
}
