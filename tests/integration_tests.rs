// Integration tests for SkillSwap Nearby

use skillswap_nearby::core::{
    distance::compute_distance_km, render_markers, Explorer, MapBackend, MarkerSet, ProximityEngine,
};
use skillswap_nearby::models::{GeoPoint, SearchContext, SkillOffer, DISTANCE_UNKNOWN, LOCATION_NOT_SET};
use skillswap_nearby::services::{
    geolocation::{default_location, STATUS_DEFAULT_AREA},
    LocationResolver, LocationSource, MapScene, OfferCatalog,
};
use skillswap_nearby::filter_by_radius;

const KM_PER_DEGREE: f64 = 6371.0 * std::f64::consts::PI / 180.0;

fn create_test_offer(id: u64, category: &str, location: Option<GeoPoint>) -> SkillOffer {
    SkillOffer {
        id,
        title: format!("Offer {}", id),
        category: category.to_string(),
        description: "Weekend sessions".to_string(),
        rating: 4.5,
        rate_per_hour: 1,
        owner_name: "Lisa R.".to_string(),
        available: true,
        location,
        distance_km: None,
        distance: DISTANCE_UNKNOWN.to_string(),
    }
}

fn delhi() -> GeoPoint {
    GeoPoint::new(28.6139, 77.2090).unwrap()
}

fn north_of(center: GeoPoint, km: f64) -> GeoPoint {
    GeoPoint::new(center.latitude + km / KM_PER_DEGREE, center.longitude).unwrap()
}

#[test]
fn test_radius_filter_scenario() {
    let center = delhi();
    let offers = vec![
        create_test_offer(1, "arts", Some(center)),
        create_test_offer(2, "arts", Some(north_of(center, 1.5))),
        create_test_offer(3, "arts", Some(north_of(center, 5.0))),
        create_test_offer(4, "arts", None),
    ];

    let kept = filter_by_radius(center, offers, 2.0);

    let ids: Vec<u64> = kept.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 2, 4]);

    let labels: Vec<&str> = kept.iter().map(|o| o.distance.as_str()).collect();
    assert_eq!(labels, vec!["0.0 km", "1.5 km", LOCATION_NOT_SET]);

    assert_eq!(kept[0].distance_km, Some(0.0));
    assert!((kept[1].distance_km.unwrap() - 1.5).abs() < 1e-6);
    assert_eq!(kept[2].distance_km, None);
}

#[test]
fn test_radius_filter_overwrites_stale_distances() {
    let center = delhi();
    let mut stale = create_test_offer(1, "home", Some(north_of(center, 0.8)));
    stale.distance_km = Some(42.0);
    stale.distance = "42.0 km".to_string();

    let kept = filter_by_radius(center, vec![stale], 1.0);

    assert_eq!(kept[0].distance, "0.8 km");
    assert!((kept[0].distance_km.unwrap() - 0.8).abs() < 1e-6);
}

#[test]
fn test_sample_catalog_search_from_dadar() {
    let catalog = OfferCatalog::with_samples();
    let dadar = GeoPoint::new(19.0760, 72.8777).unwrap();
    let engine = ProximityEngine::with_default_limits();

    let context = SearchContext::new(dadar, 5.0).unwrap();
    let result = engine.search(&context, catalog.snapshot());

    assert_eq!(result.total_candidates, catalog.len());
    assert_eq!(result.zoom, 13);
    for offer in &result.offers {
        let km = offer.distance_km.expect("sample offers are located");
        assert!(km <= 5.0);
        let location = offer.location.unwrap();
        assert_eq!(km, compute_distance_km(dadar, location));
    }
    // Dadar and Andheri both fall inside 5 km, Borivali does not
    let ids: Vec<u64> = result.offers.iter().map(|o| o.id).collect();
    assert!(ids.contains(&1));
    assert!(ids.contains(&2));
    assert!(!ids.contains(&5));
}

#[test]
fn test_search_applies_filters_after_radius() {
    let catalog = OfferCatalog::with_samples();
    let dadar = GeoPoint::new(19.0760, 72.8777).unwrap();
    let engine = ProximityEngine::with_default_limits();

    let context = SearchContext::new(dadar, 50.0)
        .unwrap()
        .with_category("wellness");
    let result = engine.search(&context, catalog.snapshot());
    assert_eq!(result.offers.len(), 1);

    let context = SearchContext::new(dadar, 50.0)
        .unwrap()
        .with_category("wellness")
        .available_only(true);
    let result = engine.search(&context, catalog.snapshot());
    assert!(result.offers.is_empty());
}

#[test]
fn test_render_markers_rebuilds_scene() {
    let mut scene = MapScene::new();
    let mut markers = MarkerSet::new();
    let center = delhi();

    let first = vec![
        create_test_offer(1, "arts", Some(center)),
        create_test_offer(2, "technology", Some(north_of(center, 1.0))),
        create_test_offer(3, "home", None),
    ];
    render_markers(&mut scene, &mut markers, &first);
    assert_eq!(scene.marker_count(), 2);

    let second = vec![create_test_offer(7, "wellness", Some(north_of(center, 0.2)))];
    render_markers(&mut scene, &mut markers, &second);

    assert_eq!(scene.marker_count(), 1);
    assert_eq!(markers.len(), 1);
    assert!(markers.contains(7));
    assert!(!markers.contains(1));

    render_markers(&mut scene, &mut markers, &[]);
    assert_eq!(scene.marker_count(), 0);
}

#[test]
fn test_render_markers_duplicate_ids_keep_last() {
    let mut scene = MapScene::new();
    let mut markers = MarkerSet::new();
    let center = delhi();
    let later = north_of(center, 3.0);

    let offers = vec![
        create_test_offer(9, "arts", Some(center)),
        create_test_offer(9, "arts", Some(later)),
    ];
    render_markers(&mut scene, &mut markers, &offers);

    let snapshot = scene.snapshot();
    assert_eq!(snapshot.markers.len(), 1);
    assert_eq!(snapshot.markers[0].position, later);
}

#[test]
fn test_explorer_end_to_end_with_scene() {
    let catalog = OfferCatalog::with_samples();
    let mut explorer = Explorer::new(ProximityEngine::with_default_limits(), 1.0).unwrap();
    let mut scene = MapScene::new();

    let colaba = GeoPoint::new(19.0176, 72.8562).unwrap();
    let result = explorer.apply_location(&mut scene, colaba, catalog.snapshot());

    let snapshot = scene.snapshot();
    assert_eq!(snapshot.zoom, Some(15));
    assert_eq!(snapshot.center, Some(colaba));
    assert_eq!(snapshot.markers.len(), result.offers.len());
    assert!(snapshot.bounds.is_some());

    let result = explorer.set_radius(&mut scene, 100.0, catalog.snapshot()).unwrap();
    assert_eq!(result.offers.len(), catalog.len());
    assert_eq!(scene.snapshot().zoom, Some(8));
    assert_eq!(scene.snapshot().circle_count, 1);
}

#[test]
fn test_scene_tracks_backend_calls() {
    let mut scene = MapScene::new();
    let center = delhi();

    scene.set_view(center, 12);
    let circle = scene.draw_circle(center, 10_000.0, Default::default());
    assert_eq!(scene.layer_count(), 1);

    scene.remove_marker(circle);
    scene.remove_marker(circle);
    assert_eq!(scene.layer_count(), 0);
    assert_eq!(scene.snapshot().zoom, Some(12));
}

#[tokio::test]
async fn test_fallback_only_resolver_uses_default_area() {
    let resolver = LocationResolver::fallback_only(default_location());

    let location = resolver.resolve().await;

    assert_eq!(location.point, delhi());
    assert_eq!(location.source, LocationSource::Fallback);
    assert_eq!(location.status, STATUS_DEFAULT_AREA);
}
