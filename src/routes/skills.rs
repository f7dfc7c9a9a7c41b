use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{zoom_level_for_radius, Explorer, ProximityEngine};
use crate::models::{
    ErrorResponse, GeoPoint, HealthResponse, LocationResponse, NearbySkillsQuery,
    NearbySkillsResponse, ZoomQuery, ZoomResponse, domain::validate_radius,
};
use crate::services::{
    geolocation::{LocationSource, ResolvedLocation, STATUS_CAPTURED},
    LocationResolver, MapScene, OfferCatalog,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<OfferCatalog>,
    pub resolver: Arc<LocationResolver>,
    pub engine: ProximityEngine,
    pub default_radius_km: f64,
}

/// Configure all skill-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/skills/nearby", web::get().to(nearby_skills))
        .route("/location", web::get().to(current_location))
        .route("/zoom", web::get().to(zoom_for_radius));
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        offers: state.catalog.len(),
    })
}

/// Find skills near a location
///
/// GET /api/v1/skills/nearby?lat=19.07&lng=72.87&radius=5&category=arts&q=guitar&availableOnly=true
///
/// When `lat`/`lng` are not both given the server-side resolver supplies
/// the location, falling back to the default area. A complete pair out of
/// range is a 400.
async fn nearby_skills(
    state: web::Data<AppState>,
    query: web::Query<NearbySkillsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for nearby request: field_errors={:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let radius_km = match validate_radius(query.radius.unwrap_or(state.default_radius_km)) {
        Ok(radius) => radius,
        Err(e) => return bad_request("Invalid radius", e.to_string()),
    };

    let location = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => match GeoPoint::new(lat, lng) {
            Ok(point) => ResolvedLocation {
                point,
                source: LocationSource::Device,
                status: STATUS_CAPTURED,
                acquired_at: chrono::Utc::now(),
            },
            Err(e) => return bad_request("Invalid location", e.to_string()),
        },
        (None, None) => state.resolver.resolve().await,
        (lat, lng) => {
            tracing::debug!("Ignoring incomplete coordinates lat={:?} lng={:?}", lat, lng);
            state.resolver.resolve().await
        }
    };

    let explorer = match Explorer::new(state.engine, radius_km) {
        Ok(explorer) => explorer,
        Err(e) => return bad_request("Invalid radius", e.to_string()),
    };
    let mut explorer = explorer.with_filters(
        query.category.clone(),
        query.q.clone(),
        query.available_only,
    );

    let mut scene = MapScene::new();
    let result = explorer.apply_location(&mut scene, location.point, state.catalog.snapshot());

    tracing::info!(
        "Returning {} of {} offers within {} km of ({}, {})",
        result.offers.len(),
        result.total_candidates,
        result.radius_km,
        location.point.latitude,
        location.point.longitude
    );

    HttpResponse::Ok().json(NearbySkillsResponse {
        total_results: result.offers.len(),
        total_candidates: result.total_candidates,
        zoom: result.zoom,
        center: location.point,
        radius_km: result.radius_km,
        location_status: location.status.to_string(),
        map: scene.snapshot(),
        skills: result.offers,
    })
}

/// Current server-resolved location
///
/// GET /api/v1/location
async fn current_location(state: web::Data<AppState>) -> impl Responder {
    let location = state.resolver.resolve().await;

    HttpResponse::Ok().json(LocationResponse {
        center: location.point,
        source: location.source.as_str().to_string(),
        status: location.status.to_string(),
        acquired_at: location.acquired_at,
    })
}

/// Zoom level for a radius
///
/// GET /api/v1/zoom?radius=5
async fn zoom_for_radius(query: web::Query<ZoomQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    HttpResponse::Ok().json(ZoomResponse {
        radius_km: query.radius,
        zoom: zoom_level_for_radius(query.radius),
    })
}
