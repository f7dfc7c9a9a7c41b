use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use skillswap_nearby::config::{LoggingSettings, ProviderKind, Settings};
use skillswap_nearby::core::ProximityEngine;
use skillswap_nearby::models::GeoPoint;
use skillswap_nearby::routes::{self, handle_query_payload_error, AppState};
use skillswap_nearby::services::{
    load_feed_file, GeolocationProvider, HttpGeolocationProvider, LocationResolver, OfferCatalog,
};
use std::sync::Arc;
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn build_catalog(settings: &Settings) -> OfferCatalog {
    let mut catalog = if settings.catalog.include_samples {
        OfferCatalog::with_samples()
    } else {
        OfferCatalog::default()
    };

    if let Some(path) = &settings.catalog.feed_path {
        match load_feed_file(path) {
            Ok(items) => {
                let added = catalog.extend_from_feed(items, settings.catalog.current_member_id);
                info!("Loaded {} listings from {}", added, path);
            }
            Err(e) => warn!("Failed to load listing feed {} ({}), continuing without it", path, e),
        }
    }

    catalog
}

fn build_provider(settings: &Settings) -> Option<Arc<dyn GeolocationProvider>> {
    match (settings.location.provider, &settings.location.provider_url) {
        (ProviderKind::None, _) => None,
        (ProviderKind::Http, None) => {
            warn!("location.provider is \"http\" but location.provider_url is not set");
            None
        }
        (ProviderKind::Http, Some(url)) => match HttpGeolocationProvider::new(url.clone()) {
            Ok(provider) => Some(Arc::new(provider) as Arc<dyn GeolocationProvider>),
            Err(e) => {
                error!("Failed to create geolocation client: {}", e);
                None
            }
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    init_logging(
        settings
            .as_ref()
            .map(|s| &s.logging)
            .unwrap_or(&LoggingSettings::default()),
    );

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Starting SkillSwap nearby service...");

    let fallback = GeoPoint::new(settings.location.default_latitude, settings.location.default_longitude)
        .map_err(|e| {
            error!("Invalid default location: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
        })?;

    let catalog = Arc::new(build_catalog(&settings));
    info!("Offer catalog ready ({} offers)", catalog.len());

    let resolver = Arc::new(LocationResolver::new(
        build_provider(&settings),
        fallback,
        settings.location.geolocation_options(),
    ));
    info!("Location resolver initialized: {:?}", resolver);

    let engine = ProximityEngine::new(settings.search.max_radius_km);

    let app_state = AppState {
        catalog,
        resolver,
        engine,
        default_radius_km: settings.search.default_radius_km,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
