// Service exports
pub mod catalog;
pub mod geolocation;
pub mod ip_locator;
pub mod map_scene;

pub use catalog::{OfferCatalog, CatalogError, load_feed_file};
pub use geolocation::{GeolocationProvider, GeolocationOptions, GeolocationError, LocationResolver, ResolvedLocation, LocationSource};
pub use ip_locator::HttpGeolocationProvider;
pub use map_scene::{MapScene, MapSnapshot};
