// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{GeoPoint, GeoError, SkillOffer, SearchContext, BoundingBox, LOCATION_NOT_SET, DISTANCE_UNKNOWN};
pub use requests::{NearbySkillsQuery, ZoomQuery, ListingFeedItem, FeedNumber};
pub use responses::{NearbySkillsResponse, LocationResponse, ZoomResponse, HealthResponse, ErrorResponse};
