// Core algorithm exports
pub mod distance;
pub mod explorer;
pub mod filters;
pub mod markers;
pub mod proximity;
pub mod zoom;

pub use distance::{compute_distance_km, calculate_bounding_box, format_distance};
pub use explorer::Explorer;
pub use filters::{matches_category, matches_query, matches_search_filters};
pub use markers::{render_markers, category_color, MapBackend, MarkerSet, MarkerStyle, CircleStyle, LayerHandle};
pub use proximity::{filter_by_radius, ProximityEngine, SearchResult};
pub use zoom::zoom_level_for_radius;
