use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::models::{GeoPoint, SkillOffer};

/// Colour for categories without a dedicated one
pub const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";

/// Colour of the search radius overlay
pub const RADIUS_CIRCLE_COLOR: &str = "#6366f1";

/// Pin colour for an offer category
pub fn category_color(category: &str) -> &'static str {
    match category.to_ascii_lowercase().as_str() {
        "education" => "#3b82f6",
        "technology" => "#8b5cf6",
        "arts" => "#ec4899",
        "wellness" => "#10b981",
        "home" => "#f59e0b",
        _ => DEFAULT_CATEGORY_COLOR,
    }
}

/// Opaque handle to a layer (marker or overlay) owned by a map backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Offer,
    User,
}

/// How a marker is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub kind: MarkerKind,
    pub color: String,
    pub glyph: Option<char>,
    pub popup: String,
}

impl MarkerStyle {
    /// Category-coloured pin with the owner's initial
    pub fn for_offer(offer: &SkillOffer) -> Self {
        Self {
            kind: MarkerKind::Offer,
            color: category_color(&offer.category).to_string(),
            glyph: Some(offer.avatar()),
            popup: format!("{} · {}", offer.title, offer.owner_name),
        }
    }

    pub fn user_position() -> Self {
        Self {
            kind: MarkerKind::User,
            color: RADIUS_CIRCLE_COLOR.to_string(),
            glyph: None,
            popup: "You are here".to_string(),
        }
    }
}

/// Stroke and fill of a circle overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleStyle {
    pub color: String,
    #[serde(rename = "fillColor")]
    pub fill_color: String,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
    pub weight: u8,
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            color: RADIUS_CIRCLE_COLOR.to_string(),
            fill_color: RADIUS_CIRCLE_COLOR.to_string(),
            fill_opacity: 0.1,
            weight: 2,
        }
    }
}

/// Rendering capability of an interactive map
///
/// Implementations own the actual layers; callers only keep handles.
/// `remove_marker` removes any layer, circles included.
pub trait MapBackend {
    fn set_view(&mut self, center: GeoPoint, zoom: u8);
    fn add_marker(&mut self, point: GeoPoint, style: MarkerStyle) -> LayerHandle;
    fn remove_marker(&mut self, handle: LayerHandle);
    fn draw_circle(&mut self, center: GeoPoint, radius_meters: f64, style: CircleStyle) -> LayerHandle;
}

/// Offer markers currently on the map, keyed by offer id
#[derive(Debug, Default)]
pub struct MarkerSet {
    markers: HashMap<u64, LayerHandle>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn contains(&self, offer_id: u64) -> bool {
        self.markers.contains_key(&offer_id)
    }

    pub fn handle(&self, offer_id: u64) -> Option<LayerHandle> {
        self.markers.get(&offer_id).copied()
    }

    /// Remove every marker from the backend and forget it
    pub fn clear<M: MapBackend + ?Sized>(&mut self, map: &mut M) {
        for (_, handle) in self.markers.drain() {
            map.remove_marker(handle);
        }
    }
}

/// Replace the rendered markers with one per located offer
///
/// Every existing marker is removed before the new set is drawn. Offers
/// without a location are skipped. When two offers share an id
/// the later one wins and the earlier marker is removed.
pub fn render_markers<M: MapBackend + ?Sized>(
    map: &mut M,
    markers: &mut MarkerSet,
    offers: &[SkillOffer],
) {
    let removed = markers.len();
    markers.clear(map);

    for offer in offers {
        let Some(location) = offer.location else {
            continue;
        };

        let handle = map.add_marker(location, MarkerStyle::for_offer(offer));
        if let Some(previous) = markers.markers.insert(offer.id, handle) {
            map.remove_marker(previous);
        }
    }

    tracing::trace!("Replaced {} markers with {}", removed, markers.len());
}
