use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::core::{
    distance::calculate_bounding_box,
    markers::{CircleStyle, LayerHandle, MapBackend, MarkerKind, MarkerStyle},
};
use crate::models::{BoundingBox, GeoPoint};

/// A marker as it sits on the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLayer {
    pub handle: LayerHandle,
    pub position: GeoPoint,
    pub style: MarkerStyle,
}

/// A circle overlay as it sits on the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleLayer {
    pub handle: LayerHandle,
    pub center: GeoPoint,
    #[serde(rename = "radiusMeters")]
    pub radius_meters: f64,
    pub style: CircleStyle,
}

#[derive(Debug, Clone, PartialEq)]
enum Layer {
    Marker(MarkerLayer),
    Circle(CircleLayer),
}

/// Serializable view of a scene, replayed by the browser into its map library
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub center: Option<GeoPoint>,
    pub zoom: Option<u8>,
    pub bounds: Option<BoundingBox>,
    pub circle: Option<CircleLayer>,
    #[serde(rename = "circleCount")]
    pub circle_count: usize,
    pub user: Option<MarkerLayer>,
    pub markers: Vec<MarkerLayer>,
}

/// In-memory map backend
///
/// Keeps every live layer by handle so the HTTP layer can ship the rendered
/// view as JSON instead of drawing tiles itself.
#[derive(Debug, Default)]
pub struct MapScene {
    view: Option<(GeoPoint, u8)>,
    layers: BTreeMap<LayerHandle, Layer>,
    next_handle: u64,
}

impl MapScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> LayerHandle {
        self.next_handle += 1;
        LayerHandle(self.next_handle)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn marker_count(&self) -> usize {
        self.layers
            .values()
            .filter(|layer| matches!(layer, Layer::Marker(_)))
            .count()
    }

    pub fn snapshot(&self) -> MapSnapshot {
        let mut snapshot = MapSnapshot {
            center: self.view.map(|(center, _)| center),
            zoom: self.view.map(|(_, zoom)| zoom),
            ..Default::default()
        };

        // Handles are allocated in increasing order, so the last circle and
        // user marker seen are the most recent ones.
        for layer in self.layers.values() {
            match layer {
                Layer::Marker(marker) if marker.style.kind == MarkerKind::User => {
                    snapshot.user = Some(marker.clone());
                }
                Layer::Marker(marker) => snapshot.markers.push(marker.clone()),
                Layer::Circle(circle) => {
                    snapshot.circle_count += 1;
                    snapshot.circle = Some(circle.clone());
                }
            }
        }

        snapshot.bounds = snapshot
            .circle
            .as_ref()
            .map(|circle| calculate_bounding_box(circle.center, circle.radius_meters / 1000.0));

        snapshot
    }
}

impl MapBackend for MapScene {
    fn set_view(&mut self, center: GeoPoint, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn add_marker(&mut self, point: GeoPoint, style: MarkerStyle) -> LayerHandle {
        let handle = self.allocate();
        self.layers.insert(handle, Layer::Marker(MarkerLayer { handle, position: point, style }));
        handle
    }

    fn remove_marker(&mut self, handle: LayerHandle) {
        if self.layers.remove(&handle).is_none() {
            tracing::trace!("Ignoring removal of unknown layer {:?}", handle);
        }
    }

    fn draw_circle(&mut self, center: GeoPoint, radius_meters: f64, style: CircleStyle) -> LayerHandle {
        let handle = self.allocate();
        self.layers.insert(
            handle,
            Layer::Circle(CircleLayer { handle, center, radius_meters, style }),
        );
        handle
    }
}
