/// Zoom used when the radius exceeds every band
pub const WIDEST_ZOOM: u8 = 8;

/// Upper radius bound (km) of each band and its zoom level, tightest first
const ZOOM_BANDS: [(f64, u8); 6] = [
    (1.0, 15),
    (2.0, 14),
    (5.0, 13),
    (10.0, 12),
    (25.0, 10),
    (50.0, 9),
];

/// Map zoom that keeps a radius circle of `radius_km` on screen
#[inline]
pub fn zoom_level_for_radius(radius_km: f64) -> u8 {
    ZOOM_BANDS
        .iter()
        .find(|(max_radius, _)| radius_km <= *max_radius)
        .map(|(_, zoom)| *zoom)
        .unwrap_or(WIDEST_ZOOM)
}
