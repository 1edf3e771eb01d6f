//! Geodetic distance on the WGS-84 ellipsoid.

const WGS84_SEMI_MAJOR_M: f64 = 6_378_137.0;
const WGS84_E2: f64 = 6.694_379_990_14e-3;

/// Horizontal and vertical separation between two geodetic positions,
/// both in meters.
///
/// Horizontal distance comes from the meridian and prime-vertical radii of
/// curvature evaluated at the mean latitude, which keeps the function
/// symmetric in its arguments over landing-zone scales.
pub fn distance_wgs84(
    lat1_deg: f64,
    lon1_deg: f64,
    alt1_m: f32,
    lat2_deg: f64,
    lon2_deg: f64,
    alt2_m: f32,
) -> (f32, f32) {
    let lat_mid = ((lat1_deg + lat2_deg) / 2.0).to_radians();
    let sin_lat = lat_mid.sin();
    let w = (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    let meridian_radius = WGS84_SEMI_MAJOR_M * (1.0 - WGS84_E2) / (w * w * w);
    let prime_vertical_radius = WGS84_SEMI_MAJOR_M / w;

    let d_north = (lat2_deg - lat1_deg).to_radians() * meridian_radius;
    let d_east = (lon2_deg - lon1_deg).to_radians() * prime_vertical_radius * lat_mid.cos();

    let horizontal_m = d_north.hypot(d_east) as f32;
    let vertical_m = alt2_m - alt1_m;
    (horizontal_m, vertical_m)
}
