//! Great-circle geometry shared by the orbit and matching modules.

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two points, in kilometers.
///
/// All inputs in degrees. Symmetric in its arguments and never larger
/// than half the Earth's circumference (~20015 km).
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();
    let lat1r = lat1.to_radians();
    let lat2r = lat2.to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1r.cos() * lat2r.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn zero_for_coincident_points() {
        let d = distance_km(35.6762, 139.6503, 35.6762, 139.6503);
        assert!(approx_eq(d, 0.0, 1e-9), "same point distance = {d}");
    }

    #[test]
    fn symmetric_in_arguments() {
        let ab = distance_km(40.7128, -74.0060, 51.5074, -0.1278);
        let ba = distance_km(51.5074, -0.1278, 40.7128, -74.0060);
        assert!(approx_eq(ab, ba, 1e-9), "ab = {ab}, ba = {ba}");
    }

    #[test]
    fn known_distance_nyc_london() {
        // New York (40.7128, -74.0060) to London (51.5074, -0.1278) ~ 5570 km
        let d = distance_km(40.7128, -74.0060, 51.5074, -0.1278);
        assert!(d > 5500.0 && d < 5650.0, "NYC-London distance = {d} km");
    }

    #[test]
    fn one_degree_of_latitude() {
        // ~111 km per degree of latitude at the equator
        let d = distance_km(0.0, 0.0, 1.0, 0.0);
        assert!(approx_eq(d, 111.19, 1.0), "one degree latitude = {d} km");
    }

    #[test]
    fn bounded_by_half_circumference() {
        // Antipodal points are the worst case.
        let d = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!(d <= 20015.1, "antipodal distance = {d} km");
        let d = distance_km(90.0, 0.0, -90.0, 0.0);
        assert!(d <= 20015.1, "pole-to-pole distance = {d} km");
    }
}
