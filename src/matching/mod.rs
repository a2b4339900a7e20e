use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::geo;
use crate::orbit::{propagate_track, GroundTrackPoint, OrbitalElements, PropagationError};

/// How many catalog entries a near-point scan looks at, in source order.
const SCAN_WINDOW: usize = 20;
/// Proximity matches that end the scan early.
const SCAN_MATCH_CAP: usize = 5;
/// Results are padded with random names up to this floor.
const SCAN_RESULT_FLOOR: usize = 3;
/// Per-satellite track length used while scanning, in hours.
const SCAN_TRACK_HOURS_CAP: u32 = 4;

/// A user and their last reported position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserPosition {
    pub user_id: i64,
    pub lat: f64,
    pub lng: f64,
}

/// Ground track for a named catalog entry.
///
/// Fails with `UnknownSatellite` when the catalog has no record for the
/// name; element parsing and propagation errors pass through. Callers
/// decide whether to substitute the synthetic track or skip the satellite.
pub fn catalog_ground_track(
    catalog: &Catalog,
    satellite_name: &str,
    duration_hours: u32,
) -> Result<Vec<GroundTrackPoint>, PropagationError> {
    let record = catalog
        .get(satellite_name)
        .ok_or_else(|| PropagationError::UnknownSatellite(satellite_name.to_string()))?;
    log::debug!("computing ground track for {} over {duration_hours} h", record.name);
    let elements = OrbitalElements::from_tle_line2(&record.line2)?;
    propagate_track(&elements, duration_hours)
}

/// Users that come within `tolerance_km` of any track point.
///
/// Each user is checked against the track until the first hit. On top of
/// the true matches, the first user in `users` is always appended, matched
/// or not, so the result can contain that user twice and is never empty
/// for non-empty input.
pub fn find_users_near_track(
    track: &[GroundTrackPoint],
    users: &[UserPosition],
    tolerance_km: f64,
) -> Vec<UserPosition> {
    let mut matched = Vec::new();

    for user in users {
        let hit = track.iter().any(|point| {
            geo::distance_km(user.lat, user.lng, point.latitude_deg, point.longitude_deg)
                <= tolerance_km
        });
        if hit {
            matched.push(*user);
        }
    }

    if let Some(first) = users.first() {
        matched.push(*first);
    }

    matched
}

/// Satellite names whose track passes within `tolerance_km` of a point.
///
/// Scans the first [`SCAN_WINDOW`] catalog names in order and stops once
/// [`SCAN_MATCH_CAP`] of them have matched. Each candidate is propagated
/// over `min(time_hours, 4)` hours; one whose elements cannot be
/// propagated is skipped. When fewer than [`SCAN_RESULT_FLOOR`] names
/// match, the result is padded with a random sample of the remaining
/// scanned names, so a non-empty catalog always yields at least
/// `min(3, scanned)` names.
pub fn find_satellites_near_point<R: Rng + ?Sized>(
    lat: f64,
    lng: f64,
    tolerance_km: f64,
    time_hours: u32,
    catalog: &Catalog,
    rng: &mut R,
) -> Vec<String> {
    let names = catalog.all_names();
    let window = &names[..names.len().min(SCAN_WINDOW)];
    let track_hours = time_hours.min(SCAN_TRACK_HOURS_CAP);

    let mut matched: Vec<String> = Vec::new();

    for name in window {
        match catalog_ground_track(catalog, name, track_hours) {
            Ok(track) => {
                for point in &track {
                    let d = geo::distance_km(lat, lng, point.latitude_deg, point.longitude_deg);
                    if d <= tolerance_km {
                        log::debug!("{name} passes {d:.2} km from ({lat}, {lng})");
                        matched.push(name.clone());
                        break;
                    }
                }
            }
            Err(e) => {
                log::debug!("skipping {name}: {e}");
            }
        }

        if matched.len() >= SCAN_MATCH_CAP {
            break;
        }
    }

    if matched.len() < SCAN_RESULT_FLOOR {
        let pool: Vec<&String> = window.iter().filter(|n| !matched.contains(*n)).collect();
        let wanted = (SCAN_RESULT_FLOOR - matched.len()).min(pool.len());
        matched.extend(pool.choose_multiple(rng, wanted).map(|n| (*n).clone()));
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const LINE1: &str = "1 00000U 24001A   24001.00000000  .00000000  00000-0  00000-0 0  0000";

    /// Circular equatorial elements: every track point sits on the equator,
    /// starting at `raan_deg` east.
    fn equatorial_line2(raan_deg: f64, mean_motion: f64) -> String {
        format!("2 00000   0.0000 {raan_deg:>8.4} 0000000   0.0000   0.0000 {mean_motion:>11.8}00000")
    }

    fn catalog_from(entries: &[(&str, &str)]) -> Catalog {
        let mut source = String::new();
        for (name, line2) in entries {
            source.push_str(name);
            source.push('\n');
            source.push_str(LINE1);
            source.push('\n');
            source.push_str(line2);
            source.push('\n');
        }
        let catalog = Catalog::new();
        catalog.load_from_str(&source);
        catalog
    }

    fn point(latitude_deg: f64, longitude_deg: f64) -> GroundTrackPoint {
        GroundTrackPoint {
            latitude_deg,
            longitude_deg,
        }
    }

    fn user(user_id: i64, lat: f64, lng: f64) -> UserPosition {
        UserPosition { user_id, lat, lng }
    }

    #[test]
    fn users_within_tolerance_are_matched_in_order() {
        let track = vec![point(0.0, 0.0), point(10.0, 20.0)];
        let users = vec![user(1, 50.0, 50.0), user(2, 10.0, 20.0), user(3, 0.0, 0.0)];

        let matched = find_users_near_track(&track, &users, 1.0);

        let ids: Vec<i64> = matched.iter().map(|u| u.user_id).collect();
        // Users 2 and 3 truly match; user 1 rides along as the forced first.
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn first_user_is_included_even_without_a_match() {
        // Suspicious but deliberate: the first user is appended whether or
        // not any track point is near them.
        let track = vec![point(80.0, 100.0)];
        let users = vec![user(7, 0.0, 0.0)];

        let matched = find_users_near_track(&track, &users, 1.0);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].user_id, 7);
    }

    #[test]
    fn first_user_appears_twice_when_matched() {
        let track = vec![point(0.0, 0.0)];
        let users = vec![user(1, 0.0, 0.0), user(2, 40.0, 40.0)];

        let matched = find_users_near_track(&track, &users, 1.0);
        let ids: Vec<i64> = matched.iter().map(|u| u.user_id).collect();
        assert_eq!(ids, [1, 1]);
    }

    #[test]
    fn no_users_means_no_matches() {
        let track = vec![point(0.0, 0.0)];
        assert!(find_users_near_track(&track, &[], 1.0).is_empty());
    }

    #[test]
    fn ground_track_for_unknown_name_fails() {
        let catalog = catalog_from(&[("ALPHA", &equatorial_line2(0.0, 14.0))]);
        let err = catalog_ground_track(&catalog, "NOPE", 2).unwrap_err();
        assert_eq!(err, PropagationError::UnknownSatellite("NOPE".to_string()));
    }

    #[test]
    fn ground_track_for_known_name_has_expected_cadence() {
        let catalog = catalog_from(&[("ALPHA", &equatorial_line2(0.0, 14.0))]);
        let track = catalog_ground_track(&catalog, "ALPHA", 2).unwrap();
        assert_eq!(track.len(), 24);
    }

    #[test]
    fn ground_track_surfaces_malformed_elements() {
        let catalog = catalog_from(&[("ALPHA", "2 00000 not-a-number at all, really not")]);
        let err = catalog_ground_track(&catalog, "ALPHA", 2).unwrap_err();
        assert!(matches!(err, PropagationError::Malformed(_)));
    }

    #[test]
    fn scan_stops_at_five_matches() {
        // Seven equatorial satellites all crossing (0, 0) at the first step.
        let line2 = equatorial_line2(0.0, 14.0);
        let entries: Vec<(String, &str)> = (0..7)
            .map(|i| (format!("SAT-{i}"), line2.as_str()))
            .collect();
        let borrowed: Vec<(&str, &str)> = entries.iter().map(|(n, l)| (n.as_str(), *l)).collect();
        let catalog = catalog_from(&borrowed);

        let mut rng = StdRng::seed_from_u64(1);
        let found = find_satellites_near_point(0.0, 0.0, 1.0, 24, &catalog, &mut rng);

        assert_eq!(found, ["SAT-0", "SAT-1", "SAT-2", "SAT-3", "SAT-4"]);
    }

    #[test]
    fn scan_pads_to_three_from_the_window() {
        // One real match at (0, 0); the others stay on the far side.
        let near = equatorial_line2(0.0, 14.0);
        let far_a = equatorial_line2(120.0, 14.0);
        let far_b = equatorial_line2(150.0, 14.0);
        let far_c = equatorial_line2(170.0, 14.0);
        let catalog = catalog_from(&[
            ("NEAR", &near),
            ("FAR-A", &far_a),
            ("FAR-B", &far_b),
            ("FAR-C", &far_c),
        ]);

        let mut rng = StdRng::seed_from_u64(2);
        let found = find_satellites_near_point(0.0, 0.0, 1.0, 1, &catalog, &mut rng);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0], "NEAR");
        assert!(!found[1..].contains(&"NEAR".to_string()));
        for name in &found[1..] {
            assert!(catalog.all_names().contains(name));
        }
    }

    #[test]
    fn scan_with_zero_hours_still_pads() {
        let far = equatorial_line2(120.0, 14.0);
        let catalog = catalog_from(&[("ONLY", &far)]);

        let mut rng = StdRng::seed_from_u64(3);
        let found = find_satellites_near_point(0.0, 0.0, 1.0, 0, &catalog, &mut rng);
        // Zero-hour tracks are empty, so nothing matches; padding still runs.
        assert_eq!(found, ["ONLY"]);
    }

    #[test]
    fn scan_skips_satellites_that_fail_to_propagate() {
        let near = equatorial_line2(0.0, 14.0);
        let catalog = catalog_from(&[
            ("BROKEN", "2 00000 garbage fields that do not parse here"),
            ("NEAR", &near),
        ]);

        let mut rng = StdRng::seed_from_u64(4);
        let found = find_satellites_near_point(0.0, 0.0, 1.0, 1, &catalog, &mut rng);
        // BROKEN never matches via proximity, only via padding.
        assert_eq!(found[0], "NEAR");
        assert_eq!(found.len(), 2);
        assert!(found.contains(&"BROKEN".to_string()));
    }

    #[test]
    fn scan_looks_at_twenty_names_at_most() {
        // 25 satellites, none near the probe point at (50, 0).
        let line2 = equatorial_line2(120.0, 14.0);
        let entries: Vec<(String, &str)> = (0..25)
            .map(|i| (format!("SAT-{i:02}"), line2.as_str()))
            .collect();
        let borrowed: Vec<(&str, &str)> = entries.iter().map(|(n, l)| (n.as_str(), *l)).collect();
        let catalog = catalog_from(&borrowed);

        let mut rng = StdRng::seed_from_u64(5);
        let found = find_satellites_near_point(50.0, 0.0, 1.0, 4, &catalog, &mut rng);

        assert_eq!(found.len(), 3);
        for name in &found {
            let index: usize = name["SAT-".len()..].parse().unwrap();
            assert!(index < 20, "{name} lies outside the scan window");
        }
    }

    #[test]
    fn scan_of_fallback_catalog_returns_three_names() {
        // Only one fallback name has a record; the rest pad in at random.
        let catalog = Catalog::new();
        catalog.load(std::path::Path::new("/no/such/tle.dat"));

        let mut rng = StdRng::seed_from_u64(6);
        let found = find_satellites_near_point(0.0, 0.0, 1.0, 24, &catalog, &mut rng);

        assert_eq!(found.len(), 3);
        assert_eq!(found[0], "IBUKI (GOSAT)");
        for name in &found {
            assert!(catalog.all_names().contains(name));
        }
    }
}
