use serde::Serialize;

use super::elements::OrbitalElements;
use super::error::PropagationError;

/// Sampling cadence of every ground track, in simulated minutes.
pub const TRACK_STEP_MINUTES: u64 = 5;

/// Earth rotation rate used for the longitude drift, degrees per hour.
const EARTH_ROTATION_DEG_PER_HOUR: f64 = 15.0;

/// Anchor of the synthetic fallback track (Tokyo).
const FALLBACK_ANCHOR_LAT_DEG: f64 = 35.6762;
const FALLBACK_ANCHOR_LNG_DEG: f64 = 139.6503;

/// A sub-satellite point. Tracks are chronological, one point per
/// [`TRACK_STEP_MINUTES`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct GroundTrackPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

/// Compute the ground track for an element set over `duration_hours`.
///
/// A geometric sketch rather than real orbital mechanics: the mean anomaly
/// advances linearly and the latitude oscillates with the inclination as
/// its amplitude, while the longitude drifts westward at 15°/hour.
/// Zero hours yields an empty track.
pub fn propagate_track(
    elements: &OrbitalElements,
    duration_hours: u32,
) -> Result<Vec<GroundTrackPoint>, PropagationError> {
    let mean_motion = elements.mean_motion_rev_per_day;
    if !mean_motion.is_finite() || mean_motion <= 0.0 {
        return Err(PropagationError::Degenerate(format!(
            "mean motion must be positive, got {mean_motion}"
        )));
    }

    let period_minutes = elements.orbital_period_minutes();
    let total_minutes = duration_hours as u64 * 60;
    let mut points = Vec::with_capacity((total_minutes / TRACK_STEP_MINUTES) as usize);

    for minutes in (0..total_minutes).step_by(TRACK_STEP_MINUTES as usize) {
        let m = minutes as f64;

        let delta_mean_anomaly = 360.0 * m / period_minutes;
        let current_mean_anomaly =
            (elements.mean_anomaly_deg + delta_mean_anomaly).rem_euclid(360.0);
        // Eccentricity correction deliberately omitted.
        let true_anomaly = current_mean_anomaly;
        let orbit_angle = (elements.arg_perigee_deg + true_anomaly).rem_euclid(360.0);

        let longitude_shift = (m / 60.0) * EARTH_ROTATION_DEG_PER_HOUR;

        let latitude_deg =
            (elements.inclination_deg * orbit_angle.to_radians().sin()).clamp(-90.0, 90.0);
        let longitude_deg =
            wrap_longitude_deg(elements.raan_deg + orbit_angle - longitude_shift);

        points.push(GroundTrackPoint {
            latitude_deg,
            longitude_deg,
        });
    }

    Ok(points)
}

/// Synthetic track used when a satellite's elements are unusable.
///
/// Same cadence and point count as [`propagate_track`], oscillating around
/// the Tokyo anchor. The latitude is not range-checked here; the current
/// amplitude keeps it inside ±90 but nothing enforces that.
pub fn fallback_track(duration_hours: u32) -> Vec<GroundTrackPoint> {
    let total_minutes = duration_hours as u64 * 60;
    let mut points = Vec::with_capacity((total_minutes / TRACK_STEP_MINUTES) as usize);

    for minutes in (0..total_minutes).step_by(TRACK_STEP_MINUTES as usize) {
        let hours = minutes as f64 / 60.0;

        let latitude_deg = FALLBACK_ANCHOR_LAT_DEG + 25.0 * (0.5 * hours).sin();
        let longitude_deg = wrap_longitude_deg(
            FALLBACK_ANCHOR_LNG_DEG + hours * EARTH_ROTATION_DEG_PER_HOUR
                + 10.0 * (0.3 * hours).cos(),
        );

        points.push(GroundTrackPoint {
            latitude_deg,
            longitude_deg,
        });
    }

    points
}

/// Map an unbounded degree value into (-180, 180].
fn wrap_longitude_deg(raw: f64) -> f64 {
    let wrapped = raw.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
