use super::error::PropagationError;

const MINUTES_PER_DAY: f64 = 1440.0;

/// Simplified TLE-derived orbital elements.
///
/// Only the six classical angles/rates the ground-track model consumes;
/// epoch, drag and higher-order terms are deliberately not carried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub eccentricity: f64,
    pub arg_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
    pub mean_motion_rev_per_day: f64,
}

impl OrbitalElements {
    /// Parse the element set from TLE line 2.
    ///
    /// Fixed column ranges per the TLE format; each field is trimmed and
    /// parsed as a float. Line 1 carries nothing this model needs.
    pub fn from_tle_line2(line2: &str) -> Result<Self, PropagationError> {
        let inclination_deg = field(line2, 8..16, "inclination")?;
        let raan_deg = field(line2, 17..25, "raan")?;
        let eccentricity = {
            let digits = slice(line2, 26..33, "eccentricity")?;
            parse(&format!("0.{}", digits.trim()), "eccentricity")?
        };
        let arg_perigee_deg = field(line2, 34..42, "argument of perigee")?;
        let mean_anomaly_deg = field(line2, 43..51, "mean anomaly")?;
        let mean_motion_rev_per_day = field(line2, 52..63, "mean motion")?;

        Ok(Self {
            inclination_deg,
            raan_deg,
            eccentricity,
            arg_perigee_deg,
            mean_anomaly_deg,
            mean_motion_rev_per_day,
        })
    }

    /// Orbital period in minutes, derived from the mean motion.
    ///
    /// Only meaningful when `mean_motion_rev_per_day` is positive; the
    /// propagator rejects element sets where it is not.
    pub fn orbital_period_minutes(&self) -> f64 {
        MINUTES_PER_DAY / self.mean_motion_rev_per_day
    }
}

fn slice<'a>(
    line: &'a str,
    range: std::ops::Range<usize>,
    what: &str,
) -> Result<&'a str, PropagationError> {
    line.get(range)
        .ok_or_else(|| PropagationError::Malformed(format!("line 2 too short for {what}")))
}

fn field(line: &str, range: std::ops::Range<usize>, what: &str) -> Result<f64, PropagationError> {
    parse(slice(line, range, what)?.trim(), what)
}

fn parse(text: &str, what: &str) -> Result<f64, PropagationError> {
    text.parse::<f64>()
        .map_err(|_| PropagationError::Malformed(format!("bad {what}: {text:?}")))
}
