use thiserror::Error;

/// Reasons a ground track cannot be computed for a satellite.
///
/// None of these are fatal: the destiny-partner flow substitutes the
/// synthetic fallback track, the nearby-satellite scan skips the satellite.
#[derive(Debug, Error, PartialEq)]
pub enum PropagationError {
    #[error("satellite not in catalog: {0}")]
    UnknownSatellite(String),
    #[error("malformed element set: {0}")]
    Malformed(String),
    #[error("unusable element set: {0}")]
    Degenerate(String),
}
