mod elements;
mod error;
mod track;

pub use elements::OrbitalElements;
pub use error::PropagationError;
pub use track::{fallback_track, propagate_track, GroundTrackPoint, TRACK_STEP_MINUTES};
