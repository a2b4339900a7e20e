mod catalog;

pub use catalog::{Catalog, SatelliteRecord};
