use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use rand::seq::SliceRandom;
use rand::Rng;

/// One catalog entry: a satellite name and its raw two-line element set.
///
/// The lines are kept verbatim and parsed into [`crate::orbit::OrbitalElements`]
/// only when a track is requested.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteRecord {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

#[derive(Debug)]
struct CatalogData {
    /// Names in source order. May list names that have no record and may
    /// repeat a name the source repeated; `count()` follows this list.
    names: Vec<String>,
    records: HashMap<String, SatelliteRecord>,
}

/// Process-lifetime satellite registry.
///
/// Populated once by whichever `load` call runs first and immutable
/// afterwards, so readers need no locking. Concurrent first calls race
/// benignly on the init guard. Share it as `Arc<Catalog>`.
#[derive(Debug, Default)]
pub struct Catalog {
    inner: OnceLock<CatalogData>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the catalog from a TLE file.
    ///
    /// Never fails: an unreadable source or one without a single usable
    /// entry degrades to the built-in fallback set (warn-logged), and the
    /// catalog still reports ready. Calling again once loaded is a no-op.
    pub fn load(&self, path: &Path) -> bool {
        match fs::read_to_string(path) {
            Ok(text) => self.load_from_str(&text),
            Err(e) => {
                log::warn!(
                    "cannot read catalog source {}: {e}; using built-in fallback set",
                    path.display()
                );
                self.inner.get_or_init(CatalogData::fallback);
                true
            }
        }
    }

    /// Same as [`Catalog::load`], from in-memory text.
    pub fn load_from_str(&self, source: &str) -> bool {
        let data = self
            .inner
            .get_or_init(|| CatalogData::parse_or_fallback(source));
        log::info!("satellite catalog ready ({} names)", data.names.len());
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.get().is_some()
    }

    /// Number of catalog names (not records); zero before any load.
    pub fn count(&self) -> usize {
        self.data().map_or(0, |d| d.names.len())
    }

    /// All names in source order.
    pub fn all_names(&self) -> &[String] {
        self.data().map_or(&[], |d| d.names.as_slice())
    }

    pub fn get(&self, name: &str) -> Option<&SatelliteRecord> {
        self.data()?.records.get(name)
    }

    /// Uniform-random name, or None while the catalog is empty.
    pub fn random_name<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.data()?.names.choose(rng).map(String::as_str)
    }

    fn data(&self) -> Option<&CatalogData> {
        self.inner.get()
    }
}

impl CatalogData {
    /// Parse repeating name / line 1 / line 2 groups.
    ///
    /// The stride is fixed at three lines, so a malformed group is dropped
    /// whole and parsing continues with the next group. Name lines are
    /// trimmed and stripped of double quotes; blank or `#`-prefixed names
    /// skip their group. A trailing incomplete group is ignored.
    fn parse(source: &str) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        let mut names = Vec::new();
        let mut records = HashMap::new();

        let mut i = 0;
        while i + 2 < lines.len() {
            let raw_name = lines[i].trim();
            let line1 = lines[i + 1].trim();
            let line2 = lines[i + 2].trim();

            if !raw_name.is_empty() && !raw_name.starts_with('#') {
                let cleaned = raw_name.replace('"', "");
                let name = cleaned.trim();
                if !name.is_empty() && line1.starts_with("1 ") && line2.starts_with("2 ") {
                    names.push(name.to_string());
                    records.insert(
                        name.to_string(),
                        SatelliteRecord {
                            name: name.to_string(),
                            line1: line1.to_string(),
                            line2: line2.to_string(),
                        },
                    );
                }
            }

            i += 3;
        }

        Self { names, records }
    }

    fn parse_or_fallback(source: &str) -> Self {
        let data = Self::parse(source);
        if data.names.is_empty() {
            log::warn!("catalog source held no usable entries; using built-in fallback set");
            Self::fallback()
        } else {
            data
        }
    }

    /// Built-in set used whenever no source data is usable.
    ///
    /// Only the first entry carries an element set; track requests for the
    /// other names fail with `UnknownSatellite` and follow the usual
    /// degraded paths.
    fn fallback() -> Self {
        let names = [
            "IBUKI (GOSAT)",
            "HAYABUSA2",
            "AKATSUKI",
            "HINODE",
            "ALOS-2",
            "GPM Core Observatory",
            "SHIZUKU (GCOM-W1)",
            "DAICHI-2 (ALOS-2)",
            "MICHIBIKI",
            "KAGUYA",
        ]
        .map(String::from)
        .to_vec();

        let mut records = HashMap::new();
        records.insert(
            "IBUKI (GOSAT)".to_string(),
            SatelliteRecord {
                name: "IBUKI (GOSAT)".to_string(),
                line1: "1 33492U 09005A   24277.50000000  .00000100  00000-0  00000-0 0  9990"
                    .to_string(),
                line2: "2 33492  98.0000 000.0000 0000000  00.0000 000.0000 14.00000000000000"
                    .to_string(),
            },
        );

        Self { names, records }
    }
}
