//! Per-cell terrain classification: polar override, then fBm elevation
//! scanned against a [`ThresholdTable`].

use glam::DVec3;
use hexworld_geodesic::{DualCell, latitude_deg};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{CategoryId, NoiseField, TerrainError, ThresholdTable};

/// A dual cell carrying a terrain category.
pub type TerrainCell = DualCell<CategoryId>;

/// Assigns a fixed category to cells poleward of a cutoff latitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarOverride {
    cutoff_deg: f64,
    category: CategoryId,
}

impl PolarOverride {
    /// Cutoff marking only the cells touching the poles.
    pub const INDICATOR_CUTOFF_DEG: f64 = 89.5;
    /// Cutoff at the polar circles.
    pub const ICE_CAP_CUTOFF_DEG: f64 = 66.5;

    /// Override cells whose `|latitude|` exceeds `cutoff_deg`.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidPolarCutoff`] outside `[0, 90]`.
    pub fn new(cutoff_deg: f64, category: CategoryId) -> Result<Self, TerrainError> {
        if !(0.0..=90.0).contains(&cutoff_deg) {
            return Err(TerrainError::InvalidPolarCutoff(cutoff_deg));
        }
        Ok(Self {
            cutoff_deg,
            category,
        })
    }

    /// Pole marker at 89.5°.
    pub fn indicator(category: CategoryId) -> Self {
        Self {
            cutoff_deg: Self::INDICATOR_CUTOFF_DEG,
            category,
        }
    }

    /// Ice caps beyond the polar circles at 66.5°.
    pub fn ice_cap(category: CategoryId) -> Self {
        Self {
            cutoff_deg: Self::ICE_CAP_CUTOFF_DEG,
            category,
        }
    }

    /// The cutoff latitude in degrees.
    pub fn cutoff_deg(&self) -> f64 {
        self.cutoff_deg
    }

    /// The category forced on polar cells.
    pub fn category(&self) -> CategoryId {
        self.category
    }

    fn applies(&self, centroid: DVec3) -> bool {
        latitude_deg(centroid).abs() > self.cutoff_deg
    }
}

/// Maps cell centroids to terrain categories.
///
/// Contains no category names: everything comes from the threshold table
/// and the optional polar override.
#[derive(Clone, Debug)]
pub struct TerrainClassifier {
    noise: NoiseField,
    table: ThresholdTable,
    polar: Option<PolarOverride>,
}

impl TerrainClassifier {
    /// Creates a classifier.
    pub fn new(noise: NoiseField, table: ThresholdTable, polar: Option<PolarOverride>) -> Self {
        Self {
            noise,
            table,
            polar,
        }
    }

    /// Noise elevation at `centroid`.
    pub fn elevation(&self, centroid: DVec3) -> f64 {
        self.noise.sample(centroid)
    }

    /// Category for a cell centered at `centroid`.
    ///
    /// Polar cells skip noise sampling entirely.
    pub fn classify(&self, centroid: DVec3) -> CategoryId {
        if let Some(polar) = &self.polar
            && polar.applies(centroid)
        {
            return polar.category;
        }
        self.classify_elevation(self.elevation(centroid))
    }

    /// Category for a raw elevation value.
    pub fn classify_elevation(&self, elevation: f64) -> CategoryId {
        self.table.lookup(elevation)
    }

    /// Classify every cell in place on the calling thread.
    pub fn classify_all(&self, cells: &mut [TerrainCell]) {
        for cell in cells.iter_mut() {
            cell.category = Some(self.classify(cell.centroid));
        }
    }

    /// Classify every cell in place on the rayon pool.
    ///
    /// `threads == 0` uses the global pool (one worker per logical CPU);
    /// otherwise a dedicated pool of `threads` workers is built for the call.
    /// Results are identical to [`TerrainClassifier::classify_all`].
    pub fn classify_all_parallel(&self, cells: &mut [TerrainCell], threads: usize) {
        let classify = |cells: &mut [TerrainCell]| {
            cells.par_iter_mut().for_each(|cell| {
                cell.category = Some(self.classify(cell.centroid));
            });
        };

        if threads == 0 {
            debug!(
                cells = cells.len(),
                threads = rayon::current_num_threads(),
                "classifying in parallel"
            );
            classify(cells);
            return;
        }

        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => {
                debug!(cells = cells.len(), threads, "classifying in parallel");
                pool.install(|| classify(cells));
            }
            Err(e) => {
                warn!("failed to build a {threads}-thread pool ({e}), using the global pool");
                classify(cells);
            }
        }
    }

    /// The noise field used for elevations.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// The threshold table.
    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }

    /// The polar override, if any.
    pub fn polar(&self) -> Option<&PolarOverride> {
        self.polar.as_ref()
    }
}
