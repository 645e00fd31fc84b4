//! Ordered elevation thresholds mapping noise values to categories.

use crate::{CategoryId, TerrainError};

/// One band of a threshold table: values strictly above `threshold` belong to
/// `category` unless an earlier band already claimed them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    /// Exclusive lower bound of the band.
    pub threshold: f64,
    /// Category assigned to values in the band.
    pub category: CategoryId,
}

/// Descending list of bands plus a catch-all category.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdTable {
    bands: Vec<Band>,
    fallback: CategoryId,
}

impl ThresholdTable {
    /// Build a table from bands in descending threshold order.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidThresholdTable`] if a threshold is not
    /// finite or thresholds are not strictly descending.
    pub fn new(bands: Vec<Band>, fallback: CategoryId) -> Result<Self, TerrainError> {
        if let Some(band) = bands.iter().find(|b| !b.threshold.is_finite()) {
            return Err(TerrainError::InvalidThresholdTable(format!(
                "threshold {} is not finite",
                band.threshold
            )));
        }
        if let Some(pair) = bands.windows(2).find(|w| w[1].threshold >= w[0].threshold) {
            return Err(TerrainError::InvalidThresholdTable(format!(
                "thresholds must descend strictly, found {} before {}",
                pair[0].threshold, pair[1].threshold
            )));
        }
        Ok(Self { bands, fallback })
    }

    /// Build a table from `(threshold, category)` entries where only the last
    /// entry has no threshold.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidThresholdTable`] if the list is empty,
    /// the last entry has a threshold, an earlier entry lacks one, or the
    /// thresholds are not strictly descending.
    pub fn from_entries(entries: &[(Option<f64>, CategoryId)]) -> Result<Self, TerrainError> {
        let Some((&(last_threshold, fallback), rest)) = entries.split_last() else {
            return Err(TerrainError::InvalidThresholdTable(
                "table has no entries".into(),
            ));
        };
        if last_threshold.is_some() {
            return Err(TerrainError::InvalidThresholdTable(
                "final entry must be a catch-all without threshold".into(),
            ));
        }

        let bands = rest
            .iter()
            .enumerate()
            .map(|(i, &(threshold, category))| {
                threshold
                    .map(|threshold| Band {
                        threshold,
                        category,
                    })
                    .ok_or_else(|| {
                        TerrainError::InvalidThresholdTable(format!(
                            "entry {i} has no threshold but is not the last entry"
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(bands, fallback)
    }

    /// Category of the first band whose threshold `value` strictly exceeds,
    /// or the fallback. NaN falls through to the fallback.
    pub fn lookup(&self, value: f64) -> CategoryId {
        self.bands
            .iter()
            .find(|band| value > band.threshold)
            .map_or(self.fallback, |band| band.category)
    }

    /// Bands in descending order.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// The catch-all category.
    pub fn fallback(&self) -> CategoryId {
        self.fallback
    }
}
