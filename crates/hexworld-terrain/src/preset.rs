//! Ready-made category tables.

use crate::{CategoryId, CategoryRegistry, Rgba, TerrainError, ThresholdTable};

/// A category registry together with the threshold table over it.
#[derive(Clone, Debug)]
pub struct TerrainPreset {
    /// Every category the table (and any polar override) can produce.
    pub registry: CategoryRegistry,
    /// Descending elevation bands.
    pub table: ThresholdTable,
}

impl TerrainPreset {
    /// Build a preset from `(threshold, name, color)` entries in descending
    /// order, the last one without threshold. A name listed twice maps to one
    /// category keeping its first color.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidThresholdTable`] for a malformed table.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = (Option<f64>, &'a str, Rgba)>,
    ) -> Result<Self, TerrainError> {
        let mut registry = CategoryRegistry::new();
        let resolved: Vec<(Option<f64>, CategoryId)> = entries
            .into_iter()
            .map(|(threshold, name, color)| (threshold, registry.ensure(name, color)))
            .collect();
        let table = ThresholdTable::from_entries(&resolved)?;
        Ok(Self { registry, table })
    }

    /// Eight bands tuned for Goldberg meshes: ice, five land shades, two waters.
    pub fn goldberg() -> Self {
        Self::from_static(&[
            (Some(0.55), "ice1", [0xE3, 0xF2, 0xFD]),
            (Some(0.5), "land5", [0x1C, 0x0D, 0x13]),
            (Some(0.45), "land4", [0x36, 0x22, 0x11]),
            (Some(0.3), "land3", [0x57, 0x63, 0x48]),
            (Some(0.15), "land2", [0x6E, 0x87, 0x6E]),
            (Some(0.0), "land1", [0x55, 0x87, 0x47]),
            (Some(-0.1), "water1", [0x09, 0x0A, 0x59]),
            (None, "water2", [0x0A, 0x0B, 0x46]),
        ])
    }

    /// Ten bands tuned for the orthographic globe: shallower coastal waters.
    pub fn globe() -> Self {
        Self::from_static(&[
            (Some(0.6), "ice", [0xE3, 0xF2, 0xFD]),
            (Some(0.55), "land5", [0x1C, 0x0D, 0x13]),
            (Some(0.45), "land4", [0x36, 0x22, 0x11]),
            (Some(0.35), "land3", [0x57, 0x63, 0x48]),
            (Some(0.25), "land2", [0x6E, 0x87, 0x6E]),
            (Some(0.1), "land1", [0x55, 0x87, 0x47]),
            (Some(0.05), "water1", [0x43, 0x6D, 0xC5]),
            (Some(0.0), "water2", [0x20, 0x31, 0xA8]),
            (Some(-0.05), "water3", [0x09, 0x0A, 0x59]),
            (None, "water4", [0x0A, 0x0B, 0x46]),
        ])
    }

    fn from_static(entries: &[(Option<f64>, &'static str, [u8; 3])]) -> Self {
        Self::from_entries(
            entries
                .iter()
                .map(|&(threshold, name, [r, g, b])| (threshold, name, Rgba([r, g, b, 0xFF]))),
        )
        .expect("built-in presets descend strictly and end with a catch-all")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goldberg_preset() {
        let preset = TerrainPreset::goldberg();
        assert_eq!(preset.registry.len(), 8);
        assert_eq!(preset.table.bands().len(), 7);
        let land1 = preset.registry.lookup_by_name("land1").unwrap();
        let water1 = preset.registry.lookup_by_name("water1").unwrap();
        assert_eq!(preset.table.lookup(0.0), water1);
        assert_eq!(preset.table.lookup(0.01), land1);
    }

    #[test]
    fn test_globe_preset() {
        let preset = TerrainPreset::globe();
        assert_eq!(preset.registry.len(), 10);
        let ice = preset.registry.lookup_by_name("ice").unwrap();
        let land5 = preset.registry.lookup_by_name("land5").unwrap();
        assert_eq!(preset.table.lookup(0.6), land5);
        assert_eq!(preset.table.lookup(0.61), ice);
        assert_eq!(
            preset.registry.get(ice).unwrap().color,
            Rgba([0xE3, 0xF2, 0xFD, 0xFF])
        );
    }

    #[test]
    fn test_from_entries() {
        let gray = Rgba::GRAY;
        let preset = TerrainPreset::from_entries([
            (Some(0.55), "ice", gray),
            (Some(0.5), "rock", gray),
            (None, "water", gray),
        ])
        .unwrap();
        let rock = preset.registry.lookup_by_name("rock").unwrap();
        assert_eq!(preset.table.lookup(0.55), rock);
    }

    #[test]
    fn test_repeated_name_shares_category() {
        let preset = TerrainPreset::from_entries([
            (Some(0.5), "water", Rgba::GRAY),
            (Some(0.0), "land", Rgba::GRAY),
            (None, "water", Rgba([0, 0, 0, 0])),
        ])
        .unwrap();
        assert_eq!(preset.registry.len(), 2);
        assert_eq!(preset.table.lookup(0.9), preset.table.lookup(-0.9));
    }

    #[test]
    fn test_from_entries_rejects_bad_table() {
        let result = TerrainPreset::from_entries([(Some(0.1), "a", Rgba::GRAY)]);
        assert!(matches!(result, Err(TerrainError::InvalidThresholdTable(_))));
    }
}
