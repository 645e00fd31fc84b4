//! Typed per-cell updates for rendering collaborators.

use hexworld_geodesic::CellId;
use hexworld_terrain::{CategoryId, CategoryRegistry, Rgba, TerrainCell};

use crate::Grid;

/// A change a renderer should apply to one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellUpdate {
    /// The cell was classified as `category`.
    Category {
        /// Target cell.
        cell: CellId,
        /// Assigned category.
        category: CategoryId,
    },
    /// The cell should be drawn with `color`.
    Color {
        /// Target cell.
        cell: CellId,
        /// Display color.
        color: Rgba,
    },
}

impl CellUpdate {
    /// The cell this update targets.
    pub fn cell(&self) -> CellId {
        match *self {
            Self::Category { cell, .. } | Self::Color { cell, .. } => cell,
        }
    }
}

/// Category colors plus the hover highlight.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba>,
    highlight: Rgba,
}

impl Palette {
    /// Colors taken from each category's definition.
    pub fn from_registry(registry: &CategoryRegistry, highlight: Rgba) -> Self {
        Self {
            colors: registry.iter().map(|(_, def)| def.color).collect(),
            highlight,
        }
    }

    /// Color of `category`, gray if unknown.
    pub fn color_of(&self, category: CategoryId) -> Rgba {
        self.colors
            .get(category.0 as usize)
            .copied()
            .unwrap_or(Rgba::GRAY)
    }

    /// Color used for the hovered cell.
    pub fn highlight(&self) -> Rgba {
        self.highlight
    }

    /// Display color of a single cell: the highlight when hovered, otherwise
    /// its category color (gray while unclassified).
    pub fn cell_color(&self, cell: &TerrainCell) -> Rgba {
        if cell.hovered {
            self.highlight
        } else {
            cell.category.map_or(Rgba::GRAY, |c| self.color_of(c))
        }
    }

    /// One [`CellUpdate::Color`] per cell of `grid`, in id order.
    pub fn color_updates(&self, grid: &Grid) -> Vec<CellUpdate> {
        grid.cells()
            .iter()
            .map(|cell| CellUpdate::Color {
                cell: cell.id,
                color: self.cell_color(cell),
            })
            .collect()
    }

    /// Color updates for just `cells`, e.g. those returned by
    /// [`Grid::set_hovered`].
    pub fn refresh(&self, grid: &Grid, cells: &[CellId]) -> Vec<CellUpdate> {
        cells
            .iter()
            .filter_map(|&id| grid.cell(id))
            .map(|cell| CellUpdate::Color {
                cell: cell.id,
                color: self.cell_color(cell),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GridService, GridSettings};

    fn generate() -> (Grid, Palette) {
        let mut settings = GridSettings::with_frequency(2, 0);
        settings.noise.seed = Some(3);
        let service = GridService::new(settings);
        let grid = service.generate().unwrap();
        (grid, service.palette())
    }

    #[test]
    fn test_palette_from_registry() {
        let mut registry = CategoryRegistry::new();
        let sea = registry.ensure("sea", Rgba([0, 0, 0xFF, 0xFF]));
        let palette = Palette::from_registry(&registry, Rgba([0xFF, 0, 0, 0xFF]));
        assert_eq!(palette.color_of(sea), Rgba([0, 0, 0xFF, 0xFF]));
        assert_eq!(palette.color_of(CategoryId(9)), Rgba::GRAY);
    }

    #[test]
    fn test_color_updates_follow_categories() {
        let (grid, palette) = generate();
        let updates = palette.color_updates(&grid);
        assert_eq!(updates.len(), grid.len());
        for (cell, update) in grid.cells().iter().zip(&updates) {
            assert_eq!(update.cell(), cell.id);
            assert_eq!(
                *update,
                CellUpdate::Color {
                    cell: cell.id,
                    color: palette.color_of(cell.category.unwrap()),
                }
            );
        }
    }

    #[test]
    fn test_hovered_cell_highlighted() {
        let (mut grid, palette) = generate();
        let changed = grid.set_hovered(CellId(7), true).unwrap();
        let updates = palette.refresh(&grid, &changed);
        assert_eq!(
            updates,
            vec![CellUpdate::Color {
                cell: CellId(7),
                color: palette.highlight(),
            }]
        );

        let changed = grid.set_hovered(CellId(7), false).unwrap();
        let updates = palette.refresh(&grid, &changed);
        let category = grid.cell(CellId(7)).unwrap().category.unwrap();
        assert_eq!(
            updates,
            vec![CellUpdate::Color {
                cell: CellId(7),
                color: palette.color_of(category),
            }]
        );
    }
}
