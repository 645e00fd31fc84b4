//! A generated, classified Goldberg grid.

use hashbrown::HashMap;
use hexworld_geodesic::{CellId, PENTAGON_COUNT, face_for_facet, facet_count};
use hexworld_terrain::{CategoryId, NoiseConfig, TerrainCell};

use crate::{CellUpdate, GridError};

/// Cells of one generation run, in id order, plus the inputs that produced
/// them.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<TerrainCell>,
    frequency: (u32, u32),
    noise_config: NoiseConfig,
    render_order: Vec<CellId>,
    hovered: Option<CellId>,
}

impl Grid {
    /// Number of pentagons a valid grid holds.
    pub const PENTAGONS: usize = PENTAGON_COUNT;

    /// Wrap classified cells. `cells[i].id` must equal `i`.
    pub(crate) fn new(
        cells: Vec<TerrainCell>,
        frequency: (u32, u32),
        noise_config: NoiseConfig,
    ) -> Self {
        debug_assert!(cells.iter().enumerate().all(|(i, c)| c.id.index() == i));
        let (pentagons, hexagons): (Vec<_>, Vec<_>) =
            cells.iter().partition(|cell| cell.is_pentagon());
        let render_order = pentagons
            .into_iter()
            .chain(hexagons)
            .map(|cell| cell.id)
            .collect();
        Self {
            cells,
            frequency,
            noise_config,
            render_order,
            hovered: None,
        }
    }

    /// All cells; `cells()[i].id == CellId(i)`.
    pub fn cells(&self) -> &[TerrainCell] {
        &self.cells
    }

    /// The cell with `id`, if it belongs to this grid.
    pub fn cell(&self, id: CellId) -> Option<&TerrainCell> {
        self.cells.get(id.index())
    }

    /// Number of cells (`10T + 2`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The `(m, n)` Goldberg parameters.
    pub fn frequency(&self) -> (u32, u32) {
        self.frequency
    }

    /// Noise parameters used for classification, including the seed actually
    /// used (generated if none was configured).
    pub fn noise_config(&self) -> &NoiseConfig {
        &self.noise_config
    }

    /// Iterator over the 12 pentagonal cells.
    pub fn pentagons(&self) -> impl Iterator<Item = &TerrainCell> {
        self.cells.iter().filter(|cell| cell.is_pentagon())
    }

    /// Cell ids in rendered face order: pentagons by id, then hexagons by id.
    pub fn render_order(&self) -> &[CellId] {
        &self.render_order
    }

    /// Total rendered facets (3 per pentagon, 4 per hexagon).
    pub fn facet_count(&self) -> usize {
        facet_count(self.cells.len())
    }

    /// Cell owning rendered facet `facet`, or `None` past the last facet.
    pub fn cell_for_facet(&self, facet: usize) -> Option<CellId> {
        if facet >= self.facet_count() {
            return None;
        }
        self.render_order.get(face_for_facet(facet)).copied()
    }

    /// Mark or unmark `id` as hovered. At most one cell is hovered at a time;
    /// hovering a new cell clears the previous one.
    ///
    /// Returns the ids whose hover state changed.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnknownCell`] if `id` is not in this grid.
    pub fn set_hovered(&mut self, id: CellId, hovered: bool) -> Result<Vec<CellId>, GridError> {
        if id.index() >= self.cells.len() {
            return Err(GridError::UnknownCell(id));
        }

        let mut changed = Vec::with_capacity(2);
        if hovered {
            if self.hovered == Some(id) {
                return Ok(changed);
            }
            if let Some(previous) = self.hovered.replace(id) {
                self.cells[previous.index()].hovered = false;
                changed.push(previous);
            }
            self.cells[id.index()].hovered = true;
            changed.push(id);
        } else if self.hovered == Some(id) {
            self.hovered = None;
            self.cells[id.index()].hovered = false;
            changed.push(id);
        }
        Ok(changed)
    }

    /// The currently hovered cell.
    pub fn hovered_cell(&self) -> Option<CellId> {
        self.hovered
    }

    /// Cell counts per category, ordered by category id. Unclassified cells
    /// are not counted.
    pub fn category_histogram(&self) -> Vec<(CategoryId, usize)> {
        let mut counts: HashMap<CategoryId, usize> = HashMap::new();
        for category in self.cells.iter().filter_map(|cell| cell.category) {
            *counts.entry(category).or_default() += 1;
        }
        let mut histogram: Vec<_> = counts.into_iter().collect();
        histogram.sort_unstable_by_key(|&(category, _)| category);
        histogram
    }

    /// One [`CellUpdate::Category`] per classified cell, in id order.
    pub fn category_updates(&self) -> Vec<CellUpdate> {
        self.cells
            .iter()
            .filter_map(|cell| {
                cell.category.map(|category| CellUpdate::Category {
                    cell: cell.id,
                    category,
                })
            })
            .collect()
    }
}
