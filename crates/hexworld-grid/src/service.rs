//! Composition root: tessellate, build duals, classify.

use std::time::Instant;

use hexworld_geodesic::{DualGraphBuilder, MAX_OUTPUT_DECIMALS, tessellate};
use hexworld_terrain::{CategoryRegistry, NoiseField, TerrainCell, TerrainClassifier};
use tracing::{debug, info, warn};

use crate::{Grid, GridError, GridSettings, Palette};

/// Generates classified grids from fixed [`GridSettings`].
///
/// Each call to [`GridService::generate`] is independent; scratch data lives
/// only for the duration of the call.
#[derive(Clone, Debug)]
pub struct GridService {
    settings: GridSettings,
}

impl GridService {
    /// Service generating grids from `settings`.
    pub fn new(settings: GridSettings) -> Self {
        Self { settings }
    }

    /// The settings every generated grid uses.
    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// Categories the generated cells refer to.
    pub fn registry(&self) -> &CategoryRegistry {
        &self.settings.preset.registry
    }

    /// Palette over [`GridService::registry`] with the configured highlight.
    pub fn palette(&self) -> Palette {
        Palette::from_registry(self.registry(), self.settings.highlight)
    }

    /// Generate a grid.
    ///
    /// A missing noise seed is replaced with a random one, recorded in
    /// [`Grid::noise_config`].
    ///
    /// # Errors
    ///
    /// Fails on an invalid subdivision or noise config, or a malformed mesh.
    /// No partial grid is returned.
    pub fn generate(&self) -> Result<Grid, GridError> {
        let settings = &self.settings;
        let (m, n) = (settings.m, settings.n);

        settings.noise.validate()?;
        let seed = match settings.noise.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u32>();
                info!(seed, "generated noise seed");
                seed
            }
        };
        let noise = settings.noise.clone().with_seed(seed);
        if let Some(decimals) = settings.output_decimals
            && decimals > MAX_OUTPUT_DECIMALS
        {
            warn!(
                decimals,
                max = MAX_OUTPUT_DECIMALS,
                "output precision beyond f64 resolution, rounding at the maximum"
            );
        }

        let start = Instant::now();
        let mesh = tessellate(m, n)?;

        let mut cells: Vec<TerrainCell> =
            DualGraphBuilder::new(settings.key_decimals, settings.output_decimals)
                .build(&mesh)?;
        debug!(cells = cells.len(), "built dual cells");

        let classifier = TerrainClassifier::new(
            NoiseField::new(noise.clone())?,
            settings.preset.table.clone(),
            settings.polar,
        );
        if settings.classify_threads == 1 {
            classifier.classify_all(&mut cells);
        } else {
            classifier.classify_all_parallel(&mut cells, settings.classify_threads);
        }

        let grid = Grid::new(cells, (m, n), noise);
        info!(
            m,
            n,
            seed,
            cells = grid.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "generated grid"
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexworld_geodesic::{CellId, GeodesicError, lon_lat_to_unit};
    use hexworld_terrain::{PolarOverride, Rgba, TerrainError};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` with an info-level subscriber and return what it logged on
    /// this thread.
    fn captured_logs(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn seeded(m: u32, n: u32, seed: u32) -> GridService {
        let mut settings = GridSettings::with_frequency(m, n);
        settings.noise.seed = Some(seed);
        GridService::new(settings)
    }

    #[test]
    fn test_cell_counts() {
        for ((m, n), expected) in [((1, 0), 12), ((2, 0), 42), ((1, 1), 32), ((2, 1), 72)] {
            let grid = seeded(m, n, 1).generate().unwrap();
            assert_eq!(grid.len(), expected, "({m}, {n})");
            assert_eq!(grid.pentagons().count(), 12);
        }
    }

    #[test]
    fn test_degree_invariant_and_symmetry() {
        let grid = seeded(5, 2, 9).generate().unwrap();
        for cell in grid.cells() {
            assert!(matches!(cell.neighbors.len(), 5 | 6), "{}", cell.id);
            assert_eq!(cell.boundary.len(), cell.neighbors.len() + 1);
            assert_eq!(cell.boundary.first(), cell.boundary.last());
            for neighbor in &cell.neighbors {
                assert!(grid.cell(*neighbor).unwrap().neighbors.contains(&cell.id));
            }
        }
    }

    #[test]
    fn test_every_cell_classified() {
        let grid = seeded(6, 0, 4).generate().unwrap();
        assert!(grid.cells().iter().all(|cell| cell.category.is_some()));
        assert!(grid.cells().iter().all(|cell| !cell.hovered));
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = seeded(4, 1, 77).generate().unwrap();
        let b = seeded(4, 1, 77).generate().unwrap();
        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.render_order(), b.render_order());
    }

    #[test]
    fn test_thread_count_does_not_change_result() {
        let mut settings = GridSettings::with_frequency(6, 0);
        settings.noise.seed = Some(21);
        settings.classify_threads = 1;
        let sequential = GridService::new(settings.clone()).generate().unwrap();
        settings.classify_threads = 4;
        let parallel = GridService::new(settings).generate().unwrap();
        assert_eq!(sequential.cells(), parallel.cells());
    }

    #[test]
    fn test_seed_generated_and_recorded() {
        let grid = GridService::new(GridSettings::with_frequency(2, 0))
            .generate()
            .unwrap();
        let seed = grid.noise_config().seed.expect("seed recorded");

        let replay = seeded(2, 0, seed).generate().unwrap();
        assert_eq!(grid.cells(), replay.cells());
    }

    #[test]
    fn test_generated_seed_logged_without_warning() {
        let logs = captured_logs(|| {
            GridService::new(GridSettings::with_frequency(1, 0))
                .generate()
                .unwrap();
        });
        assert!(logs.contains("generated noise seed"), "{logs}");
        assert!(!logs.contains("WARN"), "{logs}");
    }

    #[test]
    fn test_excessive_output_precision_warns_and_stays_closed() {
        let mut settings = GridSettings::with_frequency(2, 0);
        settings.noise.seed = Some(8);
        settings.output_decimals = Some(400);
        let mut grid = None;
        let logs = captured_logs(|| grid = Some(GridService::new(settings).generate().unwrap()));
        assert!(logs.contains("WARN"), "{logs}");
        for cell in grid.unwrap().cells() {
            assert!(cell.centroid.is_finite());
            assert_eq!(cell.boundary.first(), cell.boundary.last());
        }
    }

    #[test]
    fn test_octave_overflow_rejected() {
        let mut settings = GridSettings::with_frequency(2, 0);
        settings.noise.seed = Some(1);
        settings.noise.octaves = 70;
        let err = GridService::new(settings).generate().unwrap_err();
        assert!(matches!(
            err,
            GridError::Terrain(TerrainError::InvalidNoiseConfig(_))
        ));
    }

    #[test]
    fn test_zero_subdivision_rejected() {
        let err = seeded(0, 0, 1).generate().unwrap_err();
        assert_eq!(
            err,
            GridError::Geodesic(GeodesicError::InvalidSubdivision { m: 0, n: 0 })
        );
    }

    #[test]
    fn test_invalid_noise_rejected_before_tessellation() {
        let mut settings = GridSettings::with_frequency(0, 0);
        settings.noise.octaves = 0;
        let err = GridService::new(settings).generate().unwrap_err();
        assert!(matches!(
            err,
            GridError::Terrain(TerrainError::InvalidNoiseConfig(_))
        ));
    }

    #[test]
    fn test_polar_indicator_marks_pole_cells() {
        let mut settings = GridSettings::with_frequency(4, 0);
        settings.noise.seed = Some(2);
        let marker = settings.preset.registry.ensure("pole", Rgba::GRAY);
        settings.polar = Some(PolarOverride::indicator(marker));
        let grid = GridService::new(settings).generate().unwrap();

        let marked: Vec<CellId> = grid
            .cells()
            .iter()
            .filter(|cell| cell.category == Some(marker))
            .map(|cell| cell.id)
            .collect();
        assert_eq!(marked.len(), 2);
        for id in marked {
            let z = grid.cell(id).unwrap().centroid.z;
            assert!(z.abs() > 0.999);
        }
    }

    #[test]
    fn test_seam_cells_sample_continuously() {
        let grid = seeded(2, 0, 5).generate().unwrap();
        let field = NoiseField::new(grid.noise_config().clone()).unwrap();
        let east = field.sample(lon_lat_to_unit(179.999, 10.0));
        let west = field.sample(lon_lat_to_unit(-179.999, 10.0));
        assert!((east - west).abs() < 1e-3);
    }

    #[test]
    fn test_palette_covers_registry() {
        let service = seeded(1, 0, 1);
        let palette = service.palette();
        for (id, def) in service.registry().iter() {
            assert_eq!(palette.color_of(id), def.color);
        }
    }
}
