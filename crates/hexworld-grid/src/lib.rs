//! Goldberg grid generation: tessellation, dual construction, and terrain
//! classification composed behind [`GridService`].

mod error;
mod grid;
mod service;
mod settings;
mod update;

pub use error::GridError;
pub use grid::Grid;
pub use service::GridService;
pub use settings::GridSettings;
pub use update::{CellUpdate, Palette};
