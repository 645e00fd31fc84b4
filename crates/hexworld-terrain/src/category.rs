//! Terrain category registry: maps [`CategoryId`] to [`CategoryDef`] with
//! name-based lookup.

use hashbrown::HashMap;

use crate::TerrainError;

/// Unique identifier for a terrain category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub u16);

/// An sRGB color with alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    /// Neutral gray used when a category has no configured color.
    pub const GRAY: Self = Self([0x80, 0x80, 0x80, 0xFF]);

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidColor`] for any other shape.
    pub fn from_hex(hex: &str) -> Result<Self, TerrainError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || TerrainError::InvalidColor(hex.to_string());
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(invalid());
        }

        let mut rgba = [0xFF; 4];
        for (i, channel) in rgba.iter_mut().enumerate().take(digits.len() / 2) {
            *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(rgba))
    }

    /// Format as `#RRGGBBAA`.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.0;
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

/// Descriptor for a terrain category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryDef {
    /// Unique name (e.g. "water1", "ice").
    pub name: String,
    /// Display color handed to renderers.
    pub color: Rgba,
}

/// Errors that can occur when registering categories.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum CategoryRegistryError {
    /// A category with this name is already registered.
    #[error("duplicate category name: {0}")]
    DuplicateName(String),
}

/// Stores all registered categories with O(1) lookup by ID.
#[derive(Clone, Debug, Default)]
pub struct CategoryRegistry {
    categories: Vec<CategoryDef>,
    name_to_id: HashMap<String, CategoryId>,
}

impl CategoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new category, returning its assigned [`CategoryId`].
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRegistryError::DuplicateName`] if the name exists.
    pub fn register(&mut self, def: CategoryDef) -> Result<CategoryId, CategoryRegistryError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(CategoryRegistryError::DuplicateName(def.name));
        }
        let id = CategoryId(self.categories.len() as u16);
        self.name_to_id.insert(def.name.clone(), id);
        self.categories.push(def);
        Ok(id)
    }

    /// Returns the id for `name`, registering it with `color` if absent.
    pub fn ensure(&mut self, name: &str, color: Rgba) -> CategoryId {
        if let Some(id) = self.lookup_by_name(name) {
            return id;
        }
        let id = CategoryId(self.categories.len() as u16);
        self.name_to_id.insert(name.to_string(), id);
        self.categories.push(CategoryDef {
            name: name.to_string(),
            color,
        });
        id
    }

    /// Returns the definition for `id`, if registered.
    pub fn get(&self, id: CategoryId) -> Option<&CategoryDef> {
        self.categories.get(id.0 as usize)
    }

    /// Looks up a category ID by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<CategoryId> {
        self.name_to_id.get(name).copied()
    }

    /// Looks up a category ID by name, failing for unknown names.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::UnknownCategory`].
    pub fn require(&self, name: &str) -> Result<CategoryId, TerrainError> {
        self.lookup_by_name(name)
            .ok_or_else(|| TerrainError::UnknownCategory(name.to_string()))
    }

    /// Iterates over `(id, def)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &CategoryDef)> {
        self.categories
            .iter()
            .enumerate()
            .map(|(i, def)| (CategoryId(i as u16), def))
    }

    /// Returns the number of registered categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns `true` if no categories are registered.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
