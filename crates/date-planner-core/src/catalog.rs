//! The fixed set of categories a session is built from.
//!
//! A catalog is decided once at startup (the built-in planner, or a JSON file)
//! and never changes while a session is running, so a [`CategoryId`] handed out
//! by a catalog is always valid for the session that owns it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Could not read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog has no categories")]
    Empty,

    #[error("Category '{0}' appears more than once")]
    DuplicateCategory(String),

    #[error("Category '{0}' has no options")]
    EmptyCategory(String),
}

/// A label plus the image file that illustrates it.
///
/// `image` is a filename relative to the images directory and may be empty
/// for custom picks typed in by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    #[serde(default)]
    pub image: String,
}

impl Choice {
    pub fn new(label: &str, image: &str) -> Self {
        Self {
            label: label.to_string(),
            image: image.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub options: Vec<Choice>,
}

/// Index of a category inside its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(usize);

impl CategoryId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<Category>,
    #[serde(default = "default_dietary_needs")]
    dietary_needs: String,
}

fn default_dietary_needs() -> String {
    "Vegetarian".to_string()
}

const BUILTIN: &[(&str, &[(&str, &str)])] = &[
    (
        "Flowers",
        &[
            ("Roses", "flowers_roses.jpg"),
            ("Tulips", "flowers_tulips.jpg"),
            ("Sunflowers", "flowers_sunflowers.jpg"),
            ("Baby's Breath", "flowers_babysbreath.jpg"),
        ],
    ),
    (
        "Activity",
        &[
            ("Cinema", "activity_cinema.jpg"),
            ("Museum", "activity_museum.jpg"),
            ("Walk in Park", "activity_walk.jpg"),
            ("Arcade", "activity_arcade.jpg"),
            ("Cafe", "activity_cafe.jpg"),
            ("Cat Cafe", "activity_catcafe.jpg"),
        ],
    ),
    (
        "Food (Vegetarian-friendly)",
        &[
            ("Pizza", "food_pizza_veg.jpg"),
            ("Pasta", "food_pasta_veg.jpg"),
            ("Tapas (veg)", "food_tapas_veg.jpg"),
            ("Ramen (veg broth)", "food_ramen_veg.jpg"),
        ],
    ),
    (
        "Vibe",
        &[
            ("Cozy", "vibe_cozy.jpg"),
            ("Adventurous", "vibe_adventurous.jpg"),
            ("Romantic", "vibe_romantic.jpg"),
            ("Chill", "vibe_chill.jpg"),
        ],
    ),
];

impl Catalog {
    /// The planner's own four categories.
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(name, options)| Category {
                name: name.to_string(),
                options: options
                    .iter()
                    .map(|(label, image)| Choice::new(label, image))
                    .collect(),
            })
            .collect();

        Self {
            categories,
            dietary_needs: default_dietary_needs(),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.name.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.name.clone()));
            }
            if category.options.is_empty() {
                return Err(CatalogError::EmptyCategory(category.name.clone()));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Category ids in declared order.
    pub fn ids(&self) -> impl Iterator<Item = CategoryId> {
        (0..self.categories.len()).map(CategoryId)
    }

    pub fn id_at(&self, index: usize) -> Option<CategoryId> {
        (index < self.categories.len()).then_some(CategoryId(index))
    }

    pub fn find(&self, name: &str) -> Option<CategoryId> {
        self.categories
            .iter()
            .position(|c| c.name == name)
            .map(CategoryId)
    }

    pub fn get(&self, id: CategoryId) -> &Category {
        &self.categories[id.0]
    }

    pub fn name(&self, id: CategoryId) -> &str {
        &self.categories[id.0].name
    }

    pub fn options(&self, id: CategoryId) -> &[Choice] {
        &self.categories[id.0].options
    }

    pub fn dietary_needs(&self) -> &str {
        &self.dietary_needs
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let catalog = Catalog::builtin();
        let names: Vec<&str> = catalog.ids().map(|id| catalog.name(id)).collect();
        assert_eq!(
            names,
            vec!["Flowers", "Activity", "Food (Vegetarian-friendly)", "Vibe"]
        );
        assert_eq!(catalog.dietary_needs(), "Vegetarian");
    }

    #[test]
    fn test_builtin_activity_options() {
        let catalog = Catalog::builtin();
        let activity = catalog.find("Activity").unwrap();
        assert_eq!(catalog.options(activity).len(), 6);
        assert_eq!(catalog.options(activity)[5], Choice::new("Cat Cafe", "activity_catcafe.jpg"));
    }

    #[test]
    fn test_id_at_out_of_range() {
        let catalog = Catalog::builtin();
        assert!(catalog.id_at(3).is_some());
        assert!(catalog.id_at(4).is_none());
    }

    #[test]
    fn test_from_json_defaults_dietary_needs() {
        let json = r#"{"categories":[{"name":"Music","options":[{"label":"Jazz","image":"jazz.jpg"},{"label":"Folk"}]}]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        let music = catalog.find("Music").unwrap();
        assert_eq!(catalog.options(music)[1].image, "");
        assert_eq!(catalog.dietary_needs(), "Vegetarian");
    }

    #[test]
    fn test_from_json_rejects_empty() {
        let err = Catalog::from_json(r#"{"categories":[]}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"{"categories":[
            {"name":"Vibe","options":[{"label":"Cozy"}]},
            {"name":"Vibe","options":[{"label":"Chill"}]}
        ]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCategory(name) if name == "Vibe"));
    }

    #[test]
    fn test_from_json_rejects_empty_category() {
        let json = r#"{"categories":[{"name":"Vibe","options":[]}]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyCategory(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
