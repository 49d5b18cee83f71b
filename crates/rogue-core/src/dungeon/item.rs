//! Item templates for probabilistic room population

use serde::{Deserialize, Serialize};

use crate::GameRng;

/// A template an inventory item is stamped from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Display name
    pub name: String,
    /// Map glyph
    pub glyph: char,
    /// Appearance chance in percent when drawn during placement
    pub appearance: u32,
}

impl ItemTemplate {
    pub fn new(name: impl Into<String>, glyph: char, appearance: u32) -> Self {
        Self {
            name: name.into(),
            glyph,
            appearance,
        }
    }
}

/// Catalog of item templates available to the generator.
///
/// Owned by the generation context rather than a process-wide table, so
/// tests can substitute a fixed catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    templates: Vec<ItemTemplate>,
}

impl ItemCatalog {
    pub fn new(templates: Vec<ItemTemplate>) -> Self {
        Self { templates }
    }

    /// The built-in catalog
    pub fn standard() -> Self {
        Self::new(vec![
            ItemTemplate::new("food ration", '%', 70),
            ItemTemplate::new("potion", '!', 60),
            ItemTemplate::new("scroll", '?', 50),
            ItemTemplate::new("weapon", ')', 35),
            ItemTemplate::new("armor", '[', 30),
            ItemTemplate::new("wand", '/', 25),
            ItemTemplate::new("ring", '=', 20),
            ItemTemplate::new("amulet", '"', 10),
        ])
    }

    /// Draw a random template (uniform; appearance chance is applied by
    /// the caller)
    pub fn draw(&self, rng: &mut GameRng) -> Option<&ItemTemplate> {
        rng.choose(&self.templates)
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = ItemCatalog::standard();
        assert!(!catalog.is_empty());
        for _ in 0..catalog.len() {
            let mut rng = GameRng::new(7);
            let item = catalog.draw(&mut rng).unwrap();
            assert!(item.appearance <= 100);
        }
    }

    #[test]
    fn test_empty_catalog_draws_nothing() {
        let catalog = ItemCatalog::new(Vec::new());
        let mut rng = GameRng::new(7);
        assert!(catalog.draw(&mut rng).is_none());
    }

    #[test]
    fn test_draw_deterministic() {
        let catalog = ItemCatalog::standard();
        let mut a = GameRng::new(99);
        let mut b = GameRng::new(99);
        for _ in 0..20 {
            assert_eq!(catalog.draw(&mut a), catalog.draw(&mut b));
        }
    }
}
