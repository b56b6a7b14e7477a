//! Identifier categories and their fixed dimensions.

use serde::{Deserialize, Serialize};

/// A family of free-form identifiers that the encoder maps to dense indices.
///
/// Each category owns a fixed dimension: the width of every one-hot or
/// multi-hot span that encodes it. Catalog entries may grow up to that
/// dimension without moving any other offset in the output vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cards,
    Relics,
    Potions,
    Powers,
    Monsters,
    Intents,
    Events,
    RoomSubtypes,
    CardTypes,
    Rarities,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 10;

    /// All categories in table order.
    pub const ALL: [Category; Self::COUNT] = [
        Category::Cards,
        Category::Relics,
        Category::Potions,
        Category::Powers,
        Category::Monsters,
        Category::Intents,
        Category::Events,
        Category::RoomSubtypes,
        Category::CardTypes,
        Category::Rarities,
    ];

    /// Width of the encoded span for this category.
    #[must_use]
    pub const fn dim(self) -> usize {
        match self {
            Category::Cards => 144,
            Category::Relics => 180,
            Category::Potions => 45,
            Category::Powers => 80,
            Category::Monsters => 75,
            Category::Intents => 13,
            Category::Events => 50,
            Category::RoomSubtypes => 15,
            Category::CardTypes => 6,
            Category::Rarities => 7,
        }
    }

    /// Key of this category's list in a catalog file.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Category::Cards => "cards",
            Category::Relics => "relics",
            Category::Potions => "potions",
            Category::Powers => "powers",
            Category::Monsters => "monsters",
            Category::Intents => "intents",
            Category::Events => "events",
            Category::RoomSubtypes => "room_subtypes",
            Category::CardTypes => "card_types",
            Category::Rarities => "rarities",
        }
    }

    /// Position of this category in [`Category::ALL`].
    #[must_use]
    pub const fn slot(self) -> usize {
        self as usize
    }

    /// Parse a catalog key back into a category.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
