//! Card catalog: deserialization, image lookup, and dealing.
//!
//! Raw records arrive as `{id, name, image, modifier, target}`. The catalog
//! turns them into immutable `Card`s, resolving missing images through an
//! id → asset table, and deals two disjoint hands.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId, Target};
use crate::core::{EngineError, GameRng};

/// Raw card record as delivered by a catalog source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: CardId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub modifier: f64,
    #[serde(default)]
    pub target: Target,
}

impl From<&Card> for CardRecord {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            name: card.name.clone(),
            image: (!card.image.is_empty()).then(|| card.image.clone()),
            modifier: card.modifier,
            target: card.target,
        }
    }
}

/// Catalog of every card available to a game.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardCatalog, CardId};
///
/// let catalog = CardCatalog::from_json(
///     r#"[{"id": 1, "name": "Boost", "modifier": 0.2, "target": "self"}]"#,
/// )
/// .unwrap()
/// .with_image(CardId::new(1), "boost.png");
///
/// assert_eq!(catalog.get(CardId::new(1)).unwrap().image, "boost.png");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Card>,
    images: FxHashMap<CardId, String>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw records, rejecting duplicate ids.
    pub fn from_records(
        records: impl IntoIterator<Item = CardRecord>,
    ) -> Result<Self, EngineError> {
        let mut catalog = Self::new();
        for record in records {
            catalog.register(record)?;
        }
        Ok(catalog)
    }

    /// Build from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let records: Vec<CardRecord> =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidCatalog(e.to_string()))?;
        Self::from_records(records)
    }

    /// Register one record.
    pub fn register(&mut self, record: CardRecord) -> Result<(), EngineError> {
        if self.cards.contains_key(&record.id) {
            return Err(EngineError::DuplicateCard { card: record.id });
        }
        let card = self.deserialize(record);
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Map a card id to an image asset.
    ///
    /// Applies to cards already registered without an image.
    #[must_use]
    pub fn with_image(mut self, id: CardId, image: impl Into<String>) -> Self {
        let image = image.into();
        if let Some(card) = self.cards.get_mut(&id) {
            if card.image.is_empty() {
                card.image = image.clone();
            }
        }
        self.images.insert(id, image);
        self
    }

    /// Turn a record into a card, resolving its image.
    #[must_use]
    pub fn deserialize(&self, record: CardRecord) -> Card {
        let image = record
            .image
            .filter(|image| !image.is_empty())
            .or_else(|| self.images.get(&record.id).cloned())
            .unwrap_or_default();

        Card {
            id: record.id,
            name: record.name,
            image,
            modifier: record.modifier,
            target: record.target,
        }
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in ascending id order.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.cards.values().cloned().collect();
        cards.sort_by_key(|c| c.id);
        cards
    }

    /// Shuffle and split into two disjoint hands of `hand_size` cards.
    ///
    /// Returns `(player_cards, enemy_cards)`.
    pub fn deal(
        &self,
        rng: &mut GameRng,
        hand_size: usize,
    ) -> Result<(Vec<Card>, Vec<Card>), EngineError> {
        let needed = hand_size * 2;
        if self.cards.len() < needed {
            return Err(EngineError::CatalogTooSmall {
                needed,
                available: self.cards.len(),
            });
        }

        let mut deck = self.cards();
        rng.shuffle(&mut deck);
        let enemy = deck.split_off(hand_size);
        let enemy = enemy.into_iter().take(hand_size).collect();
        Ok((deck, enemy))
    }

    /// Built-in catalog of ten cards.
    ///
    /// `Target::Opponent` cards always adjust the enemy, so an enemy that
    /// plays `Jinx` or `Hex` lowers its own face-up probability.
    #[must_use]
    pub fn standard() -> Self {
        const CARDS: [(u32, &str, f64, Target); 10] = [
            (1, "Lucky Charm", 0.2, Target::Own),
            (2, "Weighted Coin", 0.3, Target::Own),
            (3, "Steady Hand", 0.1, Target::Own),
            (4, "Blank Slate", 0.0, Target::Own),
            (5, "Jinx", 0.2, Target::Opponent),
            (6, "Hex", 0.3, Target::Opponent),
            (7, "Distraction", 0.1, Target::Opponent),
            (8, "Reckless Toss", -0.2, Target::Own),
            (9, "Blessing", -0.1, Target::Opponent),
            (10, "Gambit", 0.5, Target::Own),
        ];

        let mut catalog = Self::new();
        for (id, name, modifier, target) in CARDS {
            let card = Card::new(CardId::new(id), name)
                .with_modifier(modifier)
                .with_target(target);
            catalog.cards.insert(card.id, card);
        }
        catalog
    }
}
