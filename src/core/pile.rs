//! Tableau piles.
//!
//! A `Pile` is an ordered stack of cards, index 0 at the bottom and the last
//! card exposed on top. The `Tableau` is the fixed row of ten piles.
//!
//! Both use `im::Vector` so cloning a whole tableau for an undo snapshot
//! shares structure with the live one instead of copying every card.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;

/// Number of tableau piles.
pub const PILE_COUNT: usize = 10;

/// One tableau pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pile {
    cards: Vector<Card>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The exposed top card.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Card at `index` (0 = bottom).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> im::vector::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Iterate the cards from `index` to the top.
    ///
    /// Yields nothing when `index >= len`.
    pub fn cards_from(&self, index: usize) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter().skip(index)
    }

    /// Iterate the top `count` cards, bottom-most of them first.
    pub fn top_cards(&self, count: usize) -> impl Iterator<Item = &Card> + '_ {
        self.cards_from(self.len().saturating_sub(count))
    }

    /// Number of face-down cards (they sit contiguously at the bottom).
    #[must_use]
    pub fn face_down_count(&self) -> usize {
        self.cards.iter().take_while(|card| !card.face_up).count()
    }

    /// Put a card on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Append a group of cards on top, preserving their order.
    pub fn append(&mut self, group: Vector<Card>) {
        self.cards.append(group);
    }

    /// Detach and return the cards from `index` to the top.
    ///
    /// `index` must be `<= len`.
    pub fn split_off(&mut self, index: usize) -> Vector<Card> {
        self.cards.split_off(index)
    }

    /// Remove the top `count` cards (all of them if fewer remain).
    pub fn remove_top(&mut self, count: usize) -> Vector<Card> {
        let at = self.len().saturating_sub(count);
        self.cards.split_off(at)
    }

    /// Turn the top card face-up. Returns true if it was face-down.
    pub fn reveal_top(&mut self) -> bool {
        match self.cards.back_mut() {
            Some(card) if !card.face_up => {
                card.face_up = true;
                true
            }
            _ => false,
        }
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Pile {
    type Item = &'a Card;
    type IntoIter = im::vector::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// The ten tableau piles.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tableau {
    piles: Vector<Pile>,
}

impl Default for Tableau {
    fn default() -> Self {
        Self {
            piles: (0..PILE_COUNT).map(|_| Pile::new()).collect(),
        }
    }
}

impl Tableau {
    /// Create a tableau of ten empty piles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tableau from explicit piles.
    ///
    /// Missing piles are filled with empty ones and extra piles are dropped,
    /// so the result always has exactly ten.
    #[must_use]
    pub fn from_piles<I>(piles: I) -> Self
    where
        I: IntoIterator<Item = Pile>,
    {
        let mut piles: Vector<Pile> = piles.into_iter().take(PILE_COUNT).collect();
        while piles.len() < PILE_COUNT {
            piles.push_back(Pile::new());
        }
        Self { piles }
    }

    /// Pile at `index`, `None` if out of range.
    #[must_use]
    pub fn pile(&self, index: usize) -> Option<&Pile> {
        self.piles.get(index)
    }

    pub(crate) fn pile_mut(&mut self, index: usize) -> Option<&mut Pile> {
        self.piles.get_mut(index)
    }

    /// Iterate piles in index order.
    pub fn iter(&self) -> im::vector::Iter<'_, Pile> {
        self.piles.iter()
    }

    /// Number of piles (always ten).
    #[must_use]
    pub fn len(&self) -> usize {
        self.piles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    /// Total cards across all piles.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.piles.iter().map(Pile::len).sum()
    }
}

impl<'a> IntoIterator for &'a Tableau {
    type Item = &'a Pile;
    type IntoIter = im::vector::Iter<'a, Pile>;

    fn into_iter(self) -> Self::IntoIter {
        self.piles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{CardId, Rank, Suit};

    fn spade(rank: u8, face_up: bool) -> Card {
        let mut card = Card::new(CardId(rank - 1), Suit::Spades, Rank::new(rank).unwrap());
        card.face_up = face_up;
        card
    }

    #[test]
    fn test_tableau_has_ten_piles() {
        let tableau = Tableau::new();
        assert_eq!(tableau.len(), PILE_COUNT);
        assert_eq!(tableau.card_count(), 0);
        assert!(tableau.pile(9).is_some());
        assert!(tableau.pile(10).is_none());
    }

    #[test]
    fn test_from_piles_pads_to_ten() {
        let tableau = Tableau::from_piles(vec![[spade(5, true)].into_iter().collect()]);
        assert_eq!(tableau.len(), PILE_COUNT);
        assert_eq!(tableau.card_count(), 1);
    }

    #[test]
    fn test_split_and_append() {
        let mut from: Pile = [spade(9, false), spade(8, true), spade(7, true)].into_iter().collect();
        let mut to: Pile = [spade(9, true)].into_iter().collect();

        let group = from.split_off(1);
        to.append(group);

        assert_eq!(from.len(), 1);
        assert_eq!(to.len(), 3);
        assert_eq!(to.top().map(|c| c.rank), Rank::new(7));
    }

    #[test]
    fn test_reveal_top() {
        let mut pile: Pile = [spade(3, false), spade(2, false)].into_iter().collect();
        assert_eq!(pile.face_down_count(), 2);
        assert!(pile.reveal_top());
        assert!(!pile.reveal_top());
        assert_eq!(pile.face_down_count(), 1);

        let mut empty = Pile::new();
        assert!(!empty.reveal_top());
    }

    #[test]
    fn test_remove_top() {
        let mut pile: Pile = (1..=5).map(|r| spade(r, true)).collect();
        let removed = pile.remove_top(3);
        assert_eq!(removed.len(), 3);
        assert_eq!(pile.len(), 2);

        let rest = pile.remove_top(10);
        assert_eq!(rest.len(), 2);
        assert!(pile.is_empty());
    }

    #[test]
    fn test_top_cards() {
        let pile: Pile = (1..=5).map(|r| spade(r, true)).collect();
        let ranks: Vec<u8> = pile.top_cards(2).map(|c| c.rank.value()).collect();
        assert_eq!(ranks, vec![4, 5]);
        assert_eq!(pile.top_cards(20).count(), 5);
    }
}
