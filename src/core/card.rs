//! Cards: suit, rank, identity and face orientation.
//!
//! Cards are small `Copy` values. The only mutable part of a card is its
//! face orientation, which the engine flips explicitly when a card is dealt
//! or uncovered.
//!
//! ```
//! use spider_engine::core::{Card, CardId, Rank, Suit};
//!
//! let king = Card::new(CardId::new(12), Suit::Spades, Rank::KING);
//! assert!(!king.face_up);
//! assert_eq!(king.to_string(), "K♠");
//! assert_eq!(king.id.to_string(), "spades-13-0");
//! ```

use serde::{Deserialize, Serialize};

/// The four symbolic suits.
///
/// The single-suit variant only ever deals spades, but the model keeps all
/// four so foundation records and card identifiers read naturally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    /// Lowercase name, as used in card identifiers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
        }
    }

    /// Unicode suit symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Card rank, Ace = 1 through King = 13.
///
/// Decoding goes through [`Rank::new`], so an out-of-range rank cannot be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const JACK: Rank = Rank(11);
    pub const QUEEN: Rank = Rank(12);
    pub const KING: Rank = Rank(13);

    /// Create a rank, returning `None` outside `1..=13`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 13 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the numeric value (1-13).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Iterate Ace through King.
    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=13).map(Rank)
    }

    /// True if `self` is exactly one rank above `other` (a Queen over a Jack).
    #[must_use]
    pub const fn is_one_above(self, other: Rank) -> bool {
        self.0 == other.0 + 1
    }

    /// Short display label: `A`, `2`..`10`, `J`, `Q`, `K`.
    #[must_use]
    pub fn label(self) -> std::borrow::Cow<'static, str> {
        match self.0 {
            1 => "A".into(),
            11 => "J".into(),
            12 => "Q".into(),
            13 => "K".into(),
            n => n.to_string().into(),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value).ok_or_else(|| format!("rank {value} is outside 1..=13"))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.0
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Unique card identity within one 104-card deck.
///
/// The raw value is the card's position in the unshuffled deck:
/// `run * 13 + (rank - 1)`, where `run` is which of the eight A..K runs the
/// card was created in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a card ID from its raw deck position.
    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Which A..K run of the unshuffled deck this card came from.
    #[must_use]
    pub const fn run(self) -> u8 {
        self.0 / 13
    }

    /// Rank encoded in the identity.
    #[must_use]
    pub const fn rank(self) -> Rank {
        Rank(self.0 % 13 + 1)
    }
}

/// Identifiers render as `suit-rank-run`, e.g. `spades-13-2`.
///
/// Every card in the single-suit deck is a spade, so the suit is fixed here.
impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", Suit::Spades, self.rank().value(), self.run())
    }
}

/// A playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self {
            id,
            suit,
            rank,
            face_up: false,
        }
    }

    /// Same card turned face-up.
    #[must_use]
    pub const fn turned_up(mut self) -> Self {
        self.face_up = true;
        self
    }

    /// True if `self` may rest directly on `below` inside a movable sequence:
    /// same suit, one rank lower.
    #[must_use]
    pub fn follows(&self, below: &Card) -> bool {
        self.suit == below.suit && below.rank.is_one_above(self.rank)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.symbol())
    }
}
