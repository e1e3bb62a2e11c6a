//! Core card types: Suit, Rank, Card, GameType, EffectiveSuit, Trick, CardSet.
//!
//! The deck is the 32-card Skat deck (7 8 9 Q K 10 A J in four suits).

use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Diamonds,
    Hearts,
    Spades,
    Clubs,
}

pub const SUITS: [Suit; 4] = [Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];

impl Suit {
    /// Index in bidding order ♦ < ♥ < ♠ < ♣; also orders jacks among trumps.
    pub fn index(self) -> i32 {
        match self {
            Suit::Diamonds => 0,
            Suit::Hearts => 1,
            Suit::Spades => 2,
            Suit::Clubs => 3,
        }
    }
}

/// Ranks in deck order. Note that Ten outranks King in suit and Grand games;
/// the Null order is different again. Never compare ranks directly for trick
/// resolution, use `relative_power`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Seven,
    Eight,
    Nine,
    Queen,
    King,
    Ten,
    Ace,
    Jack,
}

pub const RANKS: [Rank; 8] = [
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Queen,
    Rank::King,
    Rank::Ten,
    Rank::Ace,
    Rank::Jack,
];

impl Rank {
    /// Card point value (deck total: 120).
    pub fn value(self) -> i32 {
        match self {
            Rank::Queen => 3,
            Rank::King => 4,
            Rank::Ten => 10,
            Rank::Ace => 11,
            Rank::Jack => 2,
            _ => 0,
        }
    }

    /// Position in the non-trump pecking order of suit and Grand games
    /// (7 < 8 < 9 < Q < K < 10 < A, jacks handled separately).
    pub(crate) fn base_power(self) -> i32 {
        match self {
            Rank::Seven => 0,
            Rank::Eight => 1,
            Rank::Nine => 2,
            Rank::Queen => 5,
            Rank::King => 6,
            Rank::Ten => 7,
            Rank::Ace => 8,
            Rank::Jack => 9,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn value(self) -> i32 {
        self.rank.value()
    }
}

/// The declared game. The first four are suit games; Grand has only jacks as
/// trumps; Null has no trumps and an inverted ten. Junk is reserved and never
/// playable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GameType {
    Diamonds,
    Hearts,
    Spades,
    Clubs,
    Grand,
    Null,
    Junk,
}

pub const SUIT_GAME_TYPES: [GameType; 4] = [
    GameType::Diamonds,
    GameType::Hearts,
    GameType::Spades,
    GameType::Clubs,
];

pub const STANDARD_GAME_TYPES: [GameType; 6] = [
    GameType::Diamonds,
    GameType::Hearts,
    GameType::Spades,
    GameType::Clubs,
    GameType::Grand,
    GameType::Null,
];

impl GameType {
    /// The trump suit of a suit game; None for Grand, Null, and Junk.
    pub fn trump_suit(self) -> Option<Suit> {
        match self {
            GameType::Diamonds => Some(Suit::Diamonds),
            GameType::Hearts => Some(Suit::Hearts),
            GameType::Spades => Some(Suit::Spades),
            GameType::Clubs => Some(Suit::Clubs),
            _ => None,
        }
    }

    pub fn is_suit_game(self) -> bool {
        self.trump_suit().is_some()
    }
}

/// Suit of a card as seen by trick resolution: all trumps collapse into one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EffectiveSuit {
    Diamonds,
    Hearts,
    Spades,
    Clubs,
    Trumps,
}

impl From<Suit> for EffectiveSuit {
    fn from(suit: Suit) -> Self {
        match suit {
            Suit::Diamonds => EffectiveSuit::Diamonds,
            Suit::Hearts => EffectiveSuit::Hearts,
            Suit::Spades => EffectiveSuit::Spades,
            Suit::Clubs => EffectiveSuit::Clubs,
        }
    }
}

/// Exactly three cards in play order. Resolution lives in `cards_logic`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Trick(pub [Card; 3]);

impl Trick {
    pub fn value(&self) -> i32 {
        self.0.iter().map(|c| c.value()).sum()
    }

    pub fn cards(&self) -> &[Card; 3] {
        &self.0
    }
}

/// Ordered card sequence with no duplicates. Push/pop preserve insertion
/// order, which the deal and the "first legal card" iteration rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSet(Vec<Card>);

impl CardSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(n: usize) -> Self {
        Self(Vec::with_capacity(n))
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove `card`, keeping the order of the remaining cards.
    pub fn pop(&mut self, card: Card) -> Result<(), DomainError> {
        match self.0.iter().position(|&c| c == card) {
            Some(idx) => {
                self.0.remove(idx);
                Ok(())
            }
            None => Err(DomainError::CardNotPresent),
        }
    }

    /// Append `card`; rejects duplicates.
    pub fn push(&mut self, card: Card) -> Result<(), DomainError> {
        if self.contains(card) {
            return Err(DomainError::CardAlreadyPresent);
        }
        self.0.push(card);
        Ok(())
    }

    /// Sum of card point values.
    pub fn value(&self) -> i32 {
        self.0.iter().map(|c| c.value()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.0
    }

    pub fn get(&self, idx: usize) -> Option<Card> {
        self.0.get(idx).copied()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub(crate) fn extend_from(&mut self, cards: &[Card]) {
        self.0.extend_from_slice(cards);
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }
}

impl From<Vec<Card>> for CardSet {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CardSet {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Suits of a fresh pack in display order (alternating colours).
const DECK_SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

/// Ranks of a fresh pack, strongest first.
const DECK_RANKS: [Rank; 8] = [
    Rank::Ace,
    Rank::Ten,
    Rank::King,
    Rank::Queen,
    Rank::Jack,
    Rank::Nine,
    Rank::Eight,
    Rank::Seven,
];

/// The full 32-card deck as it comes out of the pack: ♠ ♥ ♣ ♦, each suit
/// strongest rank first. The shuffle's reference vectors depend on this
/// enumeration, so it is fixed here rather than derived from `SUITS`.
pub fn new_deck() -> CardSet {
    let mut cards = Vec::with_capacity(32);
    for suit in DECK_SUITS {
        for rank in DECK_RANKS {
            cards.push(Card::new(rank, suit));
        }
    }
    CardSet(cards)
}
