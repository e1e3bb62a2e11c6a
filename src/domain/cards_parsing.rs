//! Card parsing from compact string tokens (e.g. "JC", "TD", "7H").

use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(rank_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(DomainError::CardNotPresent);
        };
        let rank = match rank_ch {
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'T' => Rank::Ten,
            'A' => Rank::Ace,
            'J' => Rank::Jack,
            _ => return Err(DomainError::CardNotPresent),
        };
        let suit = match suit_ch {
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            'C' => Suit::Clubs,
            _ => return Err(DomainError::CardNotPresent),
        };
        Ok(Card::new(rank, suit))
    }
}

/// Parse a list of card tokens; fails on the first invalid token.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
