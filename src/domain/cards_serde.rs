//! Serialization for card types.
//!
//! Cards travel as compact two-character tokens ("JC", "TD"); suits and game
//! types as SCREAMING_SNAKE_CASE strings. CardSet is transparent over a card
//! list so hands and tables read naturally in journals and wire payloads.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, CardSet, GameType, Rank, Suit};

impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Suit::Diamonds => "DIAMONDS",
            Suit::Hearts => "HEARTS",
            Suit::Spades => "SPADES",
            Suit::Clubs => "CLUBS",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "DIAMONDS" => Ok(Suit::Diamonds),
            "HEARTS" => Ok(Suit::Hearts),
            "SPADES" => Ok(Suit::Spades),
            "CLUBS" => Ok(Suit::Clubs),
            _ => Err(serde::de::Error::custom(format!("invalid suit: {s}"))),
        }
    }
}

impl Serialize for GameType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            GameType::Diamonds => "DIAMONDS",
            GameType::Hearts => "HEARTS",
            GameType::Spades => "SPADES",
            GameType::Clubs => "CLUBS",
            GameType::Grand => "GRAND",
            GameType::Null => "NULL",
            GameType::Junk => "JUNK",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for GameType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "DIAMONDS" => Ok(GameType::Diamonds),
            "HEARTS" => Ok(GameType::Hearts),
            "SPADES" => Ok(GameType::Spades),
            "CLUBS" => Ok(GameType::Clubs),
            "GRAND" => Ok(GameType::Grand),
            "NULL" => Ok(GameType::Null),
            "JUNK" => Ok(GameType::Junk),
            _ => Err(serde::de::Error::custom(format!("invalid game type: {s}"))),
        }
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rank_ch = match self.rank {
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ten => 'T',
            Rank::Ace => 'A',
            Rank::Jack => 'J',
        };
        let suit_ch = match self.suit {
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
            Suit::Clubs => 'C',
        };
        serializer.serialize_str(&format!("{rank_ch}{suit_ch}"))
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Card>()
            .map_err(|_| serde::de::Error::custom(format!("invalid card token: {s}")))
    }
}

impl Serialize for CardSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for CardSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cards = Vec::<Card>::deserialize(deserializer)?;
        let mut set = CardSet::with_capacity(cards.len());
        for card in cards {
            set.push(card)
                .map_err(|_| serde::de::Error::custom("duplicate card in set"))?;
        }
        Ok(set)
    }
}
