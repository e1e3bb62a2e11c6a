//! Card game logic: effective suits, relative power, trick resolution.

use super::cards_types::{Card, EffectiveSuit, GameType, Rank, Trick};

/// Offset lifting jacks (and whole-trick trump comparison) above every
/// non-trump power value.
pub(crate) const TRUMP_POWER_OFFSET: i32 = 100;

/// Suit of `card` under `game_type`: jacks are trumps in suit and Grand
/// games, the trump suit's cards are trumps in suit games, Null has none.
pub fn effective_suit(card: Card, game_type: GameType) -> EffectiveSuit {
    match game_type {
        GameType::Grand => {
            if card.rank == Rank::Jack {
                return EffectiveSuit::Trumps;
            }
        }
        GameType::Diamonds | GameType::Hearts | GameType::Spades | GameType::Clubs => {
            let trump = game_type.trump_suit().expect("suit game has a trump suit");
            if card.rank == Rank::Jack || card.suit == trump {
                return EffectiveSuit::Trumps;
            }
        }
        GameType::Null | GameType::Junk => {}
    }
    EffectiveSuit::from(card.suit)
}

/// Ordering of `card` within its effective suit under `game_type`.
///
/// Suit games: jacks rank ♦ < ♥ < ♠ < ♣ above all other trumps; everything
/// else follows 7 < 8 < 9 < Q < K < 10 < A. Null inverts the ten:
/// 7 < 8 < 9 < 10 < J < Q < K < A.
pub fn relative_power(card: Card, game_type: GameType) -> i32 {
    match game_type {
        GameType::Grand => {
            if card.rank == Rank::Jack {
                card.suit.index()
            } else {
                card.rank.base_power()
            }
        }
        GameType::Null => match card.rank {
            Rank::Ten => 3,
            Rank::Jack => 4,
            _ => card.rank.base_power(),
        },
        GameType::Diamonds | GameType::Hearts | GameType::Spades | GameType::Clubs => {
            if effective_suit(card, game_type) == EffectiveSuit::Trumps && card.rank == Rank::Jack {
                card.suit.index() + TRUMP_POWER_OFFSET
            } else {
                card.rank.base_power()
            }
        }
        GameType::Junk => 0,
    }
}

impl Trick {
    /// Effective suit of the trick: that of the first card played.
    pub fn effective_suit(&self, game_type: GameType) -> EffectiveSuit {
        effective_suit(self.0[0], game_type)
    }

    /// Index (0..=2, in play order) of the card that takes the trick. Trumps
    /// beat any card of the led suit; off-suit non-trumps never take.
    pub fn taker(&self, game_type: GameType) -> usize {
        let trick_suit = self.effective_suit(game_type);
        let mut best_power = -1;
        let mut winner = 0;
        for (i, &card) in self.0.iter().enumerate() {
            let card_suit = effective_suit(card, game_type);
            let mut power = 0;
            if card_suit == EffectiveSuit::Trumps {
                power += TRUMP_POWER_OFFSET;
            } else if card_suit != trick_suit {
                continue;
            }
            power += relative_power(card, game_type);
            if power > best_power {
                best_power = power;
                winner = i;
            }
        }
        winner
    }
}
