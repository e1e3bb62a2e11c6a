//! End-of-game arithmetic: matadors' jack strength, game value, win/loss
//! disposition, and the pluggable score distribution.

use serde::{Deserialize, Serialize};

use super::cards_logic::{effective_suit, relative_power};
use super::cards_types::{Card, CardSet, EffectiveSuit, GameType, Rank, Suit};
use super::modifiers::Modifiers;
use super::state::Seat;

/// Why the declarer lost. Serialized names are stable wire/journal tokens.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossReason {
    NotEnoughPoints,
    NoSchneider,
    NoSchwarz,
    NotNull,
    Overbid,
    /// All three seats passed; the deal was abandoned without a declarer.
    Abandoned,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFormula {
    pub offset: i32,
    pub factor: i32,
}

impl ScoreFormula {
    pub fn apply(self, value: i32) -> i32 {
        self.offset + self.factor * value
    }
}

/// Affine score distribution over the final game value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDefinition {
    pub declarer_win: ScoreFormula,
    pub declarer_loss: ScoreFormula,
    pub defender_win: ScoreFormula,
    pub defender_loss: ScoreFormula,
}

impl ScoreDefinition {
    /// Classic scoring: declarer takes ±value (doubled on loss), defenders
    /// take nothing either way.
    pub fn standard() -> Self {
        Self {
            declarer_win: ScoreFormula { offset: 0, factor: 1 },
            declarer_loss: ScoreFormula { offset: 0, factor: -2 },
            defender_win: ScoreFormula { offset: 0, factor: 0 },
            defender_loss: ScoreFormula { offset: 0, factor: 0 },
        }
    }

    /// League ("Seeger") variant: +50 on a win, defenders take a flat 40
    /// when they bring the declarer down.
    pub fn league() -> Self {
        Self {
            declarer_win: ScoreFormula { offset: 50, factor: 1 },
            declarer_loss: ScoreFormula { offset: 0, factor: -2 },
            defender_win: ScoreFormula { offset: 40, factor: 0 },
            defender_loss: ScoreFormula { offset: 0, factor: 0 },
        }
    }

    /// Distribute `game_value` over the three seats.
    pub fn calculate_score(&self, game_value: i32, declarer: Seat, declarer_won: bool) -> [i32; 3] {
        let mut result = [0i32; 3];
        let defender1 = (declarer + 1) % 3;
        let defender2 = (defender1 + 1) % 3;

        let (declarer_formula, defender_formula) = if declarer_won {
            (self.declarer_win, self.defender_loss)
        } else {
            (self.declarer_loss, self.defender_win)
        };

        result[declarer as usize] = declarer_formula.apply(game_value);
        result[defender1 as usize] = defender_formula.apply(game_value);
        result[defender2 as usize] = result[defender1 as usize];
        result
    }
}

/// Trump pecking order for matadors counting, strongest first. Suit games use
/// all eleven entries read in the declared suit's colours; Grand uses the
/// four jacks only.
const REFERENCE_ORDER: [Card; 11] = [
    Card::new(Rank::Jack, Suit::Clubs),
    Card::new(Rank::Jack, Suit::Spades),
    Card::new(Rank::Jack, Suit::Hearts),
    Card::new(Rank::Jack, Suit::Diamonds),
    Card::new(Rank::Ace, Suit::Diamonds),
    Card::new(Rank::Ten, Suit::Diamonds),
    Card::new(Rank::King, Suit::Diamonds),
    Card::new(Rank::Queen, Suit::Diamonds),
    Card::new(Rank::Nine, Suit::Diamonds),
    Card::new(Rank::Eight, Suit::Diamonds),
    Card::new(Rank::Seven, Suit::Diamonds),
];

const REFERENCE_GAME_TYPE: GameType = GameType::Diamonds;

fn effective_power(card: Card, game_type: GameType) -> i32 {
    if effective_suit(card, game_type) == EffectiveSuit::Trumps {
        relative_power(card, game_type)
    } else {
        -1
    }
}

/// Count of consecutive top trumps the hand holds ("with N") or lacks
/// ("without N"), starting from ♣J. Null games have no matadors.
pub fn matadors_jack_strength(cards: &CardSet, game_type: GameType) -> i32 {
    if game_type == GameType::Null {
        return 0;
    }

    let (max, reference, reference_game_type) = if game_type == GameType::Grand {
        (4, &REFERENCE_ORDER[..4], GameType::Grand)
    } else {
        (11, &REFERENCE_ORDER[..], REFERENCE_GAME_TYPE)
    };

    let mut sorted: Vec<Card> = cards.iter().copied().collect();
    sorted.sort_by_key(|&c| -effective_power(c, game_type));

    let Some(&top) = sorted.first() else { return max };
    if effective_suit(top, game_type) != EffectiveSuit::Trumps {
        // No trumps at all: playing "without" everything.
        return max;
    }

    let top_power = relative_power(top, game_type);
    if top_power == relative_power(reference[0], reference_game_type) {
        // "with N": count consecutive matches against the reference order.
        for (i, &card) in sorted.iter().enumerate() {
            if effective_suit(card, game_type) != EffectiveSuit::Trumps {
                return i as i32;
            }
            if i >= reference.len()
                || relative_power(card, game_type)
                    != relative_power(reference[i], reference_game_type)
            {
                return i as i32;
            }
        }
    } else {
        // "without N": find where the top trump sits in the reference order.
        for (i, &ref_card) in reference.iter().enumerate() {
            if top_power == relative_power(ref_card, reference_game_type) {
                return i as i32;
            }
        }
    }
    max
}

/// Base value and factor of the declared game.
///
/// Null values are additive constants (23, +12 Hand, +11 Ouvert); suit and
/// Grand games multiply the base by 1 + matadors + modifier increments.
/// Announced bits only count on top of Hand, which `Modifiers::valid_for`
/// guarantees for declarations the engine accepted.
pub fn calculate_game_value(
    declarer_hand: &CardSet,
    game_type: GameType,
    modifiers: Modifiers,
) -> (i32, i32) {
    let factor = 1;
    match game_type {
        GameType::Null => {
            let hand = modifiers.test(Modifiers::HAND);
            let ouvert = modifiers.test(Modifiers::OUVERT);
            let base = match (hand, ouvert) {
                (true, true) => 59,
                (true, false) => 35,
                (false, true) => 46,
                (false, false) => 23,
            };
            (base, factor)
        }
        GameType::Diamonds
        | GameType::Hearts
        | GameType::Spades
        | GameType::Clubs
        | GameType::Grand => {
            let base = match game_type {
                GameType::Diamonds => 9,
                GameType::Hearts => 10,
                GameType::Spades => 11,
                GameType::Clubs => 12,
                _ => 24,
            };
            let mut factor = 1 + matadors_jack_strength(declarer_hand, game_type);
            if modifiers.test(Modifiers::HAND) {
                factor += 1;
                if modifiers.test(Modifiers::SCHNEIDER_ANNOUNCED) {
                    factor += 1;
                }
                if modifiers.test(Modifiers::SCHWARZ_ANNOUNCED) {
                    factor += 1;
                }
            }
            if modifiers.test(Modifiers::SCHNEIDER) {
                factor += 1;
            }
            if modifiers.test(Modifiers::SCHWARZ) {
                factor += 1;
            }
            if modifiers.test(Modifiers::OUVERT) {
                factor += 1;
            }
            (base, factor)
        }
        GameType::Junk => (0, factor),
    }
}

/// Tally the won-card piles: result modifiers (Schneider/Schwarz bits) plus
/// declarer and defender card points. The declarer's pile already contains
/// the skat or pushed cards.
pub fn evaluate_won_cards(
    won_cards: [&CardSet; 3],
    declarer: Seat,
) -> (Modifiers, i32, i32) {
    let declarer_score = won_cards[declarer as usize].value();
    let defender1 = (declarer + 1) % 3;
    let defender2 = (defender1 + 1) % 3;
    let defender_score =
        won_cards[defender1 as usize].value() + won_cards[defender2 as usize].value();

    let mut modifiers = Modifiers::NONE;
    if defender_score <= 30 || declarer_score <= 30 {
        modifiers |= Modifiers::SCHNEIDER;
    }
    if won_cards[declarer as usize].len() <= 2
        || won_cards[defender1 as usize].len() + won_cards[defender2 as usize].len() <= 2
    {
        modifiers |= Modifiers::SCHWARZ;
    }

    (modifiers.normalized(), declarer_score, defender_score)
}

/// Final disposition: (declarer won, game value, loss reason).
///
/// Overbidding is checked first and rounds the value up to the next multiple
/// of the base at or above the called bid. Null wins iff the declarer took
/// nothing at all; announced Schneider/Schwarz must be delivered; otherwise
/// 61 points win the game.
pub fn evaluate_game(
    base_value: i32,
    factor: i32,
    declarer_score: i32,
    called_bid: i32,
    game_type: GameType,
    modifiers: Modifiers,
) -> (bool, i32, Option<LossReason>) {
    let mut game_value = base_value * factor;
    if game_value < called_bid {
        game_value = base_value * ((called_bid + base_value - 1) / base_value);
        return (false, game_value, Some(LossReason::Overbid));
    }

    if game_type == GameType::Null {
        return if !modifiers.test(Modifiers::SCHWARZ) || declarer_score > 0 {
            (false, game_value, Some(LossReason::NotNull))
        } else {
            (true, game_value, None)
        };
    }

    if modifiers.test(Modifiers::SCHWARZ_ANNOUNCED) && !modifiers.test(Modifiers::SCHWARZ) {
        return (false, game_value, Some(LossReason::NoSchwarz));
    }
    if modifiers.test(Modifiers::SCHNEIDER_ANNOUNCED) && !modifiers.test(Modifiers::SCHNEIDER) {
        return (false, game_value, Some(LossReason::NoSchneider));
    }
    if declarer_score <= 60 {
        return (false, game_value, Some(LossReason::NotEnoughPoints));
    }
    (true, game_value, None)
}
