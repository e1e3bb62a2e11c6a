//! Trick play: suit-following, trick accumulation, forehand rotation.
//!
//! `PlayingState` owns its copies of the hands; the engine façade routes all
//! hand views through it while the playing phase is active. The declarer's
//! won-card pile starts with the two skat (or pushed) cards, which count
//! toward the declarer's final point total.

use super::cards_logic::effective_suit;
use super::cards_types::{Card, CardSet, GameType, Trick};
use super::state::{Seat, FOREHAND, SEATS};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
struct PlayingSeat {
    hand: CardSet,
    won_cards: CardSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayingState {
    forehand: Seat,
    current: Seat,
    declarer: Seat,
    game_type: GameType,
    table: CardSet,
    last_trick: Option<(Trick, Seat)>,
    seats: [PlayingSeat; 3],
}

impl PlayingState {
    pub fn new(declarer: Seat, game_type: GameType, hands: [CardSet; 3], pushed: CardSet) -> Self {
        let mut seats = hands.map(|hand| PlayingSeat {
            hand,
            won_cards: CardSet::new(),
        });
        if !pushed.is_empty() {
            seats[declarer as usize].won_cards = pushed;
        }
        Self {
            forehand: FOREHAND,
            current: FOREHAND,
            declarer,
            game_type,
            table: CardSet::new(),
            last_trick: None,
            seats,
        }
    }

    pub fn declarer(&self) -> Seat {
        self.declarer
    }

    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    pub fn current_player(&self) -> Seat {
        self.current
    }

    pub fn forehand(&self) -> Seat {
        self.forehand
    }

    pub fn table(&self) -> &CardSet {
        &self.table
    }

    pub fn hand(&self, seat: Seat) -> &CardSet {
        &self.seats[seat as usize].hand
    }

    pub fn won_cards(&self, seat: Seat) -> &CardSet {
        &self.seats[seat as usize].won_cards
    }

    /// The most recently completed trick and its (absolute) winner.
    pub fn last_trick(&self) -> Option<(Trick, Seat)> {
        self.last_trick
    }

    /// All hands empty: time to score.
    pub fn is_finished(&self) -> bool {
        self.seats.iter().all(|s| s.hand.is_empty())
    }

    fn table_suit(&self) -> Option<super::cards_types::EffectiveSuit> {
        self.table.get(0).map(|c| effective_suit(c, self.game_type))
    }

    /// Play `card` as `seat`. The central legality check: the seat must be
    /// current, and if the table is non-empty the card must follow the table
    /// suit whenever the hand can.
    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), DomainError> {
        if seat != self.current {
            return Err(DomainError::NotYourTurn);
        }

        if let Some(table_suit) = self.table_suit() {
            let card_suit = effective_suit(card, self.game_type);
            if card_suit != table_suit {
                let hand = &self.seats[seat as usize].hand;
                if hand
                    .iter()
                    .any(|&c| effective_suit(c, self.game_type) == table_suit)
                {
                    return Err(DomainError::MustFollowSuit);
                }
            }
        }

        self.seats[seat as usize].hand.pop(card)?;
        self.table
            .push(card)
            .expect("card taken from a hand cannot already be on the table");

        self.current = (self.current + 1) % SEATS as Seat;
        if self.table.len() == 3 {
            self.conclude_trick();
        }
        Ok(())
    }

    fn conclude_trick(&mut self) {
        let trick = Trick([
            self.table.get(0).expect("table holds three cards"),
            self.table.get(1).expect("table holds three cards"),
            self.table.get(2).expect("table holds three cards"),
        ]);
        let winner = (self.forehand + trick.taker(self.game_type) as Seat) % SEATS as Seat;
        self.last_trick = Some((trick, winner));
        self.seats[winner as usize]
            .won_cards
            .extend_from(trick.cards());
        self.table.clear();
        self.forehand = winner;
        self.current = winner;
    }
}
