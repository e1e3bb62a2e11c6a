//! Five-phase game state machine.
//!
//! A game advances monotonically Init → Bidding → Declaration → Playing →
//! Scored. Every action asserts phase, seat, and argument validity before
//! touching anything; a rejection leaves the state bit-identical. The whole
//! value is `Clone` and free of I/O so hosts may snapshot it at any instant.

use rand::RngCore;

use super::bidding::{BiddingState, BID_PASS, MIN_BID};
use super::cards_types::{new_deck, Card, CardSet, GameType};
use super::modifiers::Modifiers;
use super::playing::PlayingState;
use super::scoring::{
    calculate_game_value, evaluate_game, evaluate_won_cards, matadors_jack_strength, LossReason,
    ScoreDefinition,
};
use super::shuffle::shuffle_deck_with_seed;
use crate::errors::domain::DomainError;

pub type Seat = u8;

pub const FOREHAND: Seat = 0;
pub const MIDDLEHAND: Seat = 1;
pub const REARHAND: Seat = 2;
pub const SEATS: usize = 3;

pub const SERVER_SEED_SIZE: usize = 16;

/// A seed contribution; empty is allowed, unset is not.
pub type Seed = Vec<u8>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Seeds are being collected.
    Init,
    /// Cards are dealt, seats bid for the declaration.
    Bidding,
    /// The declarer may take the skat and must declare a game.
    Declaration,
    /// Trick play.
    Playing,
    /// Terminal: the game has been evaluated (or abandoned).
    Scored,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct SeatState {
    seed: Option<Seed>,
    hand: CardSet,
    score: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    phase: Phase,
    with_dealer: bool,
    server_seed: Option<Seed>,
    dealer_seed: Option<Seed>,
    scoring: ScoreDefinition,

    skat: CardSet,
    seats: [SeatState; SEATS],
    modifiers: Modifiers,
    loss_reason: Option<LossReason>,

    bidding: Option<BiddingState>,
    playing: Option<PlayingState>,

    jack_strength: i32,
    final_game_value: i32,
}

impl GameState {
    /// A fresh game in Init with the Hand modifier set (it is cleared when
    /// the declarer picks up the skat).
    pub fn new(with_dealer: bool, scoring: ScoreDefinition) -> Self {
        Self {
            phase: Phase::Init,
            with_dealer,
            server_seed: None,
            dealer_seed: None,
            scoring,
            skat: CardSet::new(),
            seats: Default::default(),
            modifiers: Modifiers::HAND,
            loss_reason: None,
            bidding: None,
            playing: None,
            jack_strength: 0,
            final_game_value: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn with_dealer(&self) -> bool {
        self.with_dealer
    }

    // ---- Init phase -------------------------------------------------------

    /// Store `seat`'s seed contribution. Repeat submissions overwrite.
    pub fn set_seed(&mut self, seat: Seat, seed: Seed) -> Result<(), DomainError> {
        if self.phase != Phase::Init {
            return Err(DomainError::WrongPhase);
        }
        self.seats[seat as usize].seed = Some(seed);
        Ok(())
    }

    /// Store the dealer's seed. Only meaningful on a four-seat table, which
    /// the engine does not rotate yet.
    pub fn set_dealer_seed(&mut self, seed: Seed) -> Result<(), DomainError> {
        if self.phase != Phase::Init {
            return Err(DomainError::WrongPhase);
        }
        if !self.with_dealer {
            return Err(DomainError::NotImplemented);
        }
        self.dealer_seed = Some(seed);
        Ok(())
    }

    /// Fix the server's seed contribution; exactly once, before dealing.
    pub fn set_server_seed(&mut self, seed: Seed) -> Result<(), DomainError> {
        if self.phase != Phase::Init || self.server_seed.is_some() {
            return Err(DomainError::WrongPhase);
        }
        self.server_seed = Some(seed);
        Ok(())
    }

    /// Generate and fix a random 16-byte server seed.
    pub fn generate_server_seed(&mut self) -> Result<(), DomainError> {
        let mut seed = vec![0u8; SERVER_SEED_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut seed);
        self.set_server_seed(seed)
    }

    pub fn server_seed(&self) -> Option<&[u8]> {
        self.server_seed.as_deref()
    }

    pub fn seed_provided(&self, seat: Seat) -> bool {
        self.seats[seat as usize].seed.is_some()
    }

    /// Reveal a seat's seed; used by post-game audit views only.
    pub fn seat_seed(&self, seat: Seat) -> Option<&[u8]> {
        self.seats[seat as usize].seed.as_deref()
    }

    /// serverSeed ∥ seed0 ∥ seed1 ∥ seed2 ∥ (dealerSeed if enabled); fails
    /// while any contribution is missing.
    pub fn composed_seed(&self) -> Result<Seed, DomainError> {
        let mut result = self
            .server_seed
            .clone()
            .ok_or(DomainError::MissingSeed)?;
        for seat in &self.seats {
            let seed = seat.seed.as_ref().ok_or(DomainError::MissingSeed)?;
            result.extend_from_slice(seed);
        }
        if self.with_dealer {
            let dealer = self.dealer_seed.as_ref().ok_or(DomainError::MissingSeed)?;
            result.extend_from_slice(dealer);
        }
        Ok(result)
    }

    /// True once every required seed contribution is present.
    pub fn all_seeds_present(&self) -> bool {
        self.composed_seed().is_ok()
    }

    /// Shuffle under the composed seed and deal 3-3-3 / 2 skat / 4-4-4 /
    /// 3-3-3. The deal order is not cryptographically significant (the deck
    /// is pre-shuffled) but is fixed for reproducibility.
    ///
    /// Transition Init → Bidding.
    pub fn deal(&mut self) -> Result<(), DomainError> {
        if self.phase != Phase::Init {
            return Err(DomainError::WrongPhase);
        }
        let seed = self.composed_seed()?;

        let mut deck = new_deck();
        shuffle_deck_with_seed(&seed, &mut deck)?;
        let cards: Vec<Card> = deck.iter().copied().collect();

        fn deal_round(seats: &mut [SeatState; SEATS], cards: &[Card], pos: &mut usize, count: usize) {
            for seat in seats.iter_mut() {
                seat.hand.extend_from(&cards[*pos..*pos + count]);
                *pos += count;
            }
        }

        let mut pos = 0usize;
        deal_round(&mut self.seats, &cards, &mut pos, 3);
        self.skat.extend_from(&cards[pos..pos + 2]);
        pos += 2;
        deal_round(&mut self.seats, &cards, &mut pos, 4);
        deal_round(&mut self.seats, &cards, &mut pos, 3);
        debug_assert_eq!(pos, cards.len(), "deal must consume the whole deck");

        self.phase = Phase::Bidding;
        self.bidding = Some(BiddingState::new());
        Ok(())
    }

    // ---- Bidding phase ----------------------------------------------------

    /// The bidding sub-state, available while bidding is open.
    pub fn bidding(&self) -> Option<&BiddingState> {
        if self.phase != Phase::Bidding {
            return None;
        }
        self.bidding.as_ref()
    }

    /// Place a call as `seat`. Values are the pass sentinel 0 or ≥ 18.
    ///
    /// Transition Bidding → Declaration once a declarer is fixed, or
    /// Bidding → Scored (abandoned) when all three seats pass.
    pub fn call_bid(&mut self, seat: Seat, value: u32) -> Result<(), DomainError> {
        if self.phase != Phase::Bidding {
            return Err(DomainError::WrongPhase);
        }
        if value != BID_PASS && value < MIN_BID {
            return Err(DomainError::BidTooLow);
        }
        self.bidding
            .as_mut()
            .ok_or(DomainError::WrongPhase)?
            .call(seat, value)?;
        self.conclude_bidding_if_done();
        Ok(())
    }

    /// Hold or pass on the pending call as `seat`.
    pub fn reply_to_bid(&mut self, seat: Seat, hold: bool) -> Result<(), DomainError> {
        if self.phase != Phase::Bidding {
            return Err(DomainError::WrongPhase);
        }
        self.bidding
            .as_mut()
            .ok_or(DomainError::WrongPhase)?
            .respond(seat, hold)?;
        self.conclude_bidding_if_done();
        Ok(())
    }

    fn conclude_bidding_if_done(&mut self) {
        let Some(bidding) = self.bidding.as_ref() else {
            return;
        };
        if !bidding.done() {
            return;
        }
        if bidding.declarer().is_some() {
            self.phase = Phase::Declaration;
        } else {
            // All three passed: abandon the deal with zero scores.
            self.loss_reason = Some(LossReason::Abandoned);
            self.phase = Phase::Scored;
        }
    }

    pub fn declarer(&self) -> Option<Seat> {
        self.bidding.as_ref().and_then(|b| b.declarer())
    }

    /// The winning call; 0 while bidding is open or nobody called.
    pub fn called_game_value(&self) -> u32 {
        self.bidding
            .as_ref()
            .map(|b| b.called_game_value())
            .unwrap_or(0)
    }

    // ---- Declaration phase ------------------------------------------------

    /// Pick up the skat as the declarer: moves both cards into the hand and
    /// clears the Hand modifier.
    pub fn take_skat(&mut self, seat: Seat) -> Result<(), DomainError> {
        if self.phase != Phase::Declaration {
            return Err(DomainError::WrongPhase);
        }
        if self.declarer() != Some(seat) {
            return Err(DomainError::NotYourTurn);
        }
        if !self.modifiers.test(Modifiers::HAND) {
            // Skat already taken.
            return Err(DomainError::WrongPhase);
        }
        self.modifiers = self.modifiers.without(Modifiers::HAND);
        let skat = self.skat.clone();
        for card in &skat {
            self.seats[seat as usize]
                .hand
                .push(*card)
                .map_err(|_| DomainError::InvalidGame)?;
        }
        Ok(())
    }

    /// Declare the game: type, announcements, and (iff the skat was taken)
    /// exactly two cards to push. Hand games push nothing and keep the
    /// untaken skat counting for the declarer.
    ///
    /// Transition Declaration → Playing.
    pub fn declare(
        &mut self,
        seat: Seat,
        game_type: GameType,
        announced: Modifiers,
        cards_to_push: CardSet,
    ) -> Result<(), DomainError> {
        if self.phase != Phase::Declaration {
            return Err(DomainError::WrongPhase);
        }
        let declarer = self.declarer().ok_or(DomainError::BiddingNotDone)?;
        if declarer != seat {
            return Err(DomainError::NotYourTurn);
        }
        if !announced.is_announceable() {
            return Err(DomainError::InvalidGame);
        }
        let new_modifiers = self.modifiers | announced;
        if !new_modifiers.valid_for(game_type) {
            return Err(DomainError::InvalidGame);
        }

        let hand_game = self.modifiers.test(Modifiers::HAND);
        let expected_push = if hand_game { 0 } else { 2 };
        if cards_to_push.len() != expected_push {
            return Err(DomainError::InvalidPush);
        }
        let mut new_hand = self.seats[seat as usize].hand.clone();
        for card in &cards_to_push {
            new_hand.pop(*card).map_err(|_| DomainError::InvalidPush)?;
        }

        // The two cards counting for the declarer: the push, or the untaken
        // skat in a hand game.
        let counting = if cards_to_push.is_empty() {
            self.skat.clone()
        } else {
            cards_to_push
        };

        let mut hands = [
            self.seats[0].hand.clone(),
            self.seats[1].hand.clone(),
            self.seats[2].hand.clone(),
        ];
        hands[seat as usize] = new_hand.clone();

        // The stored hand becomes the scoring hand: the ten cards kept plus
        // the two counting cards, i.e. everything the declarer owns.
        let mut scoring_hand = new_hand;
        for card in &counting {
            scoring_hand
                .push(*card)
                .map_err(|_| DomainError::InvalidPush)?;
        }

        self.modifiers = new_modifiers;
        self.playing = Some(PlayingState::new(
            declarer,
            game_type,
            hands,
            counting,
        ));
        self.seats[seat as usize].hand = scoring_hand;
        self.phase = Phase::Playing;
        Ok(())
    }

    // ---- Playing phase ----------------------------------------------------

    /// The playing sub-state, available during and after trick play.
    pub fn playing(&self) -> Option<&PlayingState> {
        self.playing.as_ref()
    }

    /// Play a card as `seat`; scores the game after the last trick.
    ///
    /// Transition Playing → Scored when all hands are empty.
    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<(), DomainError> {
        if self.phase != Phase::Playing {
            return Err(DomainError::WrongPhase);
        }
        let playing = self.playing.as_mut().ok_or(DomainError::WrongPhase)?;
        playing.play(seat, card)?;
        if playing.is_finished() {
            self.evaluate();
        }
        Ok(())
    }

    /// Per-seat hand view, routed through the playing state while it exists.
    pub fn hand(&self, seat: Seat) -> CardSet {
        match (&self.playing, self.phase) {
            (Some(playing), Phase::Playing | Phase::Scored) => playing.hand(seat).clone(),
            _ => self.seats[seat as usize].hand.clone(),
        }
    }

    pub fn skat(&self) -> &CardSet {
        &self.skat
    }

    /// Count of skat cards still face down: 2 until the declarer takes the
    /// skat, 0 afterwards.
    pub fn skat_cards_down(&self) -> usize {
        if self.modifiers.test(Modifiers::HAND) {
            self.skat.len()
        } else {
            0
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn evaluate(&mut self) {
        let playing = self
            .playing
            .as_ref()
            .expect("evaluation happens at the end of play");
        let declarer = playing.declarer();
        let game_type = playing.game_type();

        let (result_modifiers, declarer_score, _) = evaluate_won_cards(
            [
                playing.won_cards(FOREHAND),
                playing.won_cards(MIDDLEHAND),
                playing.won_cards(REARHAND),
            ],
            declarer,
        );
        let modifiers = (self.modifiers | result_modifiers).normalized();

        let scoring_hand = &self.seats[declarer as usize].hand;
        let (base_value, factor) = calculate_game_value(scoring_hand, game_type, modifiers);
        let (declarer_won, game_value, loss_reason) = evaluate_game(
            base_value,
            factor,
            declarer_score,
            self.called_game_value() as i32,
            game_type,
            modifiers,
        );
        let scores = self
            .scoring
            .calculate_score(game_value, declarer, declarer_won);

        self.jack_strength = matadors_jack_strength(scoring_hand, game_type);
        self.modifiers = modifiers;
        for (seat, score) in self.seats.iter_mut().zip(scores) {
            seat.score = score;
        }
        self.loss_reason = loss_reason;
        self.final_game_value = game_value;
        self.phase = Phase::Scored;
    }

    // ---- Scored phase -----------------------------------------------------

    pub fn score(&self, seat: Seat) -> i32 {
        self.seats[seat as usize].score
    }

    pub fn loss_reason(&self) -> Option<LossReason> {
        self.loss_reason
    }

    pub fn final_game_value(&self) -> i32 {
        self.final_game_value
    }

    pub fn jack_strength(&self) -> i32 {
        self.jack_strength
    }

    /// Card points in a seat's won pile; 0 before play ends.
    pub fn won_card_points(&self, seat: Seat) -> i32 {
        self.playing
            .as_ref()
            .map(|p| p.won_cards(seat).value())
            .unwrap_or(0)
    }
}
