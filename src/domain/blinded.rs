//! Per-seat blinded projection of the game state.
//!
//! Emitted after every successful action and after (re)connects; it exposes
//! only what the receiving seat may legally see. Other hands stay hidden
//! behind card counts; seeds are revealed once the game is scored so the
//! shuffle can be audited.

use serde::{Deserialize, Serialize};

use super::cards_types::{CardSet, GameType};
use super::modifiers::Modifiers;
use super::scoring::LossReason;
use super::state::{GameState, Phase, Seat, Seed, SEATS};

/// Public facts about one seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlindedPlayer {
    pub ncards: usize,
    pub seed_provided: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub won_card_points: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub awarded_score: Option<i32>,
    /// Revealed post-game for shuffle auditing.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seed: Option<Seed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiddingView {
    pub last_bid: u32,
    pub caller: Option<Seat>,
    pub responder: Option<Seat>,
    pub awaiting_response: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclarationView {
    pub declarer: Option<Seat>,
    pub last_bidding_call: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayingView {
    pub declarer: Option<Seat>,
    pub last_bidding_call: u32,
    pub current_forehand: Seat,
    pub current_player: Seat,
    pub game_type: GameType,
    pub announced_modifiers: Modifiers,
    pub table: CardSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredView {
    pub declarer: Option<Seat>,
    pub last_bidding_call: u32,
    pub loss_reason: Option<LossReason>,
    pub final_modifiers: Modifiers,
    pub final_game_value: i32,
    pub jack_strength: i32,
}

/// Phase-specific public state, adjacently tagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data", rename_all = "snake_case")]
pub enum PhaseView {
    Init,
    Bidding(BiddingView),
    Declaration(DeclarationView),
    Playing(PlayingView),
    Scored(ScoredView),
}

/// Everything one seat may see right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlindedGameState {
    pub players: Vec<BlindedPlayer>,
    /// The viewer's own hand.
    pub hand: CardSet,
    /// Skat cards still face down (2 until taken, 0 after).
    pub skat_cards: usize,
    /// The server contribution is public from the start.
    pub server_seed: Option<Seed>,
    pub phase: PhaseView,
}

/// Build the projection of `game` for `viewer`.
pub fn blinded_for_seat(game: &GameState, viewer: Seat) -> BlindedGameState {
    let scored = game.phase() == Phase::Scored;
    let players = (0..SEATS as Seat)
        .map(|seat| BlindedPlayer {
            ncards: game.hand(seat).len(),
            seed_provided: game.seed_provided(seat),
            won_card_points: scored.then(|| game.won_card_points(seat)),
            awarded_score: scored.then(|| game.score(seat)),
            seed: if scored {
                game.seat_seed(seat).map(<[u8]>::to_vec)
            } else {
                None
            },
        })
        .collect();

    let phase = match game.phase() {
        Phase::Init => PhaseView::Init,
        Phase::Bidding => bidding_view(game),
        Phase::Declaration => PhaseView::Declaration(DeclarationView {
            declarer: game.declarer(),
            last_bidding_call: game.called_game_value(),
        }),
        Phase::Playing => playing_view(game),
        Phase::Scored => PhaseView::Scored(ScoredView {
            declarer: game.declarer(),
            last_bidding_call: game.called_game_value(),
            loss_reason: game.loss_reason(),
            final_modifiers: game.modifiers(),
            final_game_value: game.final_game_value(),
            jack_strength: game.jack_strength(),
        }),
    };

    BlindedGameState {
        players,
        hand: game.hand(viewer),
        skat_cards: game.skat_cards_down(),
        server_seed: game.server_seed().map(<[u8]>::to_vec),
        phase,
    }
}

fn bidding_view(game: &GameState) -> PhaseView {
    // Outside the bidding phase this constructor is never reached.
    let Some(bidding) = game.bidding() else {
        return PhaseView::Init;
    };
    PhaseView::Bidding(BiddingView {
        last_bid: bidding.last_call(),
        caller: bidding.caller(),
        responder: bidding.responder(),
        awaiting_response: bidding.awaiting_response(),
    })
}

fn playing_view(game: &GameState) -> PhaseView {
    let Some(playing) = game.playing() else {
        return PhaseView::Init;
    };
    PhaseView::Playing(PlayingView {
        declarer: game.declarer(),
        last_bidding_call: game.called_game_value(),
        current_forehand: playing.forehand(),
        current_player: playing.current_player(),
        game_type: playing.game_type(),
        announced_modifiers: game.modifiers(),
        table: playing.table().clone(),
    })
}
