//! Replayable action journal.
//!
//! Every state change enters the engine as a typed [`Action`]. An action
//! serializes as a two-level envelope `{"kind": <string>, "spec": <payload>}`
//! so hosts can dispatch without understanding every payload. A [`Journal`]
//! records applied entries; replayed against a fresh engine seeded with the
//! same server seed, it reconstructs the exact final state.

use serde::{Deserialize, Serialize};

use crate::domain::scoring::ScoreDefinition;
use crate::domain::{Card, CardSet, GameState, GameType, Modifiers, Seat, Seed, SEATS};
use crate::errors::domain::DomainError;

/// A participant action. `seat` is carried separately (see [`JournalEntry`]);
/// seat `None` denotes the dealer and is only meaningful for `set_seed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "spec", rename_all = "snake_case")]
pub enum Action {
    SetSeed {
        seed: Seed,
    },
    #[serde(rename = "bid_call")]
    CallBid {
        value: u32,
    },
    #[serde(rename = "bid_reply")]
    ReplyToBid {
        hold: bool,
    },
    TakeSkat {},
    Declare {
        #[serde(rename = "GameType")]
        game_type: GameType,
        #[serde(rename = "AnnounceModifiers")]
        announce_modifiers: Modifiers,
        #[serde(rename = "CardsToPush")]
        cards_to_push: CardSet,
    },
    #[serde(rename = "play")]
    PlayCard {
        card: Card,
    },
    /// Reserved kind; applying it is always rejected.
    Resign {},
    /// Reserved kind; applying it is always rejected.
    Peek {},
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetSeed { .. } => "set_seed",
            Action::CallBid { .. } => "bid_call",
            Action::ReplyToBid { .. } => "bid_reply",
            Action::TakeSkat {} => "take_skat",
            Action::Declare { .. } => "declare",
            Action::PlayCard { .. } => "play",
            Action::Resign {} => "resign",
            Action::Peek {} => "peek",
        }
    }

    /// Apply this action as `seat`. Errors leave the game untouched.
    ///
    /// `set_seed` auto-deals once the last missing contribution arrives, so
    /// journals need no explicit deal marker.
    pub fn apply(&self, game: &mut GameState, seat: Option<Seat>) -> Result<(), DomainError> {
        if let Some(seat) = seat {
            if seat as usize >= SEATS {
                return Err(DomainError::NotYourTurn);
            }
        }
        match self {
            Action::SetSeed { seed } => {
                match seat {
                    None => game.set_dealer_seed(seed.clone())?,
                    Some(seat) => game.set_seed(seat, seed.clone())?,
                }
                if game.all_seeds_present() {
                    game.deal()?;
                }
                Ok(())
            }
            Action::CallBid { value } => {
                let seat = seat.ok_or(DomainError::NotYourTurn)?;
                game.call_bid(seat, *value)
            }
            Action::ReplyToBid { hold } => {
                let seat = seat.ok_or(DomainError::NotYourTurn)?;
                game.reply_to_bid(seat, *hold)
            }
            Action::TakeSkat {} => {
                let seat = seat.ok_or(DomainError::NotYourTurn)?;
                game.take_skat(seat)
            }
            Action::Declare {
                game_type,
                announce_modifiers,
                cards_to_push,
            } => {
                let seat = seat.ok_or(DomainError::NotYourTurn)?;
                game.declare(seat, *game_type, *announce_modifiers, cards_to_push.clone())
            }
            Action::PlayCard { card } => {
                let seat = seat.ok_or(DomainError::NotYourTurn)?;
                game.play_card(seat, *card)
            }
            Action::Resign {} | Action::Peek {} => Err(DomainError::NotImplemented),
        }
    }
}

/// One applied action with the seat it was applied as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub seat: Option<Seat>,
    #[serde(flatten)]
    pub action: Action,
}

/// Ordered record of every action a game accepted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, seat: Option<Seat>, action: Action) {
        self.entries.push(JournalEntry { seat, action });
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reconstruct the final state by replaying every entry against a fresh
    /// engine carrying the original server seed and scoring rule.
    pub fn replay(
        &self,
        server_seed: Seed,
        with_dealer: bool,
        scoring: ScoreDefinition,
    ) -> Result<GameState, DomainError> {
        let mut game = GameState::new(with_dealer, scoring);
        game.set_server_seed(server_seed)?;
        for entry in &self.entries {
            entry.action.apply(&mut game, entry.seat)?;
        }
        Ok(game)
    }

    /// One JSON object per line, suitable for append-only logs.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&serde_json::to_string(entry)?);
            out.push('\n');
        }
        Ok(out)
    }

    pub fn from_jsonl(input: &str) -> Result<Self, serde_json::Error> {
        let entries = input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect::<Result<Vec<JournalEntry>, _>>()?;
        Ok(Self { entries })
    }
}
