//! Domain layer: the pure, synchronous Skat rules engine.

pub mod bidding;
pub mod blinded;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod modifiers;
pub mod playing;
pub mod scoring;
pub mod shuffle;
pub mod state;

#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_cards;
#[cfg(test)]
mod tests_playing;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use blinded::{blinded_for_seat, BlindedGameState};
pub use cards_logic::{effective_suit, relative_power};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{new_deck, Card, CardSet, EffectiveSuit, GameType, Rank, Suit, Trick};
pub use modifiers::Modifiers;
pub use scoring::{LossReason, ScoreDefinition};
pub use state::{GameState, Phase, Seat, Seed, FOREHAND, MIDDLEHAND, REARHAND, SEATS};
