//! Engine-level error type used across the domain, journal, and coordinator.
//!
//! Every variant is a distinct sentinel: rejections carry no payload, leave
//! the game state untouched, and are compared by equality in tests. Hosts
//! translate these into wire errors; the engine never does I/O.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    // Structural
    CardNotPresent,
    CardAlreadyPresent,
    NotEnoughCards,
    TooManyItems,
    IncorrectSeedLength,

    // State machine
    WrongPhase,
    NotYourTurn,
    BiddingNotDone,
    BidTooLow,
    MustFollowSuit,
    InvalidGame,
    InvalidPush,
    MissingSeed,

    // Reserved functionality (resign, peek, dealer rotation)
    NotImplemented,
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let msg = match self {
            DomainError::CardNotPresent => "the card is not present",
            DomainError::CardAlreadyPresent => "the card is already in the set",
            DomainError::NotEnoughCards => "fewer cards available than requested",
            DomainError::TooManyItems => "too many items to shuffle",
            DomainError::IncorrectSeedLength => "derived seed has incorrect length",
            DomainError::WrongPhase => "wrong game phase for this action",
            DomainError::NotYourTurn => "this is not your turn",
            DomainError::BiddingNotDone => "bidding has not completed yet",
            DomainError::BidTooLow => "bid value too low",
            DomainError::MustFollowSuit => "must follow suit",
            DomainError::InvalidGame => "invalid game declaration",
            DomainError::InvalidPush => "invalid push request",
            DomainError::MissingSeed => "not all parties have submitted a seed",
            DomainError::NotImplemented => "not implemented",
        };
        f.write_str(msg)
    }
}

impl Error for DomainError {}
