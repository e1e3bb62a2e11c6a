//! Game modifier bit-set: Hand, Schneider, Schwarz, their announced
//! counterparts, and Ouvert.

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use super::cards_types::GameType;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(u16);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const HAND: Modifiers = Modifiers(1 << 0);
    pub const SCHNEIDER: Modifiers = Modifiers(1 << 1);
    pub const SCHWARZ: Modifiers = Modifiers(1 << 2);
    pub const SCHNEIDER_ANNOUNCED: Modifiers = Modifiers(1 << 3);
    pub const SCHWARZ_ANNOUNCED: Modifiers = Modifiers(1 << 4);
    pub const OUVERT: Modifiers = Modifiers(1 << 5);

    /// Modifiers tracked by the engine itself during play.
    pub const STATE: Modifiers =
        Modifiers(Self::HAND.0 | Self::SCHNEIDER.0 | Self::SCHWARZ.0);

    /// Modifiers a declarer may announce.
    pub const ANNOUNCEMENT: Modifiers =
        Modifiers(Self::SCHNEIDER_ANNOUNCED.0 | Self::SCHWARZ_ANNOUNCED.0 | Self::OUVERT.0);

    /// True iff every bit of `other` is set in `self`.
    pub fn test(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn with(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    pub fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    /// Add implied bits: Schwarz implies Schneider, announced Schwarz implies
    /// announced Schneider. Idempotent.
    pub fn normalized(self) -> Modifiers {
        let mut result = self;
        if result.test(Self::SCHWARZ) {
            result = result.with(Self::SCHNEIDER);
        }
        if result.test(Self::SCHWARZ_ANNOUNCED) {
            result = result.with(Self::SCHNEIDER_ANNOUNCED);
        }
        result
    }

    /// A set is announceable iff it is normalized and contains only
    /// announcement bits.
    pub fn is_announceable(self) -> bool {
        self.normalized() == self && self.without(Self::ANNOUNCEMENT) == Self::NONE
    }

    /// Whether this (normalized) set is a valid declaration for `game_type`.
    /// Null admits no Schneider/Schwarz announcements; suit and Grand games
    /// require Hand for an announced Schneider. Junk is never valid.
    pub fn valid_for(self, game_type: GameType) -> bool {
        if self != self.normalized() {
            return false;
        }
        match game_type {
            GameType::Null => {
                !self.test(Self::SCHNEIDER_ANNOUNCED) && !self.test(Self::SCHWARZ_ANNOUNCED)
            }
            GameType::Diamonds
            | GameType::Hearts
            | GameType::Spades
            | GameType::Clubs
            | GameType::Grand => !(self.test(Self::SCHNEIDER_ANNOUNCED) && !self.test(Self::HAND)),
            GameType::Junk => false,
        }
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    /// Reconstitute from raw bits, e.g. out of a journal payload.
    pub fn from_bits(bits: u16) -> Self {
        Modifiers(bits)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        self.with(rhs)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        *self = self.with(rhs);
    }
}
