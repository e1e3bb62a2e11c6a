//! Bidding sub-protocol: caller/responder discovery, call and hold legality,
//! termination, declarer selection.
//!
//! Seats keep their initial roles here (forehand 0, middlehand 1,
//! rearhand 2). The middlehand opens against the forehand; whoever passes
//! drops out and the table above `eval_state` collapses accordingly.

use super::state::{Seat, FOREHAND, MIDDLEHAND, REARHAND};
use crate::errors::domain::DomainError;

/// Wire sentinel for passing. Real calls are validated against [`MIN_BID`]
/// at the action layer; this module only requires strictly increasing values.
pub const BID_PASS: u32 = 0;

/// Smallest meaningful Skat call (♦ game, factor 2).
pub const MIN_BID: u32 = 18;

#[derive(Debug, Clone, Default, PartialEq)]
struct BiddingSeat {
    /// Last value called or held; None until the seat first calls.
    last_bid: Option<u32>,
    has_passed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiddingState {
    seats: [BiddingSeat; 3],
    declarer: Option<Seat>,
    awaiting_response: bool,
}

impl Default for BiddingState {
    fn default() -> Self {
        Self::new()
    }
}

impl BiddingState {
    pub fn new() -> Self {
        Self {
            seats: Default::default(),
            declarer: None,
            awaiting_response: false,
        }
    }

    /// Current (caller, responder) under the pass table:
    ///
    /// | passed              | caller     | responder  |
    /// |---------------------|------------|------------|
    /// | none                | middlehand | forehand   |
    /// | middlehand          | rearhand   | forehand   |
    /// | forehand            | rearhand   | middlehand |
    /// | middle+forehand     | rearhand   | -          |
    /// | middle+rearhand     | forehand   | -          |
    /// | forehand+rearhand   | middlehand | -          |
    /// | all three           | -          | -          |
    fn eval_state(&self) -> (Option<Seat>, Option<Seat>) {
        if self.declarer.is_some() {
            return (None, None);
        }

        let forehand_passed = self.seats[FOREHAND as usize].has_passed;
        let middlehand_passed = self.seats[MIDDLEHAND as usize].has_passed;
        let rearhand_passed = self.seats[REARHAND as usize].has_passed;

        if forehand_passed {
            if rearhand_passed {
                let caller = (!middlehand_passed).then_some(MIDDLEHAND);
                (caller, None)
            } else {
                let responder = (!middlehand_passed).then_some(MIDDLEHAND);
                (Some(REARHAND), responder)
            }
        } else if middlehand_passed {
            if rearhand_passed {
                (Some(FOREHAND), None)
            } else {
                (Some(REARHAND), Some(FOREHAND))
            }
        } else {
            (Some(MIDDLEHAND), Some(FOREHAND))
        }
    }

    /// Fix the declarer once a lone caller remains, provided that caller has
    /// ever called a real value. All-pass leaves the declarer unset.
    fn auto_conclude(&mut self) {
        if self.declarer.is_some() {
            return;
        }
        let (caller, responder) = self.eval_state();
        let Some(caller) = caller else { return };
        if responder.is_some() {
            return;
        }
        if self.seats[caller as usize].last_bid.is_some() {
            self.declarer = Some(caller);
        }
    }

    /// The seat expected to call next; None iff bidding is done.
    pub fn caller(&self) -> Option<Seat> {
        self.eval_state().0
    }

    /// The seat expected to hold or pass; None when no response is pending
    /// and nobody is left to respond.
    pub fn responder(&self) -> Option<Seat> {
        self.eval_state().1
    }

    pub fn awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    pub fn done(&self) -> bool {
        self.caller().is_none()
    }

    /// The winning call, 0 while bidding is still open or nobody called.
    pub fn called_game_value(&self) -> u32 {
        match self.declarer {
            Some(declarer) => self.seats[declarer as usize].last_bid.unwrap_or(0),
            None => 0,
        }
    }

    /// Highest value on the table so far, 0 before the first call.
    pub fn last_call(&self) -> u32 {
        self.seats
            .iter()
            .filter_map(|s| s.last_bid)
            .max()
            .unwrap_or(0)
    }

    pub fn declarer(&self) -> Option<Seat> {
        self.declarer
    }

    /// Place a call (or pass) as `seat`.
    pub fn call(&mut self, seat: Seat, value: u32) -> Result<(), DomainError> {
        if self.awaiting_response {
            return Err(DomainError::NotYourTurn);
        }
        if self.caller() != Some(seat) {
            return Err(DomainError::NotYourTurn);
        }
        if value == BID_PASS {
            self.seats[seat as usize].has_passed = true;
        } else {
            if self.seats[seat as usize].last_bid >= Some(value) {
                return Err(DomainError::BidTooLow);
            }
            self.seats[seat as usize].last_bid = Some(value);
            self.awaiting_response = true;
        }
        self.auto_conclude();
        Ok(())
    }

    /// Answer the pending call as `seat`: hold the value or pass.
    pub fn respond(&mut self, seat: Seat, hold: bool) -> Result<(), DomainError> {
        if !self.awaiting_response {
            return Err(DomainError::NotYourTurn);
        }
        let (caller, responder) = self.eval_state();
        if responder != Some(seat) {
            return Err(DomainError::NotYourTurn);
        }
        if hold {
            let caller = caller.expect("a pending response implies a caller");
            self.seats[seat as usize].last_bid = self.seats[caller as usize].last_bid;
        } else {
            self.seats[seat as usize].has_passed = true;
        }
        self.awaiting_response = false;
        self.auto_conclude();
        Ok(())
    }
}
