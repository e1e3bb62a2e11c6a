use crate::domain::bidding::{BiddingState, BID_PASS};
use crate::domain::state::{FOREHAND, MIDDLEHAND, REARHAND};
use crate::errors::domain::DomainError;

#[test]
fn opening_roles() {
    let bidding = BiddingState::new();
    assert_eq!(bidding.caller(), Some(MIDDLEHAND));
    assert_eq!(bidding.responder(), Some(FOREHAND));
    assert!(!bidding.awaiting_response());
    assert!(!bidding.done());
    assert_eq!(bidding.called_game_value(), 0);
}

#[test]
fn forehand_takes_the_game_at_18() {
    // M:18, F:hold, M:pass, R:pass -> declarer F at 18.
    let mut b = BiddingState::new();
    b.call(MIDDLEHAND, 18).unwrap();
    assert!(b.awaiting_response());
    b.respond(FOREHAND, true).unwrap();
    b.call(MIDDLEHAND, BID_PASS).unwrap();
    assert!(!b.done());
    b.call(REARHAND, BID_PASS).unwrap();
    assert!(b.done());
    assert_eq!(b.declarer(), Some(FOREHAND));
    assert_eq!(b.called_game_value(), 18);
}

#[test]
fn forehand_takes_the_game_at_20() {
    // M:18, F:hold, M:20, F:hold, M:pass, R:pass -> declarer F at 20.
    let mut b = BiddingState::new();
    b.call(MIDDLEHAND, 18).unwrap();
    b.respond(FOREHAND, true).unwrap();
    b.call(MIDDLEHAND, 20).unwrap();
    b.respond(FOREHAND, true).unwrap();
    b.call(MIDDLEHAND, BID_PASS).unwrap();
    b.call(REARHAND, BID_PASS).unwrap();
    assert_eq!(b.declarer(), Some(FOREHAND));
    assert_eq!(b.called_game_value(), 20);
}

#[test]
fn middlehand_takes_the_game_when_forehand_releases() {
    // M:18, F:hold, M:20, F:pass, R:pass -> declarer M at 20.
    let mut b = BiddingState::new();
    b.call(MIDDLEHAND, 18).unwrap();
    b.respond(FOREHAND, true).unwrap();
    b.call(MIDDLEHAND, 20).unwrap();
    b.respond(FOREHAND, false).unwrap();
    // Rearhand has not spoken yet; bidding continues against it.
    assert!(!b.done());
    assert_eq!(b.caller(), Some(REARHAND));
    assert_eq!(b.responder(), Some(MIDDLEHAND));
    b.call(REARHAND, BID_PASS).unwrap();
    assert!(b.done());
    assert_eq!(b.declarer(), Some(MIDDLEHAND));
    assert_eq!(b.called_game_value(), 20);
}

#[test]
fn rearhand_takes_the_game() {
    // M:pass, R:18, F:pass -> declarer R at 18.
    let mut b = BiddingState::new();
    b.call(MIDDLEHAND, BID_PASS).unwrap();
    assert_eq!(b.caller(), Some(REARHAND));
    b.call(REARHAND, 18).unwrap();
    b.respond(FOREHAND, false).unwrap();
    assert!(b.done());
    assert_eq!(b.declarer(), Some(REARHAND));
    assert_eq!(b.called_game_value(), 18);
}

#[test]
fn all_pass_leaves_no_declarer() {
    let mut b = BiddingState::new();
    b.call(MIDDLEHAND, BID_PASS).unwrap();
    b.call(REARHAND, BID_PASS).unwrap();
    b.call(FOREHAND, BID_PASS).unwrap();
    assert!(b.done());
    assert_eq!(b.declarer(), None);
    assert_eq!(b.called_game_value(), 0);
}

#[test]
fn forehand_passing_via_respond_releases_to_middlehand_vs_rearhand() {
    // M:18, F:pass -> caller R, responder M.
    let mut b = BiddingState::new();
    b.call(MIDDLEHAND, 18).unwrap();
    b.respond(FOREHAND, false).unwrap();
    assert_eq!(b.caller(), Some(REARHAND));
    assert_eq!(b.responder(), Some(MIDDLEHAND));
}

#[test]
fn call_out_of_turn_rejected() {
    let mut b = BiddingState::new();
    assert_eq!(b.call(FOREHAND, 18), Err(DomainError::NotYourTurn));
    assert_eq!(b.call(REARHAND, 18), Err(DomainError::NotYourTurn));
    b.call(MIDDLEHAND, 18).unwrap();
    // A response is pending; nobody may call.
    assert_eq!(b.call(MIDDLEHAND, 20), Err(DomainError::NotYourTurn));
    assert_eq!(b.call(REARHAND, 20), Err(DomainError::NotYourTurn));
}

#[test]
fn respond_out_of_turn_rejected() {
    let mut b = BiddingState::new();
    // Nothing to respond to yet.
    assert_eq!(b.respond(FOREHAND, true), Err(DomainError::NotYourTurn));
    b.call(MIDDLEHAND, 18).unwrap();
    assert_eq!(b.respond(MIDDLEHAND, true), Err(DomainError::NotYourTurn));
    assert_eq!(b.respond(REARHAND, true), Err(DomainError::NotYourTurn));
}

#[test]
fn call_must_exceed_own_last_bid() {
    let mut b = BiddingState::new();
    b.call(MIDDLEHAND, 20).unwrap();
    b.respond(FOREHAND, true).unwrap();
    assert_eq!(b.call(MIDDLEHAND, 20), Err(DomainError::BidTooLow));
    assert_eq!(b.call(MIDDLEHAND, 18), Err(DomainError::BidTooLow));
    b.call(MIDDLEHAND, 22).unwrap();
}

#[test]
fn holding_adopts_the_called_value() {
    let mut b = BiddingState::new();
    b.call(MIDDLEHAND, 18).unwrap();
    b.respond(FOREHAND, true).unwrap();
    assert_eq!(b.last_call(), 18);
    // Middlehand gives up; forehand keeps the held 18.
    b.call(MIDDLEHAND, BID_PASS).unwrap();
    b.call(REARHAND, BID_PASS).unwrap();
    assert_eq!(b.declarer(), Some(FOREHAND));
    assert_eq!(b.called_game_value(), 18);
}

#[test]
fn rejected_calls_leave_state_unchanged() {
    let mut b = BiddingState::new();
    b.call(MIDDLEHAND, 18).unwrap();
    let before = b.clone();
    assert!(b.call(REARHAND, 20).is_err());
    assert!(b.respond(REARHAND, true).is_err());
    assert_eq!(b, before);
}
