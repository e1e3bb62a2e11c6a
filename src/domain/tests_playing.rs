use crate::domain::cards_types::{Card, CardSet, GameType};
use crate::domain::playing::PlayingState;
use crate::domain::state::{FOREHAND, MIDDLEHAND, REARHAND};
use crate::errors::domain::DomainError;

fn cards(tokens: &str) -> CardSet {
    tokens
        .split_whitespace()
        .map(|t| t.parse::<Card>().expect("hardcoded valid card token"))
        .collect()
}

fn card(token: &str) -> Card {
    token.parse().expect("hardcoded valid card token")
}

fn three_card_state(game_type: GameType) -> PlayingState {
    PlayingState::new(
        MIDDLEHAND,
        game_type,
        [
            cards("AS 7H 8C"),
            cards("KS 9H 9C"),
            cards("QS TH TC"),
        ],
        cards("AD TD"),
    )
}

#[test]
fn declarer_starts_with_pushed_cards_as_won() {
    let state = three_card_state(GameType::Hearts);
    assert_eq!(state.won_cards(MIDDLEHAND).value(), 21);
    assert!(state.won_cards(FOREHAND).is_empty());
    assert!(state.won_cards(REARHAND).is_empty());
}

#[test]
fn forehand_leads_first_trick() {
    let state = three_card_state(GameType::Hearts);
    assert_eq!(state.current_player(), FOREHAND);
    assert_eq!(state.forehand(), FOREHAND);
}

#[test]
fn play_out_of_turn_rejected() {
    let mut state = three_card_state(GameType::Hearts);
    assert_eq!(
        state.play(MIDDLEHAND, card("KS")),
        Err(DomainError::NotYourTurn)
    );
}

#[test]
fn playing_a_card_not_in_hand_rejected() {
    let mut state = three_card_state(GameType::Hearts);
    assert_eq!(
        state.play(FOREHAND, card("KS")),
        Err(DomainError::CardNotPresent)
    );
}

#[test]
fn must_follow_suit_when_possible() {
    let mut state = three_card_state(GameType::Hearts);
    state.play(FOREHAND, card("AS")).unwrap();
    // Middlehand holds a spade, so a heart (trump) is rejected.
    assert_eq!(
        state.play(MIDDLEHAND, card("9H")),
        Err(DomainError::MustFollowSuit)
    );
    state.play(MIDDLEHAND, card("KS")).unwrap();
}

#[test]
fn trumping_in_allowed_when_void_in_led_suit() {
    let mut state = PlayingState::new(
        MIDDLEHAND,
        GameType::Hearts,
        [cards("AS 7H 8C"), cards("9H 9C KC"), cards("QS TH TC")],
        cards("AD TD"),
    );
    state.play(FOREHAND, card("AS")).unwrap();
    // Middlehand is void in spades; the trump is fine.
    state.play(MIDDLEHAND, card("9H")).unwrap();
    state.play(REARHAND, card("QS")).unwrap();
    // The heart trumped the spade lead.
    let (_, winner) = state.last_trick().unwrap();
    assert_eq!(winner, MIDDLEHAND);
}

#[test]
fn jacks_belong_to_trumps_for_following() {
    // Grand: a jack lead must be answered with a jack where possible.
    let mut state = PlayingState::new(
        FOREHAND,
        GameType::Grand,
        [cards("JC 7D"), cards("JS AD"), cards("JH AH")],
        cards("AS TS"),
    );
    state.play(FOREHAND, card("JC")).unwrap();
    assert_eq!(
        state.play(MIDDLEHAND, card("AD")),
        Err(DomainError::MustFollowSuit)
    );
    state.play(MIDDLEHAND, card("JS")).unwrap();
    state.play(REARHAND, card("JH")).unwrap();
    let (_, winner) = state.last_trick().unwrap();
    assert_eq!(winner, FOREHAND);
}

#[test]
fn trick_winner_leads_next_and_collects_cards() {
    let mut state = three_card_state(GameType::Hearts);
    state.play(FOREHAND, card("AS")).unwrap();
    state.play(MIDDLEHAND, card("KS")).unwrap();
    state.play(REARHAND, card("QS")).unwrap();

    // Ace of spades takes: forehand won, leads next.
    assert_eq!(state.current_player(), FOREHAND);
    assert_eq!(state.forehand(), FOREHAND);
    assert_eq!(state.won_cards(FOREHAND).value(), 11 + 4 + 3);
    assert!(state.table().is_empty());
    let (trick, winner) = state.last_trick().unwrap();
    assert_eq!(winner, FOREHAND);
    assert_eq!(trick.value(), 18);
}

#[test]
fn relative_taker_maps_to_absolute_seat() {
    let mut state = PlayingState::new(
        MIDDLEHAND,
        GameType::Hearts,
        [cards("AS 7H 8C"), cards("KS 9H 9C"), cards("QS AH TH")],
        cards("AD TD"),
    );

    // Trick 1: rearhand is void in clubs and trumps in.
    state.play(FOREHAND, card("8C")).unwrap();
    state.play(MIDDLEHAND, card("9C")).unwrap();
    state.play(REARHAND, card("TH")).unwrap();
    assert_eq!(state.current_player(), REARHAND);
    assert_eq!(state.forehand(), REARHAND);

    // Trick 2 starts at rearhand; the ace of spades sits at relative
    // position 1 and wins for the absolute forehand seat.
    state.play(REARHAND, card("QS")).unwrap();
    assert_eq!(
        state.play(FOREHAND, card("7H")),
        Err(DomainError::MustFollowSuit)
    );
    state.play(FOREHAND, card("AS")).unwrap();
    state.play(MIDDLEHAND, card("KS")).unwrap();
    let (_, winner) = state.last_trick().unwrap();
    assert_eq!(winner, FOREHAND);
    assert_eq!(state.current_player(), FOREHAND);

    // Trick 3: all trumps, the ace takes.
    state.play(FOREHAND, card("7H")).unwrap();
    state.play(MIDDLEHAND, card("9H")).unwrap();
    state.play(REARHAND, card("AH")).unwrap();
    let (_, winner) = state.last_trick().unwrap();
    assert_eq!(winner, REARHAND);
    assert!(state.is_finished());
}

#[test]
fn all_cards_end_up_in_won_piles() {
    let mut state = three_card_state(GameType::Grand);
    let mut total_start = 0;
    for seat in [FOREHAND, MIDDLEHAND, REARHAND] {
        total_start += state.hand(seat).len();
    }
    assert_eq!(total_start, 9);

    while !state.is_finished() {
        let seat = state.current_player();
        let hand: Vec<Card> = state.hand(seat).iter().copied().collect();
        let mut played = false;
        for c in hand {
            match state.play(seat, c) {
                Ok(()) => {
                    played = true;
                    break;
                }
                Err(DomainError::MustFollowSuit) => continue,
                Err(err) => panic!("unexpected error: {err}"),
            }
        }
        assert!(played, "seat {seat} had no legal card");
    }

    let won: usize = [FOREHAND, MIDDLEHAND, REARHAND]
        .iter()
        .map(|&s| state.won_cards(s).len())
        .sum();
    // Nine played cards plus the two pushed ones.
    assert_eq!(won, 11);
}

#[test]
fn rejected_plays_leave_state_unchanged() {
    let mut state = three_card_state(GameType::Hearts);
    state.play(FOREHAND, card("AS")).unwrap();
    let before = state.clone();
    assert!(state.play(MIDDLEHAND, card("9H")).is_err());
    assert!(state.play(REARHAND, card("QS")).is_err());
    assert_eq!(state, before);
}
