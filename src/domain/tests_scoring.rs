use crate::domain::cards_types::{new_deck, Card, CardSet, GameType};
use crate::domain::modifiers::Modifiers;
use crate::domain::scoring::{
    calculate_game_value, evaluate_game, evaluate_won_cards, matadors_jack_strength, LossReason,
    ScoreDefinition,
};
use crate::domain::state::{FOREHAND, MIDDLEHAND, REARHAND};

fn cards(tokens: &str) -> CardSet {
    tokens
        .split_whitespace()
        .map(|t| t.parse::<Card>().expect("hardcoded valid card token"))
        .collect()
}

fn base_hand() -> CardSet {
    cards("JC JS JH JD AH AS TS KS QS 9S 8S 7D 7H 7S")
}

fn without(hand: &CardSet, tokens: &str) -> CardSet {
    let mut result = hand.clone();
    for token in tokens.split_whitespace() {
        result.pop(token.parse().unwrap()).unwrap();
    }
    result
}

#[test]
fn matadors_suit_game_with_full_strength() {
    assert_eq!(matadors_jack_strength(&base_hand(), GameType::Spades), 11);
}

#[test]
fn matadors_suit_game_without_everything() {
    // No clubs trumps at all: "without" the full ladder.
    let hand = without(&base_hand(), "JC JS JH JD");
    assert_eq!(matadors_jack_strength(&hand, GameType::Clubs), 11);
}

#[test]
fn matadors_suit_game_with_gaps() {
    let hand = without(&base_hand(), "JH");
    assert_eq!(matadors_jack_strength(&hand, GameType::Spades), 2);

    assert_eq!(matadors_jack_strength(&base_hand(), GameType::Hearts), 5);

    let hand = without(&base_hand(), "AS");
    assert_eq!(matadors_jack_strength(&hand, GameType::Spades), 4);
}

#[test]
fn matadors_suit_game_without_gaps() {
    let hand = without(&base_hand(), "JC JS");
    assert_eq!(matadors_jack_strength(&hand, GameType::Spades), 2);

    let hand = without(&base_hand(), "JC JS JH JD");
    assert_eq!(matadors_jack_strength(&hand, GameType::Spades), 4);
}

#[test]
fn matadors_grand() {
    assert_eq!(matadors_jack_strength(&base_hand(), GameType::Grand), 4);

    let hand = without(&base_hand(), "JS");
    assert_eq!(matadors_jack_strength(&hand, GameType::Grand), 1);

    let hand = without(&base_hand(), "JC JH");
    assert_eq!(matadors_jack_strength(&hand, GameType::Grand), 1);

    let hand = without(&base_hand(), "JC JS JH JD");
    assert_eq!(matadors_jack_strength(&hand, GameType::Grand), 4);
}

#[test]
fn matadors_null_is_zero() {
    assert_eq!(matadors_jack_strength(&base_hand(), GameType::Null), 0);
}

#[test]
fn null_base_values_are_additive() {
    let empty = CardSet::new();
    assert_eq!(
        calculate_game_value(&empty, GameType::Null, Modifiers::NONE),
        (23, 1)
    );
    assert_eq!(
        calculate_game_value(&empty, GameType::Null, Modifiers::HAND),
        (35, 1)
    );
    assert_eq!(
        calculate_game_value(&empty, GameType::Null, Modifiers::OUVERT),
        (46, 1)
    );
    assert_eq!(
        calculate_game_value(&empty, GameType::Null, Modifiers::HAND | Modifiers::OUVERT),
        (59, 1)
    );
}

#[test]
fn suit_base_values() {
    let two_jacks = cards("JC JH");
    assert_eq!(
        calculate_game_value(&two_jacks, GameType::Diamonds, Modifiers::NONE),
        (9, 2)
    );
    assert_eq!(
        calculate_game_value(&two_jacks, GameType::Hearts, Modifiers::NONE),
        (10, 2)
    );
    assert_eq!(
        calculate_game_value(&two_jacks, GameType::Spades, Modifiers::NONE),
        (11, 2)
    );
    assert_eq!(
        calculate_game_value(&two_jacks, GameType::Clubs, Modifiers::NONE),
        (12, 2)
    );
    assert_eq!(
        calculate_game_value(&two_jacks, GameType::Grand, Modifiers::NONE),
        (24, 2)
    );
}

#[test]
fn factor_uses_matadors_strength() {
    let (_, factor) = calculate_game_value(&base_hand(), GameType::Spades, Modifiers::NONE);
    assert_eq!(factor, 12);

    let hand = without(&base_hand(), "JH");
    let (_, factor) = calculate_game_value(&hand, GameType::Spades, Modifiers::NONE);
    assert_eq!(factor, 3);
}

#[test]
fn factor_modifier_increments() {
    let two_jacks = cards("JC JH");
    let games = [
        GameType::Diamonds,
        GameType::Hearts,
        GameType::Spades,
        GameType::Clubs,
        GameType::Grand,
    ];
    for game in games {
        let factor = |m: Modifiers| calculate_game_value(&two_jacks, game, m).1;
        assert_eq!(factor(Modifiers::HAND), 3);
        assert_eq!(factor(Modifiers::SCHNEIDER), 3);
        assert_eq!(factor(Modifiers::SCHWARZ.normalized()), 4);
        assert_eq!(factor(Modifiers::HAND | Modifiers::SCHNEIDER_ANNOUNCED), 4);
        assert_eq!(
            factor((Modifiers::HAND | Modifiers::SCHWARZ_ANNOUNCED).normalized()),
            5
        );
        assert_eq!(factor(Modifiers::OUVERT), 3);
        assert_eq!(
            factor(
                (Modifiers::HAND
                    | Modifiers::SCHWARZ
                    | Modifiers::SCHWARZ_ANNOUNCED
                    | Modifiers::OUVERT)
                    .normalized()
            ),
            8
        );
    }
}

/// 30 / 60 / 30 card points plus the twelve zero-value leftovers.
fn on_the_edge_piles() -> [CardSet; 3] {
    let mut p0 = cards("AD AH KD JD JH");
    let mut p1 = cards("TD TH TS TC AS QD QH QS");
    let mut p2 = cards("AC KH KS KC QC JS JC");
    assert_eq!(p0.value(), 30);
    assert_eq!(p1.value(), 60);
    assert_eq!(p2.value(), 30);

    let mut i = 0;
    for card in &new_deck() {
        if p0.contains(*card) || p1.contains(*card) || p2.contains(*card) {
            continue;
        }
        assert_eq!(card.value(), 0);
        match i % 3 {
            0 => p0.push(*card).unwrap(),
            1 => p1.push(*card).unwrap(),
            _ => p2.push(*card).unwrap(),
        }
        i += 1;
    }
    [p0, p1, p2]
}

#[test]
fn won_cards_team_scores() {
    let [p0, p1, p2] = on_the_edge_piles();
    let piles = [&p0, &p1, &p2];

    let (_, declarer, defenders) = evaluate_won_cards(piles, FOREHAND);
    assert_eq!((declarer, defenders), (30, 90));
    let (_, declarer, defenders) = evaluate_won_cards(piles, MIDDLEHAND);
    assert_eq!((declarer, defenders), (60, 60));
    let (_, declarer, defenders) = evaluate_won_cards(piles, REARHAND);
    assert_eq!((declarer, defenders), (30, 90));
}

#[test]
fn won_cards_schneider_detection() {
    let [p0, p1, p2] = on_the_edge_piles();
    let piles = [&p0, &p1, &p2];

    let (modifiers, _, _) = evaluate_won_cards(piles, FOREHAND);
    assert_eq!(modifiers, Modifiers::SCHNEIDER);
    let (modifiers, _, _) = evaluate_won_cards(piles, MIDDLEHAND);
    assert_eq!(modifiers, Modifiers::NONE);
}

#[test]
fn won_cards_schwarz_detection() {
    let everything = new_deck();
    let empty0 = CardSet::new();
    let empty2 = CardSet::new();
    let piles = [&empty0, &everything, &empty2];

    for seat in [FOREHAND, MIDDLEHAND, REARHAND] {
        let (modifiers, _, _) = evaluate_won_cards(piles, seat);
        assert_eq!(modifiers, Modifiers::SCHWARZ.normalized());
    }

    // Three point-less cards on one side block Schwarz but not Schneider.
    let mut rest = new_deck();
    let low_hearts = cards("7H 8H 9H");
    for card in &low_hearts {
        rest.pop(*card).unwrap();
    }
    let empty = CardSet::new();
    let piles = [&low_hearts, &rest, &empty];
    let (modifiers, _, _) = evaluate_won_cards(piles, FOREHAND);
    assert_eq!(modifiers, Modifiers::SCHNEIDER);
    let (modifiers, _, _) = evaluate_won_cards(piles, MIDDLEHAND);
    assert_eq!(modifiers, Modifiers::SCHNEIDER);
    let (modifiers, _, _) = evaluate_won_cards(piles, REARHAND);
    assert_eq!(modifiers, Modifiers::SCHWARZ.normalized());
}

#[test]
fn evaluate_game_won_by_declarer() {
    let (won, value, reason) =
        evaluate_game(9, 2, 120, 18, GameType::Hearts, Modifiers::NONE);
    assert!(won);
    assert_eq!(value, 18);
    assert_eq!(reason, None);
}

#[test]
fn evaluate_game_not_enough_points() {
    let (won, value, reason) = evaluate_game(9, 2, 60, 18, GameType::Hearts, Modifiers::NONE);
    assert!(!won);
    assert_eq!(value, 18);
    assert_eq!(reason, Some(LossReason::NotEnoughPoints));
}

#[test]
fn overbid_rounds_the_value_up() {
    let (won, value, reason) = evaluate_game(9, 2, 70, 20, GameType::Hearts, Modifiers::NONE);
    assert!(!won);
    assert_eq!(value, 27);
    assert_eq!(reason, Some(LossReason::Overbid));

    let (won, value, reason) = evaluate_game(9, 2, 70, 18, GameType::Hearts, Modifiers::NONE);
    assert!(won);
    assert_eq!(value, 18);
    assert_eq!(reason, None);
}

#[test]
fn overbid_takes_precedence_over_point_loss() {
    let (won, _, reason) = evaluate_game(9, 2, 30, 20, GameType::Hearts, Modifiers::NONE);
    assert!(!won);
    assert_eq!(reason, Some(LossReason::Overbid));
}

#[test]
fn null_wins_only_without_any_taken_points() {
    let schwarz = Modifiers::SCHWARZ.normalized();
    let (won, _, reason) = evaluate_game(23, 1, 0, 18, GameType::Null, schwarz);
    assert!(won);
    assert_eq!(reason, None);

    let (won, _, reason) = evaluate_game(23, 1, 0, 18, GameType::Null, Modifiers::NONE);
    assert!(!won);
    assert_eq!(reason, Some(LossReason::NotNull));

    let (won, _, reason) = evaluate_game(23, 1, 5, 18, GameType::Null, schwarz);
    assert!(!won);
    assert_eq!(reason, Some(LossReason::NotNull));
}

#[test]
fn announced_results_must_be_delivered() {
    let schneider_announced =
        Modifiers::HAND | Modifiers::SCHNEIDER_ANNOUNCED | Modifiers::SCHNEIDER;
    let (won, _, reason) = evaluate_game(
        12,
        5,
        90,
        18,
        GameType::Clubs,
        Modifiers::HAND | Modifiers::SCHNEIDER_ANNOUNCED,
    );
    assert!(!won);
    assert_eq!(reason, Some(LossReason::NoSchneider));

    let (won, _, reason) = evaluate_game(12, 5, 90, 18, GameType::Clubs, schneider_announced);
    assert!(won);

    let schwarz_announced = (Modifiers::HAND | Modifiers::SCHWARZ_ANNOUNCED).normalized()
        | Modifiers::SCHNEIDER;
    let (won, _, reason) = evaluate_game(12, 7, 95, 18, GameType::Clubs, schwarz_announced);
    assert!(!won);
    assert_eq!(reason, Some(LossReason::NoSchwarz));
}

#[test]
fn standard_scoring_distribution() {
    let scoring = ScoreDefinition::standard();
    assert_eq!(scoring.calculate_score(18, FOREHAND, true), [18, 0, 0]);
    assert_eq!(scoring.calculate_score(18, FOREHAND, false), [-36, 0, 0]);
    assert_eq!(scoring.calculate_score(27, MIDDLEHAND, false), [0, -54, 0]);
}

#[test]
fn league_scoring_distribution() {
    let scoring = ScoreDefinition::league();
    assert_eq!(scoring.calculate_score(18, REARHAND, true), [0, 0, 68]);
    assert_eq!(scoring.calculate_score(27, MIDDLEHAND, false), [40, -54, 40]);
}

#[test]
fn loss_reason_wire_tokens() {
    assert_eq!(
        serde_json::to_string(&LossReason::NotEnoughPoints).unwrap(),
        "\"not_enough_points\""
    );
    assert_eq!(
        serde_json::to_string(&LossReason::Overbid).unwrap(),
        "\"overbid\""
    );
    assert_eq!(
        serde_json::to_string(&LossReason::NotNull).unwrap(),
        "\"not_null\""
    );
    assert_eq!(
        serde_json::to_string(&LossReason::Abandoned).unwrap(),
        "\"abandoned\""
    );
}
