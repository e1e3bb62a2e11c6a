use crate::domain::cards_logic::{effective_suit, relative_power};
use crate::domain::cards_types::{
    new_deck, Card, CardSet, EffectiveSuit, GameType, Rank, Suit, Trick,
};
use crate::errors::domain::DomainError;

fn card(token: &str) -> Card {
    token.parse().expect("hardcoded valid card token")
}

#[test]
fn deck_has_32_distinct_cards_worth_120() {
    let deck = new_deck();
    assert_eq!(deck.len(), 32);
    assert_eq!(deck.value(), 120);
    for c in &deck {
        assert_eq!(deck.iter().filter(|&&other| other == *c).count(), 1);
    }
    // Fresh-pack order: spades first, strongest rank first.
    assert_eq!(deck.get(0), Some(card("AS")));
    assert_eq!(deck.get(31), Some(card("7D")));
}

#[test]
fn card_point_values() {
    assert_eq!(card("7H").value(), 0);
    assert_eq!(card("8S").value(), 0);
    assert_eq!(card("9C").value(), 0);
    assert_eq!(card("JD").value(), 2);
    assert_eq!(card("QH").value(), 3);
    assert_eq!(card("KS").value(), 4);
    assert_eq!(card("TC").value(), 10);
    assert_eq!(card("AD").value(), 11);
}

#[test]
fn effective_suit_grand() {
    assert_eq!(effective_suit(card("JH"), GameType::Grand), EffectiveSuit::Trumps);
    assert_eq!(effective_suit(card("AH"), GameType::Grand), EffectiveSuit::Hearts);
    assert_eq!(effective_suit(card("TC"), GameType::Grand), EffectiveSuit::Clubs);
}

#[test]
fn effective_suit_suit_game() {
    assert_eq!(effective_suit(card("AH"), GameType::Hearts), EffectiveSuit::Trumps);
    assert_eq!(effective_suit(card("JS"), GameType::Hearts), EffectiveSuit::Trumps);
    assert_eq!(effective_suit(card("AS"), GameType::Hearts), EffectiveSuit::Spades);
    assert_eq!(effective_suit(card("7D"), GameType::Clubs), EffectiveSuit::Diamonds);
}

#[test]
fn effective_suit_null_has_no_trumps() {
    for suit in [Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs] {
        let jack = Card::new(Rank::Jack, suit);
        assert_eq!(effective_suit(jack, GameType::Null), EffectiveSuit::from(suit));
    }
}

#[test]
fn relative_power_suit_game_jacks_above_everything() {
    let game = GameType::Spades;
    assert_eq!(relative_power(card("JD"), game), 100);
    assert_eq!(relative_power(card("JH"), game), 101);
    assert_eq!(relative_power(card("JS"), game), 102);
    assert_eq!(relative_power(card("JC"), game), 103);
    // Non-jack trumps and plain cards stay below the offset.
    assert!(relative_power(card("AS"), game) < 100);
    assert!(relative_power(card("TS"), game) > relative_power(card("KS"), game));
}

#[test]
fn relative_power_null_inverts_the_ten() {
    let game = GameType::Null;
    let power = |t: &str| relative_power(card(t), game);
    assert!(power("9H") < power("TH"));
    assert!(power("TH") < power("JH"));
    assert!(power("JH") < power("QH"));
    assert!(power("QH") < power("KH"));
    assert!(power("KH") < power("AH"));
}

#[test]
fn trick_taker_trump_beats_led_suit() {
    let trick = Trick([card("AS"), card("7H"), card("8S")]);
    assert_eq!(trick.taker(GameType::Hearts), 1);
}

#[test]
fn trick_taker_highest_of_led_suit() {
    let trick = Trick([card("7S"), card("AS"), card("KS")]);
    assert_eq!(trick.taker(GameType::Hearts), 1);
}

#[test]
fn trick_taker_jack_beats_trump_ace() {
    let trick = Trick([card("AD"), card("JD"), card("9D")]);
    assert_eq!(trick.taker(GameType::Diamonds), 1);
}

#[test]
fn trick_taker_null_order() {
    let trick = Trick([card("TH"), card("JH"), card("9H")]);
    assert_eq!(trick.taker(GameType::Null), 1);
    let trick = Trick([card("TH"), card("JH"), card("AH")]);
    assert_eq!(trick.taker(GameType::Null), 2);
}

#[test]
fn trick_taker_offsuit_discards_never_take() {
    let trick = Trick([card("7S"), card("AH"), card("AC")]);
    assert_eq!(trick.taker(GameType::Null), 0);
}

#[test]
fn trick_taker_in_range_for_all_game_types() {
    let trick = Trick([card("7D"), card("JC"), card("TH")]);
    for game in [
        GameType::Diamonds,
        GameType::Hearts,
        GameType::Spades,
        GameType::Clubs,
        GameType::Grand,
        GameType::Null,
    ] {
        assert!(trick.taker(game) < 3);
    }
}

#[test]
fn card_set_push_pop() {
    let mut set = CardSet::new();
    set.push(card("AD")).unwrap();
    set.push(card("TD")).unwrap();
    assert_eq!(set.push(card("AD")), Err(DomainError::CardAlreadyPresent));
    assert_eq!(set.len(), 2);
    assert_eq!(set.value(), 21);

    set.pop(card("AD")).unwrap();
    assert_eq!(set.pop(card("AD")), Err(DomainError::CardNotPresent));
    assert!(set.contains(card("TD")));
    assert_eq!(set.value(), 10);
}

#[test]
fn card_set_pop_preserves_order() {
    let mut set: CardSet = ["7D", "8D", "9D", "TD"].iter().map(|t| card(t)).collect();
    set.pop(card("8D")).unwrap();
    let rest: Vec<Card> = set.iter().copied().collect();
    assert_eq!(rest, vec![card("7D"), card("9D"), card("TD")]);
}

#[test]
fn card_tokens_roundtrip() {
    for token in ["7D", "8H", "9S", "QC", "KD", "TH", "AS", "JC"] {
        let c = card(token);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, format!("\"{token}\""));
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}

#[test]
fn invalid_card_tokens_rejected() {
    for token in ["", "A", "AX", "1H", "10H", "ad", "JCX"] {
        assert!(token.parse::<Card>().is_err(), "token {token:?} must fail");
    }
}

#[test]
fn game_type_serde_names() {
    assert_eq!(serde_json::to_string(&GameType::Grand).unwrap(), "\"GRAND\"");
    assert_eq!(serde_json::to_string(&GameType::Null).unwrap(), "\"NULL\"");
    assert_eq!(
        serde_json::from_str::<GameType>("\"DIAMONDS\"").unwrap(),
        GameType::Diamonds
    );
    assert!(serde_json::from_str::<GameType>("\"BELLS\"").is_err());
}

#[test]
fn card_set_rejects_duplicates_when_decoding() {
    let set: Result<CardSet, _> = serde_json::from_str("[\"AD\",\"AD\"]");
    assert!(set.is_err());
}
