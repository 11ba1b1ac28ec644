//! Conversions between game entities and wire-safe values.
//!
//! Everything that crosses the network is built from primitive scalars,
//! arrays, and string-keyed maps; no engine types on the wire. The
//! `validate_*` functions are structural checks only: they never panic
//! and never apply anything to state; the caller decides what to do with
//! a malformed payload.

use serde_json::{json, Value};

use crate::engine::grid::CubeCoord;
use crate::engine::models::cards::{Card, Rank, Suit};
use crate::engine::models::player::{Advisor, Role};
use crate::engine::models::records::{Nomination, Placement, ScoreDelta, Scores, TurnRecord};
use crate::engine::state::ControlChoice;

// ---- coordinates ----

pub fn coord_to_wire(coord: CubeCoord) -> Value {
    json!([coord.q, coord.r, coord.s])
}

pub fn coord_from_wire(value: &Value) -> Option<CubeCoord> {
    let parts = value.as_array()?;
    if parts.len() != 3 {
        return None;
    }
    let q = i32::try_from(parts[0].as_i64()?).ok()?;
    let r = i32::try_from(parts[1].as_i64()?).ok()?;
    let s = i32::try_from(parts[2].as_i64()?).ok()?;
    let coord = CubeCoord::new(q, r, s);
    coord.is_valid().then_some(coord)
}

pub fn validate_coord(value: &Value) -> bool {
    coord_from_wire(value).is_some()
}

// ---- cards ----

/// The numeric value is derivable from the rank; it rides along for
/// client convenience but is never trusted on the way back in.
pub fn card_to_wire(card: Card) -> Value {
    json!({
        "suit": card.suit.index(),
        "rank": card.rank.label(),
        "value": card.value(),
    })
}

pub fn card_from_wire(value: &Value) -> Option<Card> {
    let obj = value.as_object()?;
    let suit = Suit::from_index(u8::try_from(obj.get("suit")?.as_u64()?).ok()?)?;
    let rank = Rank::from_label(obj.get("rank")?.as_str()?)?;
    Some(Card::new(suit, rank))
}

pub fn validate_card(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    if let Some(declared) = obj.get("value") {
        if !declared.as_u64().is_some_and(|v| (2..=14).contains(&v)) {
            return false;
        }
    }
    card_from_wire(value).is_some()
}

// ---- roles ----

pub fn role_to_wire(role: Role) -> Value {
    Value::String(role.key().to_string())
}

pub fn role_from_wire(value: &Value) -> Option<Role> {
    Role::from_key(value.as_str()?)
}

pub fn validate_role(value: &Value) -> bool {
    role_from_wire(value).is_some()
}

// ---- nominations ----

pub fn nomination_to_wire(nomination: &Nomination) -> Value {
    json!({
        "hex": coord_to_wire(nomination.hex),
        "claim": card_to_wire(nomination.claim),
        "advisor": nomination.advisor.key(),
    })
}

pub fn nomination_from_wire(value: &Value) -> Option<Nomination> {
    let obj = value.as_object()?;
    Some(Nomination {
        hex: coord_from_wire(obj.get("hex")?)?,
        claim: card_from_wire(obj.get("claim")?)?,
        advisor: Advisor::from_key(obj.get("advisor")?.as_str()?)?,
    })
}

pub fn validate_nomination(value: &Value) -> bool {
    nomination_from_wire(value).is_some()
}

/// Nominations travel as an ordered sequence, never a map: both of an
/// advisor's commits are separate entries and order is meaningful.
pub fn nominations_to_wire(nominations: &[Nomination]) -> Value {
    Value::Array(nominations.iter().map(nomination_to_wire).collect())
}

pub fn nominations_from_wire(value: &Value) -> Option<Vec<Nomination>> {
    value
        .as_array()?
        .iter()
        .map(nomination_from_wire)
        .collect()
}

// ---- placements ----

pub fn placement_to_wire(placement: &Placement) -> Value {
    json!({
        "turn": placement.turn,
        "card": card_to_wire(placement.card),
        "hex": coord_to_wire(placement.hex),
        "winning_role": placement.winning_role.map(role_to_wire).unwrap_or(Value::Null),
        "winning_claim": placement.winning_claim.map(card_to_wire).unwrap_or(Value::Null),
    })
}

pub fn placement_from_wire(value: &Value) -> Option<Placement> {
    let obj = value.as_object()?;
    let winning_role = match obj.get("winning_role")? {
        Value::Null => None,
        role => Some(role_from_wire(role)?),
    };
    let winning_claim = match obj.get("winning_claim")? {
        Value::Null => None,
        card => Some(card_from_wire(card)?),
    };
    Some(Placement {
        turn: u32::try_from(obj.get("turn")?.as_u64()?).ok()?,
        card: card_from_wire(obj.get("card")?)?,
        hex: coord_from_wire(obj.get("hex")?)?,
        winning_role,
        winning_claim,
    })
}

pub fn validate_placement(value: &Value) -> bool {
    placement_from_wire(value).is_some()
}

// ---- built hexes ----

pub fn built_to_wire(built: &[CubeCoord]) -> Value {
    Value::Array(built.iter().map(|hex| coord_to_wire(*hex)).collect())
}

pub fn built_from_wire(value: &Value) -> Option<Vec<CubeCoord>> {
    value.as_array()?.iter().map(coord_from_wire).collect()
}

// ---- scores ----

pub fn scores_to_wire(scores: &Scores) -> Value {
    json!({
        "mayor": scores.mayor,
        "industry": scores.industry,
        "urbanist": scores.urbanist,
    })
}

pub fn scores_from_wire(value: &Value) -> Option<Scores> {
    let obj = value.as_object()?;
    Some(Scores {
        mayor: i32::try_from(obj.get("mayor")?.as_i64()?).ok()?,
        industry: i32::try_from(obj.get("industry")?.as_i64()?).ok()?,
        urbanist: i32::try_from(obj.get("urbanist")?.as_i64()?).ok()?,
    })
}

pub fn score_delta_to_wire(delta: &ScoreDelta) -> Value {
    json!({
        "mayor": delta.mayor,
        "industry": delta.industry,
        "urbanist": delta.urbanist,
    })
}

pub fn score_delta_from_wire(value: &Value) -> Option<ScoreDelta> {
    let obj = value.as_object()?;
    Some(ScoreDelta {
        mayor: i32::try_from(obj.get("mayor")?.as_i64()?).ok()?,
        industry: i32::try_from(obj.get("industry")?.as_i64()?).ok()?,
        urbanist: i32::try_from(obj.get("urbanist")?.as_i64()?).ok()?,
    })
}

// ---- hand views ----

/// Serialize the hand as seen by `role`. The Mayor sees every card; an
/// advisor sees only the revealed indices, with the rest redacted to
/// null. Redaction happens here, before anything is sent, never on the
/// client.
pub fn hand_to_wire(role: Role, hand: &[Card], revealed: &[usize]) -> Value {
    let cards: Vec<Value> = hand
        .iter()
        .enumerate()
        .map(|(i, card)| {
            if role == Role::Mayor || revealed.contains(&i) {
                card_to_wire(*card)
            } else {
                Value::Null
            }
        })
        .collect();
    json!({ "cards": cards, "revealed": revealed })
}

fn index_list_from_wire(value: &Value) -> Option<Vec<usize>> {
    value
        .as_array()?
        .iter()
        .map(|idx| usize::try_from(idx.as_u64()?).ok())
        .collect()
}

/// The receiving side of a hand view: cards (possibly redacted) plus the
/// revealed indices.
pub fn hand_from_wire(value: &Value) -> Option<(Vec<Option<Card>>, Vec<usize>)> {
    let obj = value.as_object()?;
    let cards = obj
        .get("cards")?
        .as_array()?
        .iter()
        .map(|card| {
            if card.is_null() {
                Some(None)
            } else {
                card_from_wire(card).map(Some)
            }
        })
        .collect::<Option<Vec<Option<Card>>>>()?;
    let revealed = index_list_from_wire(obj.get("revealed")?)?;
    Some((cards, revealed))
}

// ---- control choices ----

pub fn control_to_wire(choice: &ControlChoice) -> Value {
    match choice {
        ControlChoice::None => json!({ "mode": "none" }),
        ControlChoice::ForceSuits { industry, urbanist } => json!({
            "mode": "force_suits",
            "industry": industry.index(),
            "urbanist": urbanist.index(),
        }),
        ControlChoice::ForceHexes { industry, urbanist } => json!({
            "mode": "force_hexes",
            "industry": coord_to_wire(*industry),
            "urbanist": coord_to_wire(*urbanist),
        }),
    }
}

pub fn control_from_wire(value: &Value) -> Option<ControlChoice> {
    let obj = value.as_object()?;
    match obj.get("mode")?.as_str()? {
        "none" => Some(ControlChoice::None),
        "force_suits" => Some(ControlChoice::ForceSuits {
            industry: Suit::from_index(u8::try_from(obj.get("industry")?.as_u64()?).ok()?)?,
            urbanist: Suit::from_index(u8::try_from(obj.get("urbanist")?.as_u64()?).ok()?)?,
        }),
        "force_hexes" => Some(ControlChoice::ForceHexes {
            industry: coord_from_wire(obj.get("industry")?)?,
            urbanist: coord_from_wire(obj.get("urbanist")?)?,
        }),
        _ => None,
    }
}

// ---- turn history ----

pub fn turn_record_to_wire(record: &TurnRecord) -> Value {
    json!({
        "turn": record.turn,
        "revealed": record.revealed,
        "nominations": nominations_to_wire(&record.nominations),
        "placement": placement_to_wire(&record.placement),
        "reality": card_to_wire(record.reality),
        "scores_delta": score_delta_to_wire(&record.score_delta),
    })
}

pub fn turn_record_from_wire(value: &Value) -> Option<TurnRecord> {
    let obj = value.as_object()?;
    Some(TurnRecord {
        turn: u32::try_from(obj.get("turn")?.as_u64()?).ok()?,
        revealed: index_list_from_wire(obj.get("revealed")?)?,
        nominations: nominations_from_wire(obj.get("nominations")?)?,
        placement: placement_from_wire(obj.get("placement")?)?,
        reality: card_from_wire(obj.get("reality")?)?,
        score_delta: score_delta_from_wire(obj.get("scores_delta")?)?,
    })
}

pub fn history_to_wire(history: &[TurnRecord]) -> Value {
    Value::Array(history.iter().map(turn_record_to_wire).collect())
}

pub fn history_from_wire(value: &Value) -> Option<Vec<TurnRecord>> {
    value.as_array()?.iter().map(turn_record_from_wire).collect()
}

// ---- frontier reality (advisors only) ----

pub fn reality_tiles_to_wire(tiles: &[(CubeCoord, Card)]) -> Value {
    Value::Array(
        tiles
            .iter()
            .map(|(hex, card)| {
                json!({
                    "hex": coord_to_wire(*hex),
                    "card": card_to_wire(*card),
                })
            })
            .collect(),
    )
}

pub fn reality_tiles_from_wire(value: &Value) -> Option<Vec<(CubeCoord, Card)>> {
    value
        .as_array()?
        .iter()
        .map(|entry| {
            let obj = entry.as_object()?;
            Some((
                coord_from_wire(obj.get("hex")?)?,
                card_from_wire(obj.get("card")?)?,
            ))
        })
        .collect()
}

// ---- intent payloads ----

pub fn reveal_to_wire(card_index: usize) -> Value {
    json!({ "card_index": card_index })
}

pub fn reveal_from_wire(value: &Value) -> Option<usize> {
    usize::try_from(value.as_object()?.get("card_index")?.as_u64()?).ok()
}

/// A commit intent travels in the same shape as a nomination record.
pub fn commit_to_wire(advisor: Advisor, hex: CubeCoord, claim: Card) -> Value {
    nomination_to_wire(&Nomination { hex, claim, advisor })
}

pub fn commit_from_wire(value: &Value) -> Option<(Advisor, CubeCoord, Card)> {
    let nomination = nomination_from_wire(value)?;
    Some((nomination.advisor, nomination.hex, nomination.claim))
}

pub fn place_to_wire(card_index: usize, hex: CubeCoord) -> Value {
    json!({ "card_index": card_index, "hex": coord_to_wire(hex) })
}

pub fn place_from_wire(value: &Value) -> Option<(usize, CubeCoord)> {
    let obj = value.as_object()?;
    let card_index = usize::try_from(obj.get("card_index")?.as_u64()?).ok()?;
    let hex = coord_from_wire(obj.get("hex")?)?;
    Some((card_index, hex))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn coord_round_trip_and_validation() {
        let coord = CubeCoord::new(2, -3, 1);
        assert_eq!(coord_from_wire(&coord_to_wire(coord)), Some(coord));
        assert!(validate_coord(&json!([0, 0, 0])));
        assert!(!validate_coord(&json!([1, 1, 1])));
        assert!(!validate_coord(&json!([1, -1])));
        assert!(!validate_coord(&json!("origin")));
    }

    #[test]
    fn card_round_trip_reproduces_the_value() {
        for original in Card::universe() {
            let wire = card_to_wire(original);
            let back = card_from_wire(&wire).expect("round trip");
            assert_eq!(back, original);
            assert_eq!(back.value(), original.value());
        }
    }

    #[test]
    fn card_validation_rejects_malformed_shapes() {
        assert!(validate_card(&card_to_wire(card(Suit::Spades, Rank::Queen))));
        assert!(!validate_card(&json!({"suit": 3, "rank": "Q"})));
        assert!(!validate_card(&json!({"suit": 0, "rank": "1"})));
        assert!(!validate_card(&json!({"suit": 0})));
        assert!(!validate_card(&json!({"suit": 0, "rank": "Q", "value": 99})));
        assert!(!validate_card(&json!(42)));
    }

    #[test]
    fn nomination_round_trip() {
        let nomination = Nomination {
            hex: CubeCoord::new(1, -1, 0),
            claim: card(Suit::Diamonds, Rank::Ten),
            advisor: Advisor::Urbanist,
        };
        let wire = nomination_to_wire(&nomination);
        assert!(validate_nomination(&wire));
        assert_eq!(nomination_from_wire(&wire), Some(nomination));

        // order and duplicates survive a list round trip
        let list = vec![nomination, nomination];
        let back = nominations_from_wire(&nominations_to_wire(&list)).expect("list");
        assert_eq!(back, list);
    }

    #[test]
    fn placement_round_trip_with_and_without_winner() {
        let with_winner = Placement {
            turn: 3,
            card: card(Suit::Hearts, Rank::Ace),
            hex: CubeCoord::new(0, 1, -1),
            winning_role: Some(Role::Industry),
            winning_claim: Some(card(Suit::Diamonds, Rank::Two)),
        };
        let wire = placement_to_wire(&with_winner);
        assert!(validate_placement(&wire));
        assert_eq!(placement_from_wire(&wire), Some(with_winner));

        let no_winner = Placement {
            turn: 0,
            card: card(Suit::Spades, Rank::King),
            hex: CubeCoord::new(1, 0, -1),
            winning_role: None,
            winning_claim: None,
        };
        let wire = placement_to_wire(&no_winner);
        assert_eq!(placement_from_wire(&wire), Some(no_winner));
        assert!(!validate_placement(&json!({"turn": 1})));
    }

    #[test]
    fn built_hexes_round_trip() {
        let built = vec![
            CubeCoord::ORIGIN,
            CubeCoord::new(1, -1, 0),
            CubeCoord::new(1, 0, -1),
        ];
        assert_eq!(built_from_wire(&built_to_wire(&built)), Some(built));
    }

    #[test]
    fn turn_record_round_trip() {
        let record = TurnRecord {
            turn: 5,
            revealed: vec![0, 2],
            nominations: vec![Nomination {
                hex: CubeCoord::new(1, -1, 0),
                claim: card(Suit::Hearts, Rank::Seven),
                advisor: Advisor::Industry,
            }],
            placement: Placement {
                turn: 5,
                card: card(Suit::Hearts, Rank::Nine),
                hex: CubeCoord::new(1, -1, 0),
                winning_role: Some(Role::Industry),
                winning_claim: Some(card(Suit::Hearts, Rank::Seven)),
            },
            reality: card(Suit::Diamonds, Rank::Three),
            score_delta: ScoreDelta {
                mayor: 1,
                industry: 1,
                urbanist: 0,
            },
        };
        let wire = turn_record_to_wire(&record);
        assert_eq!(turn_record_from_wire(&wire), Some(record.clone()));
        let history = vec![record];
        assert_eq!(history_from_wire(&history_to_wire(&history)), Some(history));
    }

    #[test]
    fn mayor_sees_the_full_hand() {
        let hand = vec![
            card(Suit::Hearts, Rank::Two),
            card(Suit::Spades, Rank::Queen),
            card(Suit::Diamonds, Rank::Jack),
            card(Suit::Hearts, Rank::Ace),
        ];
        let revealed = vec![1, 3];
        let wire = hand_to_wire(Role::Mayor, &hand, &revealed);
        let (cards, rev) = hand_from_wire(&wire).expect("mayor view");
        assert_eq!(rev, revealed);
        assert!(cards.iter().all(Option::is_some));
    }

    #[test]
    fn advisors_see_only_revealed_cards() {
        let hand = vec![
            card(Suit::Hearts, Rank::Two),
            card(Suit::Spades, Rank::Queen),
            card(Suit::Diamonds, Rank::Jack),
            card(Suit::Hearts, Rank::Ace),
        ];
        let revealed = vec![1, 3];
        let wire = hand_to_wire(Role::Industry, &hand, &revealed);
        let (cards, rev) = hand_from_wire(&wire).expect("advisor view");
        assert_eq!(rev, revealed);
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0], None);
        assert_eq!(cards[1], Some(hand[1]));
        assert_eq!(cards[2], None);
        assert_eq!(cards[3], Some(hand[3]));
    }

    #[test]
    fn control_choice_round_trip() {
        for choice in [
            ControlChoice::None,
            ControlChoice::ForceSuits {
                industry: Suit::Diamonds,
                urbanist: Suit::Hearts,
            },
            ControlChoice::ForceHexes {
                industry: CubeCoord::new(1, -1, 0),
                urbanist: CubeCoord::new(0, 1, -1),
            },
        ] {
            assert_eq!(control_from_wire(&control_to_wire(&choice)), Some(choice));
        }
        assert_eq!(control_from_wire(&json!({"mode": "other"})), None);
    }

    #[test]
    fn intent_payloads_round_trip() {
        assert_eq!(reveal_from_wire(&reveal_to_wire(2)), Some(2));
        let (advisor, hex, claim) = (
            Advisor::Industry,
            CubeCoord::new(1, -1, 0),
            card(Suit::Spades, Rank::Five),
        );
        assert_eq!(
            commit_from_wire(&commit_to_wire(advisor, hex, claim)),
            Some((advisor, hex, claim))
        );
        assert_eq!(
            place_from_wire(&place_to_wire(1, hex)),
            Some((1, hex))
        );
        assert_eq!(place_from_wire(&json!({"card_index": 1})), None);
    }

    #[test]
    fn role_validation() {
        assert!(validate_role(&json!("mayor")));
        assert!(validate_role(&json!("industry")));
        assert!(!validate_role(&json!("banker")));
        assert!(!validate_role(&json!(1)));
    }
}
