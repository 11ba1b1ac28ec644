//! Phase transitions for the game state machine.
//!
//! Each function validates one player intent against the current phase
//! and either applies it or leaves the state untouched. Rejections are
//! silent: a stale or duplicate message from a lagging peer must not
//! disturb the authoritative state, and the discrepancy resolves itself
//! on the next snapshot.

use tracing::{debug, info};

use crate::engine::grid::CubeCoord;
use crate::engine::models::cards::{Card, Suit};
use crate::engine::models::player::Advisor;
use crate::engine::models::records::{Nomination, Placement, TurnRecord};
use crate::engine::scoring;
use crate::engine::state::{ControlChoice, GameState, Phase, RejectReason, SubPhase};

/// DRAW entry: the outgoing hand goes to the discard pile *before* the
/// fresh hand is drawn. Cards move between pools, they are never lost.
pub(crate) fn enter_draw(state: &mut GameState) {
    let outgoing: Vec<Card> = state.hand.drain(..).collect();
    state.pile.discard_all(outgoing);
    let hand_size = state.config.hand_size;
    state.hand = state.pile.draw(hand_size, &mut state.rng);

    state.revealed.clear();
    state.commits.clear();
    state.nominations.clear();
    state.control = ControlChoice::None;
    state.sub_phase = SubPhase::IndustryCommit1;
    state.phase = Phase::Draw;
    state.assert_conservation();
    debug!(turn = state.turn, "hand dealt");
}

/// The Mayor turns one hand card face up for the advisors. Once the
/// required number are showing the turn moves on.
pub(crate) fn apply_reveal(state: &mut GameState, card_index: usize) -> bool {
    if state.phase != Phase::Draw {
        return state.reject(RejectReason::WrongPhase);
    }
    if card_index >= state.hand.len() {
        return state.reject(RejectReason::Malformed);
    }
    if state.revealed.contains(&card_index) {
        return state.reject(RejectReason::Duplicate);
    }

    state.revealed.push(card_index);
    if state.revealed.len() == state.config.reveals_per_turn {
        state.phase = if state.config.control_enabled {
            Phase::Control
        } else {
            Phase::Nominate
        };
    }
    true
}

/// CONTROL (rule variant): the Mayor may constrain each advisor's first
/// nomination by suit or by hex before any commits are made.
pub(crate) fn apply_control(state: &mut GameState, choice: ControlChoice) -> bool {
    if state.phase != Phase::Control {
        return state.reject(RejectReason::WrongPhase);
    }
    if let ControlChoice::ForceHexes { industry, urbanist } = choice {
        let frontier = state.frontier();
        if !industry.is_valid()
            || !urbanist.is_valid()
            || !frontier.contains(&industry)
            || !frontier.contains(&urbanist)
        {
            return state.reject(RejectReason::InvalidHex);
        }
    }
    state.control = choice;
    state.phase = Phase::Nominate;
    state.sub_phase = SubPhase::IndustryCommit1;
    true
}

/// One advisor commitment. Commits stay hidden until the fourth lands,
/// at which point all nominations become visible at once and the Mayor
/// may place.
pub(crate) fn apply_commit(
    state: &mut GameState,
    advisor: Advisor,
    hex: CubeCoord,
    claim: Card,
) -> bool {
    if state.phase != Phase::Nominate {
        return state.reject(RejectReason::WrongPhase);
    }
    let expected = match state.sub_phase.expected_advisor() {
        Some(expected) => expected,
        None => return state.reject(RejectReason::WrongPhase),
    };
    if advisor != expected {
        return state.reject(RejectReason::WrongRole);
    }
    if !hex.is_valid() || state.is_built(hex) || !state.frontier().contains(&hex) {
        return state.reject(RejectReason::InvalidHex);
    }
    if state.commits.get(advisor).iter().any(|n| n.hex == hex) {
        return state.reject(RejectReason::Duplicate);
    }
    if state.sub_phase.is_first_commit() {
        if let Some(forced) = state.control.forced_hex(advisor) {
            if hex != forced {
                return state.reject(RejectReason::Constraint);
            }
        }
        if let Some(forced) = state.control.forced_suit(advisor) {
            if claim.suit != forced {
                return state.reject(RejectReason::Constraint);
            }
        }
    }

    state.commits.push(Nomination { hex, claim, advisor });

    if state.sub_phase == SubPhase::UrbanistCommit2 {
        state.nominations.clear();
        state
            .nominations
            .extend(state.commits.industry.iter().copied());
        state
            .nominations
            .extend(state.commits.urbanist.iter().copied());
        state.sub_phase = SubPhase::PlaceReady;
        state.phase = Phase::Place;
        debug!(turn = state.turn, count = state.nominations.len(), "nominations revealed");
    } else {
        state.sub_phase = state.sub_phase.next();
    }
    true
}

/// The Mayor builds: plays a hand card onto a nominated hex, the fog
/// expands, the placement is scored, and the turn either ends the game
/// (mine or completed city) or rolls into the next DRAW.
pub(crate) fn apply_place(state: &mut GameState, card_index: usize, hex: CubeCoord) -> bool {
    if state.phase != Phase::Place {
        return state.reject(RejectReason::WrongPhase);
    }
    if card_index >= state.hand.len() {
        return state.reject(RejectReason::Malformed);
    }
    if !state.nominations.iter().any(|n| n.hex == hex) || state.is_built(hex) {
        return state.reject(RejectReason::InvalidHex);
    }

    let placed = state.hand.remove(card_index);
    state.pile.discard(placed);
    state.built.push(hex);

    // fog expands around the new build; realities are assigned on first sight
    let reality_card = state.reality.reveal(hex, &mut state.rng);
    for adj in hex.neighbors() {
        state.reality.reveal(adj, &mut state.rng);
    }

    let noms_for_hex: Vec<Nomination> = state
        .nominations
        .iter()
        .filter(|n| n.hex == hex)
        .copied()
        .collect();
    let rival_realities: Vec<Card> = state
        .nominations
        .iter()
        .filter(|n| n.hex != hex)
        .filter_map(|n| state.reality.get(n.hex))
        .collect();

    let delta = scoring::score_placement(&placed, &reality_card, &noms_for_hex, &rival_realities);
    state.scores.apply(&delta);

    let winner = scoring::winning_nomination(placed.suit, &noms_for_hex);
    let placement = Placement {
        turn: state.turn,
        card: placed,
        hex,
        winning_role: winner.map(|n| n.advisor.role()),
        winning_claim: winner.map(|n| n.claim),
    };
    state.history.push(TurnRecord {
        turn: state.turn,
        revealed: state.revealed.clone(),
        nominations: state.nominations.clone(),
        placement: placement.clone(),
        reality: reality_card,
        score_delta: delta,
    });
    state.last_placement = Some(placement);
    state.facilities.record(reality_card.suit);
    state.assert_conservation();

    if reality_card.suit == Suit::Spades {
        state.mayor_hit_mine = true;
        state.phase = Phase::GameOver;
        info!(turn = state.turn, %hex, "mayor built on a mine");
        return true;
    }
    if state.facilities.hearts >= state.config.facilities_goal
        && state.facilities.diamonds >= state.config.facilities_goal
    {
        state.city_complete = true;
        state.phase = Phase::GameOver;
        info!(turn = state.turn, "city complete");
        return true;
    }

    state.turn += 1;
    enter_draw(state);
    true
}
