//! Game-session message payloads.
//!
//! The snapshot is the whole protocol: after every accepted intent each
//! human peer receives a fresh per-role snapshot and replaces its mirror
//! wholesale. Redaction (hand cards, reality tiles) happens here on the
//! server side, keyed by the recipient's role.

use serde_json::{json, Value};

use crate::engine::grid::CubeCoord;
use crate::engine::models::cards::Card;
use crate::engine::models::player::Role;
use crate::engine::models::records::{Facilities, Nomination, Placement, Scores, TurnRecord};
use crate::engine::state::{ControlChoice, GameState, Phase, SubPhase};
use crate::network::codec;

pub fn role_assign(role: Role) -> Value {
    json!({ "role": role.key() })
}

pub fn parse_role_assign(value: &Value) -> Option<Role> {
    Role::from_key(value.as_object()?.get("role")?.as_str()?)
}

/// Serialize the full game view for one recipient.
///
/// The Mayor gets the whole hand but never any reality; advisors get the
/// redacted hand plus the frontier reality tiles.
pub fn snapshot_for(state: &GameState, role: Role) -> Value {
    let mut snapshot = json!({
        "phase": state.phase().index(),
        "sub_phase": state.sub_phase().key(),
        "turn": state.turn(),
        "scores": codec::scores_to_wire(&state.scores()),
        "built": codec::built_to_wire(state.built()),
        "nominations": codec::nominations_to_wire(state.nominations()),
        "hand": codec::hand_to_wire(role, state.hand(), state.revealed()),
        "control": codec::control_to_wire(&state.control()),
        "last_placement": state
            .last_placement()
            .map(codec::placement_to_wire)
            .unwrap_or(Value::Null),
        "history": codec::history_to_wire(state.history()),
        "facilities": {
            "hearts": state.facilities().hearts,
            "diamonds": state.facilities().diamonds,
        },
        "mayor_hit_mine": state.mayor_hit_mine(),
        "city_complete": state.city_complete(),
    });
    if role != Role::Mayor {
        snapshot["reality"] = codec::reality_tiles_to_wire(&state.frontier_realities());
    }
    snapshot
}

/// A parsed snapshot, as mirrored on a client.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub sub_phase: SubPhase,
    pub turn: u32,
    pub scores: Scores,
    pub built: Vec<CubeCoord>,
    pub nominations: Vec<Nomination>,
    pub hand: Vec<Option<Card>>,
    pub revealed: Vec<usize>,
    pub control: ControlChoice,
    pub last_placement: Option<Placement>,
    pub history: Vec<TurnRecord>,
    pub facilities: Facilities,
    pub mayor_hit_mine: bool,
    pub city_complete: bool,
    /// Frontier reality tiles; always empty in the Mayor's snapshots.
    pub reality: Vec<(CubeCoord, Card)>,
}

pub fn parse_snapshot(value: &Value) -> Option<Snapshot> {
    let obj = value.as_object()?;
    let (hand, revealed) = codec::hand_from_wire(obj.get("hand")?)?;
    let last_placement = match obj.get("last_placement")? {
        Value::Null => None,
        placement => Some(codec::placement_from_wire(placement)?),
    };
    let facilities_obj = obj.get("facilities")?.as_object()?;
    let reality = match obj.get("reality") {
        Some(tiles) => codec::reality_tiles_from_wire(tiles)?,
        None => Vec::new(),
    };
    Some(Snapshot {
        phase: Phase::from_index(u8::try_from(obj.get("phase")?.as_u64()?).ok()?)?,
        sub_phase: SubPhase::from_key(obj.get("sub_phase")?.as_str()?)?,
        turn: u32::try_from(obj.get("turn")?.as_u64()?).ok()?,
        scores: codec::scores_from_wire(obj.get("scores")?)?,
        built: codec::built_from_wire(obj.get("built")?)?,
        nominations: codec::nominations_from_wire(obj.get("nominations")?)?,
        hand,
        revealed,
        control: codec::control_from_wire(obj.get("control")?)?,
        last_placement,
        history: codec::history_from_wire(obj.get("history")?)?,
        facilities: Facilities {
            hearts: u32::try_from(facilities_obj.get("hearts")?.as_u64()?).ok()?,
            diamonds: u32::try_from(facilities_obj.get("diamonds")?.as_u64()?).ok()?,
        },
        mayor_hit_mine: obj.get("mayor_hit_mine")?.as_bool()?,
        city_complete: obj.get("city_complete")?.as_bool()?,
        reality,
    })
}

/// Terminal announcement, broadcast once when the game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverReport {
    pub scores: Scores,
    pub mayor_hit_mine: bool,
    pub city_complete: bool,
    pub turn: u32,
}

pub fn game_over(state: &GameState) -> Value {
    json!({
        "scores": codec::scores_to_wire(&state.scores()),
        "mayor_hit_mine": state.mayor_hit_mine(),
        "city_complete": state.city_complete(),
        "turn": state.turn(),
    })
}

pub fn parse_game_over(value: &Value) -> Option<GameOverReport> {
    let obj = value.as_object()?;
    Some(GameOverReport {
        scores: codec::scores_from_wire(obj.get("scores")?)?,
        mayor_hit_mine: obj.get("mayor_hit_mine")?.as_bool()?,
        city_complete: obj.get("city_complete")?.as_bool()?,
        turn: u32::try_from(obj.get("turn")?.as_u64()?).ok()?,
    })
}
