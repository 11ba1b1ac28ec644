use serde::{Deserialize, Serialize};

use crate::network::session::PeerId;

/// One row of the room list shown to peers outside any room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room_id: String,
    pub player_count: usize,
    pub required: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomList {
    pub rooms: Vec<RoomSummary>,
}

/// Full room state, sent to every occupant on any mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub room_id: String,
    pub players: Vec<PeerId>,
    pub bots: Vec<PeerId>,
    pub player_count: usize,
    pub required: usize,
    pub host: PeerId,
}

/// The lobby-to-game handoff: the exact roster, in order, that the game
/// session seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStart {
    pub room_id: String,
    pub players: Vec<PeerId>,
    pub bots: Vec<PeerId>,
    pub host: PeerId,
}

/// Lobby operations reply with explicit errors; unlike gameplay intents
/// they are one-shot user requests and deserve feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobbyErrorMsg {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRoom {
    pub room_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveBot {
    pub bot_id: PeerId,
}
