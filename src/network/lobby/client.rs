use serde_json::Value;

use crate::network::lobby::protocol::{GameStart, JoinRoom, LobbyErrorMsg, RemoveBot, RoomList, RoomSummary, RoomUpdate};
use crate::network::session::{msg, Envelope, PeerId};

/// Client-side mirror of the lobby. Purely reactive: every inbound
/// message is ground truth and replaces whatever was mirrored before.
#[derive(Debug, Default)]
pub struct LobbyClient {
    room: Option<RoomUpdate>,
    rooms: Vec<RoomSummary>,
    last_error: Option<String>,
    game_start: Option<GameStart>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LobbyClientEvent {
    RoomListUpdated,
    RoomUpdated,
    GameStarting(GameStart),
    Error(String),
}

impl LobbyClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_message(&mut self, bytes: &[u8]) -> Option<LobbyClientEvent> {
        let envelope = Envelope::from_bytes(bytes)?;
        match envelope.msg_type {
            msg::LIST_ROOMS => {
                let list: RoomList = serde_json::from_value(envelope.data).ok()?;
                self.rooms = list.rooms;
                Some(LobbyClientEvent::RoomListUpdated)
            }
            msg::ROOM_UPDATE => {
                let update: RoomUpdate = serde_json::from_value(envelope.data).ok()?;
                self.room = Some(update);
                Some(LobbyClientEvent::RoomUpdated)
            }
            msg::GAME_START => {
                let start: GameStart = serde_json::from_value(envelope.data).ok()?;
                self.room = None;
                self.game_start = Some(start.clone());
                Some(LobbyClientEvent::GameStarting(start))
            }
            msg::LOBBY_ERROR => {
                let err: LobbyErrorMsg = serde_json::from_value(envelope.data).ok()?;
                self.last_error = Some(err.message.clone());
                Some(LobbyClientEvent::Error(err.message))
            }
            _ => None,
        }
    }

    pub fn room(&self) -> Option<&RoomUpdate> {
        self.room.as_ref()
    }

    pub fn rooms(&self) -> &[RoomSummary] {
        &self.rooms
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn game_start(&self) -> Option<&GameStart> {
        self.game_start.as_ref()
    }

    // outbound request builders

    pub fn create_room_request() -> Vec<u8> {
        Envelope::new(msg::CREATE_ROOM, Value::Null).to_bytes()
    }

    pub fn join_room_request(room_id: &str) -> Vec<u8> {
        let data = serde_json::to_value(JoinRoom {
            room_id: room_id.to_string(),
        })
        .unwrap_or(Value::Null);
        Envelope::new(msg::JOIN_ROOM, data).to_bytes()
    }

    pub fn leave_room_request() -> Vec<u8> {
        Envelope::new(msg::LEAVE_ROOM, Value::Null).to_bytes()
    }

    pub fn list_rooms_request() -> Vec<u8> {
        Envelope::new(msg::LIST_ROOMS, Value::Null).to_bytes()
    }

    pub fn add_bot_request() -> Vec<u8> {
        Envelope::new(msg::ADD_BOT, Value::Null).to_bytes()
    }

    pub fn remove_bot_request(bot_id: PeerId) -> Vec<u8> {
        let data = serde_json::to_value(RemoveBot { bot_id }).unwrap_or(Value::Null);
        Envelope::new(msg::REMOVE_BOT, data).to_bytes()
    }

    pub fn request_start_request() -> Vec<u8> {
        Envelope::new(msg::REQUEST_START, Value::Null).to_bytes()
    }
}
