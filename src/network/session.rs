//! The session-layer contract this crate consumes.
//!
//! The reliable transport itself lives outside the crate; the game and
//! lobby only ever see integer peer ids and opaque byte payloads. The
//! send capability is injected, never looked up ambiently.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transport-level peer identifier. Real peers are non-negative; bot
/// seats use synthetic negative ids that no transport ever assigns.
pub type PeerId = i64;

pub fn is_bot(peer: PeerId) -> bool {
    peer < 0
}

/// Wire message types, partitioned by numeric range: the low range is
/// core session traffic, 100-109 is the lobby protocol.
pub mod msg {
    pub const ROLE_ASSIGN: u16 = 1;
    pub const STATE_SYNC: u16 = 2;
    pub const GAME_OVER: u16 = 3;

    pub const REVEAL: u16 = 10;
    pub const CONTROL_CHOICE: u16 = 11;
    pub const COMMIT_NOMINATION: u16 = 12;
    pub const PLACE_CARD: u16 = 13;

    pub const CREATE_ROOM: u16 = 100;
    pub const JOIN_ROOM: u16 = 101;
    pub const LEAVE_ROOM: u16 = 102;
    pub const LIST_ROOMS: u16 = 103;
    pub const ROOM_UPDATE: u16 = 104;
    pub const GAME_START: u16 = 105;
    pub const LOBBY_ERROR: u16 = 106;
    pub const ADD_BOT: u16 = 107;
    pub const REMOVE_BOT: u16 = 108;
    pub const REQUEST_START: u16 = 109;
}

/// Every message on the wire, lobby or game, is one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub msg_type: u16,
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<PeerId>,
}

impl Envelope {
    pub fn new(msg_type: u16, data: Value) -> Self {
        Envelope {
            msg_type,
            data,
            from: None,
        }
    }

    pub fn from_peer(msg_type: u16, data: Value, from: PeerId) -> Self {
        Envelope {
            msg_type,
            data,
            from: Some(from),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("default serializer cannot fail")
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Envelope> {
        serde_json::from_slice(bytes).ok()
    }
}

/// The injected network capability: fire-and-forget delivery to one peer
/// or to everyone in the session.
pub trait NetworkSender {
    fn send(&mut self, peer: PeerId, bytes: &[u8]);
    fn broadcast(&mut self, bytes: &[u8]);
}

/// In-memory sender for tests and local simulation: records everything
/// it is asked to deliver.
#[derive(Debug, Default)]
pub struct MemorySender {
    pub sent: Vec<(PeerId, Vec<u8>)>,
    pub broadcasts: Vec<Vec<u8>>,
}

impl MemorySender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded envelopes addressed to `peer`, in send order.
    pub fn envelopes_to(&self, peer: PeerId) -> Vec<Envelope> {
        self.sent
            .iter()
            .filter(|(to, _)| *to == peer)
            .filter_map(|(_, bytes)| Envelope::from_bytes(bytes))
            .collect()
    }

    pub fn last_to(&self, peer: PeerId) -> Option<Envelope> {
        self.envelopes_to(peer).into_iter().last()
    }

    pub fn broadcast_envelopes(&self) -> Vec<Envelope> {
        self.broadcasts
            .iter()
            .filter_map(|bytes| Envelope::from_bytes(bytes))
            .collect()
    }

    pub fn clear(&mut self) {
        self.sent.clear();
        self.broadcasts.clear();
    }
}

impl NetworkSender for MemorySender {
    fn send(&mut self, peer: PeerId, bytes: &[u8]) {
        self.sent.push((peer, bytes.to_vec()));
    }

    fn broadcast(&mut self, bytes: &[u8]) {
        self.broadcasts.push(bytes.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_bytes_round_trip() {
        let env = Envelope::from_peer(msg::REVEAL, json!({"card_index": 2}), 7);
        let bytes = env.to_bytes();
        assert_eq!(Envelope::from_bytes(&bytes), Some(env));
        assert_eq!(Envelope::from_bytes(b"not json"), None);
    }

    #[test]
    fn from_is_omitted_when_absent() {
        let env = Envelope::new(msg::LIST_ROOMS, Value::Null);
        let text = String::from_utf8(env.to_bytes()).expect("utf8");
        assert!(!text.contains("from"));
    }

    #[test]
    fn bot_ids_are_negative() {
        assert!(is_bot(-1));
        assert!(!is_bot(0));
        assert!(!is_bot(42));
    }
}
