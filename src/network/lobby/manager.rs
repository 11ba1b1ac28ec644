use std::collections::{BTreeSet, HashMap};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::engine::constants::REQUIRED_PLAYERS;
use crate::network::lobby::protocol::{
    GameStart, JoinRoom, LobbyErrorMsg, RemoveBot, RoomList, RoomSummary, RoomUpdate,
};
use crate::network::session::{msg, Envelope, NetworkSender, PeerId};

pub const ROOM_CODE_LEN: usize = 6;

/// Room-code alphabet with the ambiguous glyphs (I, O, 0, 1) removed.
pub const ROOM_CODE_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

const ROOM_CODE_RETRIES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("Room not found")]
    RoomNotFound,
    #[error("Room is full")]
    RoomFull,
    #[error("Already in a room")]
    AlreadyInRoom,
    #[error("Not in a room")]
    NotInRoom,
    #[error("Only the host can start the game")]
    NotHost,
    #[error("Not enough players to start")]
    NotEnoughPlayers,
    #[error("No such bot in the room")]
    BotNotFound,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub players: Vec<PeerId>,
    pub bots: Vec<PeerId>,
    pub host: PeerId,
    pub created_at: u64,
}

impl Room {
    fn new(id: String, host: PeerId) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Room {
            id,
            players: vec![host],
            bots: Vec::new(),
            host,
            created_at,
        }
    }

    pub fn occupancy(&self) -> usize {
        self.players.len() + self.bots.len()
    }

    pub fn is_full(&self) -> bool {
        self.occupancy() >= REQUIRED_PLAYERS
    }

    fn summary(&self) -> RoomSummary {
        RoomSummary {
            room_id: self.id.clone(),
            player_count: self.occupancy(),
            required: REQUIRED_PLAYERS,
        }
    }

    fn update_payload(&self) -> RoomUpdate {
        RoomUpdate {
            room_id: self.id.clone(),
            players: self.players.clone(),
            bots: self.bots.clone(),
            player_count: self.occupancy(),
            required: REQUIRED_PLAYERS,
            host: self.host,
        }
    }

    fn start_payload(&self) -> GameStart {
        GameStart {
            room_id: self.id.clone(),
            players: self.players.clone(),
            bots: self.bots.clone(),
            host: self.host,
        }
    }
}

/// Server-side room registry. Owns every `Room`; the game state machine
/// only ever sees the `GameStart` handoff this produces.
pub struct LobbyManager<S: NetworkSender> {
    sender: S,
    rooms: HashMap<String, Room>,
    peers: BTreeSet<PeerId>,
    peer_rooms: HashMap<PeerId, String>,
    next_bot_id: PeerId,
    rng: ChaCha8Rng,
}

impl<S: NetworkSender> LobbyManager<S> {
    pub fn new(sender: S) -> Self {
        Self::with_seed(sender, rand::random())
    }

    pub fn with_seed(sender: S, seed: u64) -> Self {
        LobbyManager {
            sender,
            rooms: HashMap::new(),
            peers: BTreeSet::new(),
            peer_rooms: HashMap::new(),
            next_bot_id: -1,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn peer_connected(&mut self, peer: PeerId) {
        self.peers.insert(peer);
        self.send_room_list_to(peer);
    }

    pub fn peer_disconnected(&mut self, peer: PeerId) {
        if self.peer_rooms.contains_key(&peer) {
            let _ = self.leave_room(peer);
        }
        self.peers.remove(&peer);
    }

    /// Dispatch one lobby message. Operational failures are answered with
    /// a `LOBBY_ERROR`; malformed payloads are dropped at the boundary.
    /// Returns the handoff when the message started a game.
    pub fn handle_message(&mut self, from: PeerId, bytes: &[u8]) -> Option<GameStart> {
        let Some(envelope) = Envelope::from_bytes(bytes) else {
            warn!(peer = from, "undecodable lobby message");
            return None;
        };
        let outcome: Result<Option<GameStart>, LobbyError> = match envelope.msg_type {
            msg::CREATE_ROOM => self.create_room(from).map(|_| None),
            msg::JOIN_ROOM => match serde_json::from_value::<JoinRoom>(envelope.data) {
                Ok(req) => self.join_room(from, &req.room_id),
                Err(_) => return None,
            },
            msg::LEAVE_ROOM => self.leave_room(from).map(|_| None),
            msg::LIST_ROOMS => {
                self.send_room_list_to(from);
                Ok(None)
            }
            msg::ADD_BOT => self.add_bot(from).map(|(_, start)| start),
            msg::REMOVE_BOT => match serde_json::from_value::<RemoveBot>(envelope.data) {
                Ok(req) => self.remove_bot(from, req.bot_id).map(|_| None),
                Err(_) => return None,
            },
            msg::REQUEST_START => self.request_start(from).map(Some),
            _ => return None,
        };
        match outcome {
            Ok(start) => start,
            Err(err) => {
                debug!(peer = from, %err, "lobby request refused");
                self.send_error(from, err);
                None
            }
        }
    }

    pub fn create_room(&mut self, peer: PeerId) -> Result<String, LobbyError> {
        if self.peer_rooms.contains_key(&peer) {
            return Err(LobbyError::AlreadyInRoom);
        }
        self.peers.insert(peer);
        let id = self.generate_room_id();
        self.rooms.insert(id.clone(), Room::new(id.clone(), peer));
        self.peer_rooms.insert(peer, id.clone());
        info!(room = %id, peer, "room created");
        self.broadcast_room_update(&id);
        self.broadcast_room_list();
        Ok(id)
    }

    /// Join an existing room. Filling the last seat starts the game.
    pub fn join_room(
        &mut self,
        peer: PeerId,
        room_id: &str,
    ) -> Result<Option<GameStart>, LobbyError> {
        if self.peer_rooms.contains_key(&peer) {
            return Err(LobbyError::AlreadyInRoom);
        }
        let room = self.rooms.get_mut(room_id).ok_or(LobbyError::RoomNotFound)?;
        if room.is_full() {
            return Err(LobbyError::RoomFull);
        }
        room.players.push(peer);
        self.peers.insert(peer);
        self.peer_rooms.insert(peer, room_id.to_string());
        self.broadcast_room_update(room_id);
        self.broadcast_room_list();
        Ok(self.try_auto_start(room_id))
    }

    /// Leave the current room. The last human out destroys the room; a
    /// departing host hands the role to the next player in line.
    pub fn leave_room(&mut self, peer: PeerId) -> Result<(), LobbyError> {
        let room_id = self.peer_rooms.remove(&peer).ok_or(LobbyError::NotInRoom)?;
        let destroyed = match self.rooms.get_mut(&room_id) {
            Some(room) => {
                room.players.retain(|p| *p != peer);
                if room.players.is_empty() {
                    true
                } else {
                    if room.host == peer {
                        room.host = room.players[0];
                    }
                    false
                }
            }
            None => return Err(LobbyError::RoomNotFound),
        };
        if destroyed {
            self.rooms.remove(&room_id);
            info!(room = %room_id, "room destroyed");
        } else {
            self.broadcast_room_update(&room_id);
        }
        self.broadcast_room_list();
        Ok(())
    }

    /// Add a bot seat; any occupant may do this. Filling the last seat
    /// starts the game just as a joining player would.
    pub fn add_bot(&mut self, peer: PeerId) -> Result<(PeerId, Option<GameStart>), LobbyError> {
        let room_id = self
            .peer_rooms
            .get(&peer)
            .cloned()
            .ok_or(LobbyError::NotInRoom)?;
        let bot_id = {
            let room = self
                .rooms
                .get_mut(&room_id)
                .ok_or(LobbyError::RoomNotFound)?;
            if room.is_full() {
                return Err(LobbyError::RoomFull);
            }
            let bot_id = self.next_bot_id;
            self.next_bot_id -= 1;
            room.bots.push(bot_id);
            bot_id
        };
        self.broadcast_room_update(&room_id);
        self.broadcast_room_list();
        Ok((bot_id, self.try_auto_start(&room_id)))
    }

    pub fn remove_bot(&mut self, peer: PeerId, bot_id: PeerId) -> Result<(), LobbyError> {
        let room_id = self
            .peer_rooms
            .get(&peer)
            .cloned()
            .ok_or(LobbyError::NotInRoom)?;
        {
            let room = self
                .rooms
                .get_mut(&room_id)
                .ok_or(LobbyError::RoomNotFound)?;
            let idx = room
                .bots
                .iter()
                .position(|b| *b == bot_id)
                .ok_or(LobbyError::BotNotFound)?;
            room.bots.remove(idx);
        }
        self.broadcast_room_update(&room_id);
        self.broadcast_room_list();
        Ok(())
    }

    /// Host-initiated start. Needs at least two occupants; any remaining
    /// seats are topped up with bots so the game always seats three.
    pub fn request_start(&mut self, peer: PeerId) -> Result<GameStart, LobbyError> {
        let room_id = self
            .peer_rooms
            .get(&peer)
            .cloned()
            .ok_or(LobbyError::NotInRoom)?;
        {
            let room = self.rooms.get(&room_id).ok_or(LobbyError::RoomNotFound)?;
            if room.host != peer {
                return Err(LobbyError::NotHost);
            }
            if room.occupancy() < 2 {
                return Err(LobbyError::NotEnoughPlayers);
            }
        }
        loop {
            let needs_bot = self
                .rooms
                .get(&room_id)
                .map(|r| r.occupancy() < REQUIRED_PLAYERS)
                .unwrap_or(false);
            if !needs_bot {
                break;
            }
            let bot_id = self.next_bot_id;
            self.next_bot_id -= 1;
            if let Some(room) = self.rooms.get_mut(&room_id) {
                room.bots.push(bot_id);
            }
        }
        self.start_room(&room_id).ok_or(LobbyError::RoomNotFound)
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn room_of(&self, peer: PeerId) -> Option<&Room> {
        self.peer_rooms.get(&peer).and_then(|id| self.rooms.get(id))
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn sender_mut(&mut self) -> &mut S {
        &mut self.sender
    }

    fn try_auto_start(&mut self, room_id: &str) -> Option<GameStart> {
        let full = self.rooms.get(room_id).map(Room::is_full).unwrap_or(false);
        if full {
            self.start_room(room_id)
        } else {
            None
        }
    }

    /// Hand the room off to a game session: notify the occupants, drop
    /// the room from the registry, and return the roster.
    fn start_room(&mut self, room_id: &str) -> Option<GameStart> {
        let room = self.rooms.remove(room_id)?;
        for peer in &room.players {
            self.peer_rooms.remove(peer);
            // in-game peers are out of the lobby audience until they return
            self.peers.remove(peer);
        }
        let start = room.start_payload();
        info!(room = %room_id, players = room.players.len(), bots = room.bots.len(), "game starting");
        if let Ok(data) = serde_json::to_value(&start) {
            let bytes = Envelope::new(msg::GAME_START, data).to_bytes();
            for peer in &room.players {
                self.sender.send(*peer, &bytes);
            }
        }
        self.broadcast_room_list();
        Some(start)
    }

    fn generate_room_id(&mut self) -> String {
        for _ in 0..ROOM_CODE_RETRIES {
            let id: String = (0..ROOM_CODE_LEN)
                .map(|_| {
                    let idx = self.rng.gen_range(0..ROOM_CODE_ALPHABET.len());
                    ROOM_CODE_ALPHABET[idx] as char
                })
                .collect();
            if !self.rooms.contains_key(&id) {
                return id;
            }
        }
        // 32^6 codes; colliding this often means something is badly broken
        panic!("room code space exhausted after {ROOM_CODE_RETRIES} attempts");
    }

    fn broadcast_room_update(&mut self, room_id: &str) {
        let Some(room) = self.rooms.get(room_id) else {
            return;
        };
        let recipients = room.players.clone();
        let Ok(data) = serde_json::to_value(room.update_payload()) else {
            return;
        };
        let bytes = Envelope::new(msg::ROOM_UPDATE, data).to_bytes();
        for peer in recipients {
            self.sender.send(peer, &bytes);
        }
    }

    fn room_list_bytes(&self) -> Option<Vec<u8>> {
        let mut rooms: Vec<RoomSummary> = self.rooms.values().map(Room::summary).collect();
        rooms.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        let data = serde_json::to_value(RoomList { rooms }).ok()?;
        Some(Envelope::new(msg::LIST_ROOMS, data).to_bytes())
    }

    fn send_room_list_to(&mut self, peer: PeerId) {
        if let Some(bytes) = self.room_list_bytes() {
            self.sender.send(peer, &bytes);
        }
    }

    fn broadcast_room_list(&mut self) {
        let Some(bytes) = self.room_list_bytes() else {
            return;
        };
        let unroomed: Vec<PeerId> = self
            .peers
            .iter()
            .copied()
            .filter(|p| !self.peer_rooms.contains_key(p))
            .collect();
        for peer in unroomed {
            self.sender.send(peer, &bytes);
        }
    }

    fn send_error(&mut self, peer: PeerId, err: LobbyError) {
        let payload = LobbyErrorMsg {
            message: err.to_string(),
        };
        if let Ok(data) = serde_json::to_value(payload) {
            let bytes = Envelope::new(msg::LOBBY_ERROR, data).to_bytes();
            self.sender.send(peer, &bytes);
        }
    }
}
