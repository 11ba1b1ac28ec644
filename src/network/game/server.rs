use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::engine::bot::BotAgent;
use crate::engine::constants::REQUIRED_PLAYERS;
use crate::engine::models::config::GameConfig;
use crate::engine::models::player::Role;
use crate::engine::state::{GameError, GameState, Intent};
use crate::network::codec;
use crate::network::game::protocol;
use crate::network::lobby::protocol::GameStart;
use crate::network::session::{is_bot, msg, Envelope, NetworkSender, PeerId};

/// One occupied role in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub peer: PeerId,
    pub role: Role,
}

/// Seat the lobby roster: the host takes the Mayor's chair (falling back
/// to the first roster entry), then Industry and Urbanist fill in roster
/// order, bots included.
pub fn assign_seats(start: &GameStart) -> Vec<Seat> {
    let mut roster: Vec<PeerId> = start.players.clone();
    roster.extend(start.bots.iter().copied());
    let Some(&first) = roster.first() else {
        return Vec::new();
    };
    let mayor = if roster.contains(&start.host) {
        start.host
    } else {
        first
    };

    let mut seats = vec![Seat {
        peer: mayor,
        role: Role::Mayor,
    }];
    let advisor_roles = [Role::Industry, Role::Urbanist];
    let mut next = 0;
    for peer in roster {
        if peer == mayor || next >= advisor_roles.len() {
            continue;
        }
        seats.push(Seat {
            peer,
            role: advisor_roles[next],
        });
        next += 1;
    }
    seats
}

/// The authoritative game session: owns the state machine, maps peers to
/// seats, and answers every accepted intent with fresh per-role
/// snapshots. Bot seats are pumped from a co-located agent through the
/// same intent pipeline as remote players.
pub struct GameServer<S: NetworkSender> {
    state: GameState,
    seats: Vec<Seat>,
    bots: HashMap<PeerId, BotAgent>,
    sender: S,
    room_id: String,
    over_announced: bool,
}

impl<S: NetworkSender> GameServer<S> {
    pub fn new(start: GameStart, config: GameConfig, sender: S) -> Result<Self, GameError> {
        let seats = assign_seats(&start);
        if seats.len() != REQUIRED_PLAYERS {
            return Err(GameError::InvalidConfig);
        }
        let mut state = GameState::new(config)?;
        state.start();

        let mut bots = HashMap::new();
        for seat in &seats {
            if is_bot(seat.peer) {
                let bot_seed = state.seed().wrapping_add(seat.peer.unsigned_abs());
                bots.insert(seat.peer, BotAgent::new(bot_seed));
            }
        }

        info!(room = %start.room_id, seats = seats.len(), bots = bots.len(), "game session starting");
        let mut server = GameServer {
            state,
            seats,
            bots,
            sender,
            room_id: start.room_id,
            over_announced: false,
        };
        server.send_role_assignments();
        server.sync_all();
        server.drive_bots();
        Ok(server)
    }

    /// Handle one inbound game message. The sender's seat, not the
    /// payload, decides what the intent is allowed to do; anything
    /// malformed or unauthorized is dropped without a reply.
    pub fn handle_message(&mut self, from: PeerId, bytes: &[u8]) {
        let Some(envelope) = Envelope::from_bytes(bytes) else {
            warn!(peer = from, "undecodable game message");
            return;
        };
        let Some(role) = self.role_of(from) else {
            debug!(peer = from, "message from a peer without a seat");
            return;
        };
        let Some(intent) = parse_intent(envelope.msg_type, &envelope.data) else {
            debug!(peer = from, msg_type = envelope.msg_type, "malformed intent dropped");
            return;
        };
        if self.state.apply_intent(role, intent) {
            self.sync_all();
            self.drive_bots();
        }
    }

    /// Inject bot intents while the expected actor is a bot seat.
    pub fn drive_bots(&mut self) {
        loop {
            if self.state.is_over() {
                break;
            }
            let Some(role) = self.state.expected_actor() else {
                break;
            };
            let Some(seat) = self.seats.iter().find(|s| s.role == role).copied() else {
                break;
            };
            if !is_bot(seat.peer) {
                break;
            }
            let Some(intent) = self
                .bots
                .get_mut(&seat.peer)
                .and_then(|bot| bot.next_intent(&self.state, role))
            else {
                break;
            };
            if !self.state.apply_intent(role, intent) {
                warn!(?role, "bot intent rejected");
                break;
            }
            self.sync_all();
        }
        self.announce_game_over();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn sender_mut(&mut self) -> &mut S {
        &mut self.sender
    }

    fn role_of(&self, peer: PeerId) -> Option<Role> {
        self.seats
            .iter()
            .find(|seat| seat.peer == peer)
            .map(|seat| seat.role)
    }

    fn send_role_assignments(&mut self) {
        for seat in self.seats.clone() {
            if is_bot(seat.peer) {
                continue;
            }
            let bytes = Envelope::new(msg::ROLE_ASSIGN, protocol::role_assign(seat.role)).to_bytes();
            self.sender.send(seat.peer, &bytes);
        }
    }

    /// Send every human peer its tailored snapshot, including whoever
    /// just acted, so the local echo always matches server truth.
    fn sync_all(&mut self) {
        for seat in self.seats.clone() {
            if is_bot(seat.peer) {
                continue;
            }
            let data = protocol::snapshot_for(&self.state, seat.role);
            let bytes = Envelope::new(msg::STATE_SYNC, data).to_bytes();
            self.sender.send(seat.peer, &bytes);
        }
    }

    fn announce_game_over(&mut self) {
        if !self.state.is_over() || self.over_announced {
            return;
        }
        self.over_announced = true;
        let bytes = Envelope::new(msg::GAME_OVER, protocol::game_over(&self.state)).to_bytes();
        self.sender.broadcast(&bytes);
        info!(room = %self.room_id, scores = ?self.state.scores(), "game over");
    }
}

fn parse_intent(msg_type: u16, data: &serde_json::Value) -> Option<Intent> {
    match msg_type {
        msg::REVEAL => codec::reveal_from_wire(data).map(|card_index| Intent::Reveal { card_index }),
        msg::CONTROL_CHOICE => codec::control_from_wire(data).map(|choice| Intent::Control { choice }),
        msg::COMMIT_NOMINATION => codec::commit_from_wire(data)
            .map(|(advisor, hex, claim)| Intent::Commit { advisor, hex, claim }),
        msg::PLACE_CARD => {
            codec::place_from_wire(data).map(|(card_index, hex)| Intent::Place { card_index, hex })
        }
        _ => None,
    }
}
